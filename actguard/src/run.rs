//! One full check: change set, policy fetch, evaluation, outputs.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, warn};

use action_policy::{ActionRef, Workflow, is_workflow_path};

use crate::client::{self, GitHubClient};
use crate::config::Config;
use crate::event::EventContext;
use crate::output;
use crate::report::Report;

/// What a completed run found.
#[derive(Debug, Default)]
pub struct RunOutcome {
    /// Workflows with at least one violating reference.
    pub violations: Vec<Workflow>,
    /// Messages for workflow files that failed to parse.
    pub failures: Vec<String>,
}

impl RunOutcome {
    /// Whether the step should fail. Parse failures always fail the run;
    /// violations fail it only when `fail-if-violations` is on.
    pub fn failed(&self, config: &Config) -> bool {
        !self.failures.is_empty() || (config.fail_if_violations && !self.violations.is_empty())
    }
}

/// Run against the event the runner describes in the environment.
pub fn run(config: &Config, out: impl Write) -> Result<RunOutcome> {
    let event = EventContext::from_env()?;
    run_with(config, &event, out)
}

/// Run against an already-resolved event context.
pub fn run_with(config: &Config, event: &EventContext, out: impl Write) -> Result<RunOutcome> {
    info!(
        event = %event.event_name,
        owner = %event.owner,
        repo = %event.repo,
        mode = %config.mode,
        "starting policy check"
    );

    let client = GitHubClient::new(&config.api_url, config.token.clone());
    let files = client
        .changed_files(event)
        .context("failed to enumerate changed files")?;

    let workflow_paths: Vec<PathBuf> = files
        .into_iter()
        .map(PathBuf::from)
        .filter(|path| is_workflow_path(path))
        .collect();

    let mut report = Report::new(out);
    let mut outcome = RunOutcome::default();

    if workflow_paths.is_empty() {
        report.no_workflows()?;
        return Ok(outcome);
    }

    let policy = client::fetch_policy(&config.policy_url)?;
    report.policy(&policy)?;

    let mut workflows = Vec::new();
    for path in &workflow_paths {
        match Workflow::load_in(&config.workspace, path) {
            Ok(workflow) => workflows.push(workflow),
            Err(err) => {
                warn!(error = %err, "workflow parse failed");
                let message = format!(
                    "Unable to parse workflow file '{}' - please ensure it's formatted properly.",
                    path.display()
                );
                report.parse_failure(&message)?;
                outcome.failures.push(message);
            }
        }
    }

    for workflow in &workflows {
        let violating: Vec<ActionRef> = workflow
            .actions
            .iter()
            .filter(|action| policy.is_violation(config.mode, action))
            .cloned()
            .collect();
        report.workflow(workflow, &violating)?;
        if !violating.is_empty() {
            outcome.violations.push(Workflow {
                path: workflow.path.clone(),
                actions: violating,
            });
        }
    }

    report.summary(&outcome.violations)?;

    if !outcome.violations.is_empty() {
        let json =
            serde_json::to_string(&outcome.violations).context("failed to serialize violations")?;
        output::set_output(config.output_path.as_deref(), "violations", &json)?;
    }

    Ok(outcome)
}

/// Process exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
}
