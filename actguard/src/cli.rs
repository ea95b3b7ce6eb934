//! Command-line interface definition.
//!
//! Every input also binds the environment variable a CI runner provides
//! (`INPUT_<NAME>`), so the binary runs unchanged as a workflow step or from
//! a local shell.

use clap::Parser;

use crate::version;

/// Guard workflow files against unvetted actions.
///
/// Scans the workflow files touched by a push or pull request, extracts every
/// `uses:` action reference, and checks each one against a remote policy
/// document.
#[derive(Debug, Parser)]
#[command(name = "actguard", version = version::VERSION, about)]
pub struct Cli {
    /// Policy mode: "allow" (only listed actions may be used) or "prohibit"
    /// (listed actions may not be used).
    #[arg(long, env = "INPUT_POLICY", value_name = "MODE")]
    pub policy: String,

    /// URL of the JSON policy document: {"actions": ["author/name@ref", ...]}.
    #[arg(long, env = "INPUT_POLICY-URL", value_name = "URL")]
    pub policy_url: Option<String>,

    /// Token for GitHub API commit lookups.
    #[arg(long, env = "INPUT_GITHUB-TOKEN", hide_env_values = true, value_name = "TOKEN")]
    pub github_token: Option<String>,

    /// Fail the run when violations are found ("true" to enable).
    #[arg(long, env = "INPUT_FAIL-IF-VIOLATIONS", value_name = "BOOL")]
    pub fail_if_violations: Option<String>,

    /// Show full error chains on failure.
    #[arg(long, short)]
    pub verbose: bool,
}
