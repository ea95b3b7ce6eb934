//! The console report, in the shape CI logs expect.
//!
//! Everything writes through an injected `Write` so tests can capture the
//! output; styling degrades to plain text when stdout is not a TTY.

use std::io::Write;

use anyhow::Result;

use action_policy::{ActionRef, PolicyList, Workflow};

use crate::style;

/// Separator between report sections.
const LINE: &str = "-------------------------------------------";

/// Banner printed (and annotated) when violations are found.
pub const VIOLATIONS_BANNER: &str = "!!! ACTION POLICY VIOLATIONS DETECTED !!!";

pub struct Report<W: Write> {
    out: W,
}

impl<W: Write> Report<W> {
    pub fn new(out: W) -> Self {
        Report { out }
    }

    /// Early exit: the change set touched no workflow files.
    pub fn no_workflows(&mut self) -> Result<()> {
        writeln!(self.out, "No workflow files detected in change set.")?;
        Ok(())
    }

    /// The fetched policy, one entry per line.
    pub fn policy(&mut self, policy: &PolicyList) -> Result<()> {
        writeln!(self.out, "\n{}", style::header("ACTION POLICY LIST"))?;
        writeln!(self.out, "{}", style::dim(LINE))?;
        for entry in &policy.entries {
            writeln!(self.out, "{entry}")?;
        }
        Ok(())
    }

    /// A workflow file that could not be parsed.
    pub fn parse_failure(&mut self, message: &str) -> Result<()> {
        writeln!(self.out, "\n{}", style::yellow(message))?;
        Ok(())
    }

    /// One evaluated workflow: every reference, then the per-file verdict.
    pub fn workflow(&mut self, workflow: &Workflow, violations: &[ActionRef]) -> Result<()> {
        writeln!(
            self.out,
            "\n{}",
            style::bold(&format!("Evaluating '{}'", workflow.path.display()))
        )?;
        writeln!(self.out, "{}", style::dim(LINE))?;
        for action in &workflow.actions {
            if violations.contains(action) {
                writeln!(self.out, " - {}", style::red(&action.to_string()))?;
            } else {
                writeln!(self.out, " - {action}")?;
            }
        }
        if violations.is_empty() {
            writeln!(self.out, "\n{}", style::green("No violations detected"))?;
        }
        Ok(())
    }

    /// The final verdict across all files.
    pub fn summary(&mut self, violations: &[Workflow]) -> Result<()> {
        if violations.is_empty() {
            writeln!(
                self.out,
                "\n{}",
                style::green(
                    "All workflow files contain actions that conform to the policy provided."
                )
            )?;
            return Ok(());
        }

        writeln!(self.out, "\n{}", style::red_bold(VIOLATIONS_BANNER))?;
        writeln!(self.out, "{}", style::dim(LINE))?;
        for workflow in violations {
            writeln!(self.out, "Workflow: {}", workflow.path.display())?;
            for action in &workflow.actions {
                writeln!(self.out, " - {}", style::red(&action.to_string()))?;
            }
            writeln!(self.out)?;
        }
        Ok(())
    }
}
