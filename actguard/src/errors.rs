//! Error rendering at the CLI boundary.

use std::io::{self, Write};

use action_policy::{ParseRefError, PolicyError};

use crate::style;

/// Print an error and its cause chain to stderr, with a hint when the root
/// cause is one we recognize.
pub fn display_error(err: &anyhow::Error, verbose: bool) {
    let stderr = io::stderr();
    let mut out = stderr.lock();
    // If stderr itself is gone there is nowhere left to report to.
    let _ = render(&mut out, err, verbose);
}

fn render(out: &mut impl Write, err: &anyhow::Error, verbose: bool) -> io::Result<()> {
    writeln!(out, "{} {err}", style::err_red_bold("error:"))?;

    let causes: Vec<_> = err.chain().skip(1).collect();
    for cause in &causes {
        writeln!(out, "  {}", style::err_dim(&format!("caused by: {cause}")))?;
    }

    if let Some(hint) = hint_for(err) {
        writeln!(out, "\n  {} {hint}", style::err_cyan_bold("hint:"))?;
    }

    if verbose {
        writeln!(out, "\nFull error chain:\n{err:?}")?;
    } else if !causes.is_empty() {
        writeln!(
            out,
            "\n  {}",
            style::err_dim("run with --verbose for full details")
        )?;
    }
    Ok(())
}

/// A fix-it hint for the first cause in the chain that carries one.
fn hint_for(err: &anyhow::Error) -> Option<String> {
    for cause in err.chain() {
        if let Some(policy) = cause.downcast_ref::<PolicyError>() {
            return policy.help();
        }
        if let Some(parse) = cause.downcast_ref::<ParseRefError>() {
            return parse.help();
        }
    }
    None
}
