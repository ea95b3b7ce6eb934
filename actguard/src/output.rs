//! Runner output plumbing: `GITHUB_OUTPUT` values and workflow commands.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, bail};
use tracing::debug;

/// Append a step output to the `GITHUB_OUTPUT` file, if the runner provided
/// one. Values are framed heredoc-style so multi-line JSON survives.
pub fn set_output(path: Option<&Path>, name: &str, value: &str) -> Result<()> {
    let Some(path) = path else {
        debug!(name, "GITHUB_OUTPUT not set, skipping output");
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open output file '{}'", path.display()))?;
    write_output(file, name, value)
        .with_context(|| format!("failed to write output '{name}'"))
}

fn write_output(mut out: impl Write, name: &str, value: &str) -> Result<()> {
    let delimiter = delimiter();
    if name.contains(&delimiter) || value.contains(&delimiter) {
        bail!("output value collides with delimiter '{delimiter}'");
    }
    writeln!(out, "{name}<<{delimiter}")?;
    writeln!(out, "{value}")?;
    writeln!(out, "{delimiter}")?;
    Ok(())
}

fn delimiter() -> String {
    // Unpredictable enough that user-controlled values won't contain it.
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.subsec_nanos())
        .unwrap_or(0);
    format!("ghadelimiter_{nanos}")
}

/// Render an `::error::` workflow command, which GitHub surfaces as a run
/// annotation when printed to stdout.
pub fn error_command(message: &str) -> String {
    format!("::error::{}", escape_data(message))
}

fn escape_data(data: &str) -> String {
    data.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_multi_line_values() {
        let mut buffer = Vec::new();
        write_output(&mut buffer, "violations", "[\n  {}\n]").unwrap();
        let text = String::from_utf8(buffer).unwrap();

        let mut lines = text.lines();
        let first = lines.next().unwrap();
        let delimiter = first.strip_prefix("violations<<").unwrap();
        assert!(delimiter.starts_with("ghadelimiter_"));

        let rest: Vec<&str> = lines.collect();
        assert_eq!(rest, ["[", "  {}", "]", delimiter]);
    }

    #[test]
    fn appends_to_the_output_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        set_output(Some(file.path()), "violations", "[]").unwrap();
        set_output(Some(file.path()), "count", "0").unwrap();

        let text = std::fs::read_to_string(file.path()).unwrap();
        assert!(text.contains("violations<<"));
        assert!(text.contains("count<<"));
    }

    #[test]
    fn skips_silently_without_an_output_file() {
        set_output(None, "violations", "[]").unwrap();
    }

    #[test]
    fn escapes_command_data() {
        assert_eq!(
            error_command("50% done\r\nnext line"),
            "::error::50%25 done%0D%0Anext line"
        );
    }
}
