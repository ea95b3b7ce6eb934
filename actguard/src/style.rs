//! TTY-aware color and styling helpers for the console report.
//!
//! Built on the [`console`] crate which automatically detects whether
//! stdout/stderr is a terminal and respects the `NO_COLOR` environment
//! variable (<https://no-color.org/>). On a CI runner neither stream is a
//! TTY, so everything degrades to plain text.

use console::Style;

/// A `Style` targeting **stdout** (auto-detects TTY + NO_COLOR).
fn out() -> Style {
    Style::new()
}

/// A `Style` targeting **stderr** (auto-detects TTY + NO_COLOR).
fn err() -> Style {
    Style::new().for_stderr()
}

/// Bold text (for per-file headers).
pub fn bold(text: &str) -> String {
    out().bold().apply_to(text).to_string()
}

/// Dim / muted text (for separators).
pub fn dim(text: &str) -> String {
    out().dim().apply_to(text).to_string()
}

/// Bold cyan – section headers.
pub fn header(text: &str) -> String {
    out().cyan().bold().apply_to(text).to_string()
}

/// Green – conforming actions, clean verdicts.
pub fn green(text: &str) -> String {
    out().green().apply_to(text).to_string()
}

/// Red – violating references.
pub fn red(text: &str) -> String {
    out().red().apply_to(text).to_string()
}

/// Bold red – the violations banner.
pub fn red_bold(text: &str) -> String {
    out().red().bold().apply_to(text).to_string()
}

/// Yellow – parse failures and other warnings.
pub fn yellow(text: &str) -> String {
    out().yellow().apply_to(text).to_string()
}

/// Bold red on stderr – the `error:` prefix.
pub fn err_red_bold(text: &str) -> String {
    err().red().bold().apply_to(text).to_string()
}

/// Dim on stderr – `caused by:` lines.
pub fn err_dim(text: &str) -> String {
    err().dim().apply_to(text).to_string()
}

/// Bold cyan on stderr – the `hint:` prefix.
pub fn err_cyan_bold(text: &str) -> String {
    err().cyan().bold().apply_to(text).to_string()
}
