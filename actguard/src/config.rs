//! Run configuration, assembled and validated once at startup.
//!
//! Inputs come from flags or the runner's `INPUT_*` environment (see
//! [`Cli`]); runner context comes from the `GITHUB_*` environment. Nothing
//! past this layer reads the environment except the event payload loader.

use std::path::PathBuf;

use anyhow::{Context, Result};

use action_policy::PolicyMode;

use crate::cli::Cli;

/// REST endpoint used when `GITHUB_API_URL` is unset (github.com).
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Everything a run needs, validated.
#[derive(Debug, Clone)]
pub struct Config {
    pub mode: PolicyMode,
    pub policy_url: String,
    pub token: Option<String>,
    /// Exit non-zero when violations are found.
    pub fail_if_violations: bool,
    /// Base URL of the GitHub REST API (`GITHUB_API_URL`).
    pub api_url: String,
    /// Checked-out tree workflow files are read from (`GITHUB_WORKSPACE`).
    pub workspace: PathBuf,
    /// Runner output file (`GITHUB_OUTPUT`), if any.
    pub output_path: Option<PathBuf>,
}

impl Config {
    /// Validate CLI inputs and capture runner context.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let mode: PolicyMode = cli
            .policy
            .parse()
            .context("policy must be set to 'allow' or 'prohibit'")?;

        let policy_url = cli
            .policy_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .context("policy-url not set")?
            .to_string();

        let token = cli
            .github_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(String::from);

        // The runner passes inputs as strings; only the literal "true" enables.
        let fail_if_violations = cli
            .fail_if_violations
            .as_deref()
            .is_some_and(|value| value.trim() == "true");

        let api_url = env_nonempty("GITHUB_API_URL")
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let workspace = env_nonempty("GITHUB_WORKSPACE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        let output_path = std::env::var_os("GITHUB_OUTPUT").map(PathBuf::from);

        Ok(Config {
            mode,
            policy_url,
            token,
            fail_if_violations,
            api_url,
            workspace,
            output_path,
        })
    }
}

fn env_nonempty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["actguard"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn resolves_minimal_inputs() {
        let config = Config::resolve(&cli(&[
            "--policy",
            "allow",
            "--policy-url",
            "https://example.com/policy.json",
        ]))
        .unwrap();

        assert_eq!(config.mode, PolicyMode::Allow);
        assert_eq!(config.policy_url, "https://example.com/policy.json");
        assert_eq!(config.token, None);
        assert!(!config.fail_if_violations);
    }

    #[test]
    fn rejects_unknown_mode() {
        let err = Config::resolve(&cli(&["--policy", "sometimes", "--policy-url", "u"]))
            .unwrap_err();
        assert_eq!(err.to_string(), "policy must be set to 'allow' or 'prohibit'");
    }

    #[test]
    fn rejects_empty_mode() {
        let err = Config::resolve(&cli(&["--policy", "", "--policy-url", "u"])).unwrap_err();
        assert_eq!(err.to_string(), "policy must be set to 'allow' or 'prohibit'");
    }

    #[test]
    fn requires_a_policy_url() {
        let err = Config::resolve(&cli(&["--policy", "allow"])).unwrap_err();
        assert_eq!(err.to_string(), "policy-url not set");

        let err = Config::resolve(&cli(&["--policy", "allow", "--policy-url", "  "])).unwrap_err();
        assert_eq!(err.to_string(), "policy-url not set");
    }

    #[test]
    fn blank_token_is_no_token() {
        let config = Config::resolve(&cli(&[
            "--policy",
            "prohibit",
            "--policy-url",
            "u",
            "--github-token",
            "   ",
        ]))
        .unwrap();
        assert_eq!(config.token, None);
    }

    #[test]
    fn fail_if_violations_takes_only_the_literal_true() {
        let enabled = Config::resolve(&cli(&[
            "--policy",
            "allow",
            "--policy-url",
            "u",
            "--fail-if-violations",
            "true",
        ]))
        .unwrap();
        assert!(enabled.fail_if_violations);

        let disabled = Config::resolve(&cli(&[
            "--policy",
            "allow",
            "--policy-url",
            "u",
            "--fail-if-violations",
            "True",
        ]))
        .unwrap();
        assert!(!disabled.fail_if_violations);
    }

    #[test]
    fn api_url_trims_trailing_slashes() {
        unsafe { std::env::set_var("GITHUB_API_URL", "https://ghe.example.com/api/v3/") };
        let config =
            Config::resolve(&cli(&["--policy", "allow", "--policy-url", "u"])).unwrap();
        unsafe { std::env::remove_var("GITHUB_API_URL") };

        assert_eq!(config.api_url, "https://ghe.example.com/api/v3");
    }
}
