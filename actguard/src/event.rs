//! CI event context: which event fired, for which repository, with which
//! commits.
//!
//! The runner describes the triggering event through `GITHUB_EVENT_NAME`,
//! `GITHUB_REPOSITORY`, and a JSON payload file at `GITHUB_EVENT_PATH`.
//! Payload deserialization is lenient; unknown fields are ignored.

use std::fs::File;
use std::io::Read;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::warn;

/// Where the commits to scan come from.
#[derive(Debug)]
pub enum ChangeSource {
    /// Push payload: the distinct commit shas, in payload order.
    Push { shas: Vec<String> },
    /// Pull request: commits are listed by the REST API.
    PullRequest { commits_url: String },
    /// Any other event: nothing to scan.
    Unsupported,
}

/// The triggering event, reduced to what a run needs.
#[derive(Debug)]
pub struct EventContext {
    pub event_name: String,
    pub owner: String,
    pub repo: String,
    pub change: ChangeSource,
}

impl EventContext {
    /// Load the event the runner described in the environment.
    pub fn from_env() -> Result<Self> {
        let event_name =
            std::env::var("GITHUB_EVENT_NAME").context("GITHUB_EVENT_NAME not set")?;
        let repository =
            std::env::var("GITHUB_REPOSITORY").context("GITHUB_REPOSITORY not set")?;
        let payload_path =
            std::env::var("GITHUB_EVENT_PATH").context("GITHUB_EVENT_PATH not set")?;
        let payload = File::open(&payload_path)
            .with_context(|| format!("failed to open event payload {payload_path}"))?;
        Self::from_reader(&event_name, &repository, payload)
    }

    /// Build a context from an event name, an `owner/repo` pair, and payload
    /// JSON.
    pub fn from_reader(event_name: &str, repository: &str, payload: impl Read) -> Result<Self> {
        let (owner, repo) = repository
            .split_once('/')
            .with_context(|| format!("malformed repository '{repository}' (expected owner/repo)"))?;

        let change = match event_name {
            "push" => {
                let payload: PushPayload = serde_json::from_reader(payload)
                    .context("failed to parse push event payload")?;
                let shas = payload
                    .commits
                    .into_iter()
                    .filter(|commit| commit.distinct)
                    .map(|commit| commit.id)
                    .collect();
                ChangeSource::Push { shas }
            }
            "pull_request" => {
                let payload: PullRequestPayload = serde_json::from_reader(payload)
                    .context("failed to parse pull_request event payload")?;
                ChangeSource::PullRequest {
                    commits_url: payload.pull_request.commits_url,
                }
            }
            other => {
                warn!(event = other, "unsupported event, nothing to scan");
                ChangeSource::Unsupported
            }
        };

        Ok(EventContext {
            event_name: event_name.to_string(),
            owner: owner.to_string(),
            repo: repo.to_string(),
            change,
        })
    }
}

#[derive(Debug, Deserialize)]
struct PushPayload {
    #[serde(default)]
    commits: Vec<PushCommit>,
}

/// One commit of a push payload. `distinct` is false for commits the runner
/// has already delivered in an earlier push.
#[derive(Debug, Deserialize)]
struct PushCommit {
    id: String,
    #[serde(default)]
    distinct: bool,
}

#[derive(Debug, Deserialize)]
struct PullRequestPayload {
    pull_request: PullRequestInfo,
}

#[derive(Debug, Deserialize)]
struct PullRequestInfo {
    commits_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push_payload() -> &'static str {
        r#"{
  "ref": "refs/heads/main",
  "commits": [
    { "id": "aaa111", "distinct": true, "message": "one" },
    { "id": "bbb222", "distinct": false, "message": "redelivered" },
    { "id": "ccc333", "distinct": true, "message": "two" }
  ]
}"#
    }

    fn pull_request_payload() -> &'static str {
        r#"{
  "action": "synchronize",
  "number": 7,
  "pull_request": {
    "commits_url": "https://api.github.com/repos/octo/widgets/pulls/7/commits"
  }
}"#
    }

    #[test]
    fn push_keeps_only_distinct_commits() {
        let event =
            EventContext::from_reader("push", "octo/widgets", push_payload().as_bytes()).unwrap();

        assert_eq!(event.owner, "octo");
        assert_eq!(event.repo, "widgets");
        match event.change {
            ChangeSource::Push { shas } => assert_eq!(shas, ["aaa111", "ccc333"]),
            other => panic!("expected push change source, got {other:?}"),
        }
    }

    #[test]
    fn pull_request_carries_its_commits_url() {
        let event = EventContext::from_reader(
            "pull_request",
            "octo/widgets",
            pull_request_payload().as_bytes(),
        )
        .unwrap();

        match event.change {
            ChangeSource::PullRequest { commits_url } => {
                assert!(commits_url.ends_with("/pulls/7/commits"));
            }
            other => panic!("expected pull_request change source, got {other:?}"),
        }
    }

    #[test]
    fn unknown_events_have_nothing_to_scan() {
        let event = EventContext::from_reader("schedule", "octo/widgets", "{}".as_bytes()).unwrap();
        assert!(matches!(event.change, ChangeSource::Unsupported));
    }

    #[test]
    fn push_without_commits_is_empty() {
        let event = EventContext::from_reader("push", "octo/widgets", "{}".as_bytes()).unwrap();
        assert!(matches!(event.change, ChangeSource::Push { ref shas } if shas.is_empty()));
    }

    #[test]
    fn malformed_repository_is_an_error() {
        let err =
            EventContext::from_reader("push", "just-a-name", "{}".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("owner/repo"));
    }

    #[test]
    fn malformed_payload_is_an_error() {
        let err =
            EventContext::from_reader("push", "octo/widgets", "{not json".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("push event payload"));
    }

    #[test]
    fn from_env_reads_the_payload_file() {
        let dir = tempfile::tempdir().unwrap();
        let payload = dir.path().join("event.json");
        std::fs::write(&payload, push_payload()).unwrap();

        unsafe {
            std::env::set_var("GITHUB_EVENT_NAME", "push");
            std::env::set_var("GITHUB_REPOSITORY", "octo/widgets");
            std::env::set_var("GITHUB_EVENT_PATH", &payload);
        }
        let event = EventContext::from_env().unwrap();
        unsafe {
            std::env::remove_var("GITHUB_EVENT_NAME");
            std::env::remove_var("GITHUB_REPOSITORY");
            std::env::remove_var("GITHUB_EVENT_PATH");
        }

        assert_eq!(event.event_name, "push");
        assert!(matches!(event.change, ChangeSource::Push { ref shas } if shas.len() == 2));
    }
}
