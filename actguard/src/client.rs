//! Synchronous GitHub REST client for commit lookups and the policy fetch.
//!
//! Requests are sequential with no retries; the first network failure fails
//! the run.

use std::collections::HashSet;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use tracing::debug;

use action_policy::PolicyList;

use crate::event::{ChangeSource, EventContext};
use crate::version;

/// Commits are listed 100 at a time (the API maximum).
const COMMITS_PER_PAGE: usize = 100;
/// The commits endpoint pages its `files` array at 300 entries.
const FILES_PER_PAGE: usize = 300;
/// Timeout for any single request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One commit as listed by the pull-request commits endpoint.
#[derive(Debug, Deserialize)]
pub struct CommitInfo {
    pub sha: String,
    #[serde(default)]
    pub parents: Vec<CommitParent>,
}

#[derive(Debug, Deserialize)]
pub struct CommitParent {
    pub sha: String,
}

#[derive(Debug, Deserialize)]
struct CommitDetail {
    #[serde(default)]
    files: Vec<CommitFile>,
}

#[derive(Debug, Deserialize)]
struct CommitFile {
    filename: String,
    #[serde(default)]
    status: String,
}

pub struct GitHubClient {
    agent: ureq::Agent,
    api_url: String,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(api_url: impl Into<String>, token: Option<String>) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build();
        GitHubClient {
            agent,
            api_url: api_url.into(),
            token,
        }
    }

    fn get(&self, url: &str) -> ureq::Request {
        let mut request = self
            .agent
            .get(url)
            .set("Accept", "application/vnd.github+json")
            .set("User-Agent", version::user_agent());
        if let Some(token) = &self.token {
            request = request.set("Authorization", &format!("Bearer {token}"));
        }
        request
    }

    /// Paths touched by one commit, `removed` entries skipped.
    pub fn commit_files(&self, owner: &str, repo: &str, sha: &str) -> Result<Vec<String>> {
        let url = format!("{}/repos/{owner}/{repo}/commits/{sha}", self.api_url);
        let mut files = Vec::new();
        for page in 1.. {
            let response = self
                .get(&url)
                .query("page", &page.to_string())
                .call()
                .map_err(|e| api_error(e, &format!("commit {sha}")))?;
            let body = response
                .into_string()
                .with_context(|| format!("failed to read response for commit {sha}"))?;
            let detail: CommitDetail = serde_json::from_str(&body)
                .with_context(|| format!("unexpected response for commit {sha}"))?;

            let page_len = detail.files.len();
            files.extend(
                detail
                    .files
                    .into_iter()
                    .filter(|file| file.status != "removed")
                    .map(|file| file.filename),
            );
            if page_len < FILES_PER_PAGE {
                break;
            }
        }
        debug!(sha, files = files.len(), "fetched commit files");
        Ok(files)
    }

    /// Commits of a pull request, following `commits_url` until a short page.
    pub fn pull_request_commits(&self, commits_url: &str) -> Result<Vec<CommitInfo>> {
        let mut commits: Vec<CommitInfo> = Vec::new();
        for page in 1.. {
            let response = self
                .get(commits_url)
                .query("per_page", &COMMITS_PER_PAGE.to_string())
                .query("page", &page.to_string())
                .call()
                .map_err(|e| api_error(e, "pull request commits"))?;
            let body = response
                .into_string()
                .context("failed to read pull request commit list")?;
            let batch: Vec<CommitInfo> =
                serde_json::from_str(&body).context("unexpected pull request commit list")?;

            let batch_len = batch.len();
            commits.extend(batch);
            if batch_len < COMMITS_PER_PAGE {
                break;
            }
        }
        debug!(commits = commits.len(), "fetched pull request commits");
        Ok(commits)
    }

    /// Union of files changed by every counted commit, in first-seen order.
    pub fn changed_files(&self, event: &EventContext) -> Result<Vec<String>> {
        let shas: Vec<String> = match &event.change {
            ChangeSource::Push { shas } => shas.clone(),
            ChangeSource::PullRequest { commits_url } => self
                .pull_request_commits(commits_url)?
                .into_iter()
                .filter(|commit| commit.parents.len() <= 1) // skip merge commits
                .map(|commit| commit.sha)
                .collect(),
            ChangeSource::Unsupported => Vec::new(),
        };

        let mut seen = HashSet::new();
        let mut files = Vec::new();
        for sha in &shas {
            for file in self.commit_files(&event.owner, &event.repo, sha)? {
                if seen.insert(file.clone()) {
                    files.push(file);
                }
            }
        }
        Ok(files)
    }
}

/// Fetch and parse the policy document.
///
/// Unauthenticated: the policy URL may point at any host, so the GitHub token
/// is never attached here.
pub fn fetch_policy(url: &str) -> Result<PolicyList> {
    let response = ureq::get(url)
        .timeout(REQUEST_TIMEOUT)
        .set("Accept", "application/json")
        .set("User-Agent", version::user_agent())
        .call()
        .map_err(|e| match e {
            ureq::Error::Status(404, _) => anyhow!("policy document not found at {url}"),
            ureq::Error::Status(code, _) => anyhow!("policy server returned {code} for {url}"),
            e => anyhow!("failed to fetch policy from {url}: {e}"),
        })?;
    let body = response
        .into_string()
        .context("failed to read policy document")?;
    let policy = PolicyList::from_json(&body)
        .with_context(|| format!("invalid policy document at {url}"))?;
    debug!(url, entries = policy.entries.len(), "fetched policy");
    Ok(policy)
}

fn api_error(err: ureq::Error, what: &str) -> anyhow::Error {
    match err {
        ureq::Error::Status(401, _) => {
            anyhow!("GitHub API rejected the token (401) fetching {what}")
        }
        ureq::Error::Status(404, _) => anyhow!("{what} not found (404)"),
        ureq::Error::Status(code, _) => anyhow!("GitHub API returned {code} fetching {what}"),
        e => anyhow!("GitHub API request for {what} failed: {e}"),
    }
}
