//! Actguard library — workflow action policy enforcement for CI change sets.
//!
//! The binary in this crate runs inside a CI job: it finds the workflow files
//! a push or pull request touched, extracts their `uses:` action references,
//! and checks each one against a remote policy document. The domain types
//! (references, policies, workflow extraction) live in the [`action_policy`]
//! crate; this crate owns the CI surface around them.
//!
//! # Modules
//!
//! - [`cli`] — Command-line interface definition.
//! - [`config`] — Run configuration, assembled and validated once.
//! - [`event`] — CI event payloads (push, pull_request).
//! - [`client`] — Synchronous GitHub REST client and the policy fetch.
//! - [`run`] — One enforcement run, end to end.
//! - [`report`] — The console report.
//! - [`output`] — `GITHUB_OUTPUT` values and workflow-command annotations.
//! - [`errors`] — User-facing error display.
//! - [`style`] — TTY-aware styling helpers.

pub mod cli;
pub mod client;
pub mod config;
pub mod errors;
pub mod event;
pub mod output;
pub mod report;
pub mod run;
pub mod style;
pub mod tracing_init;
pub mod version;
