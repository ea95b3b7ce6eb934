//! Action policy domain for GitHub Actions workflows.
//!
//! This crate provides the core building blocks for enforcing a remote action
//! policy over workflow files: parsing `author/name@ref` references, matching
//! them against an allow or prohibit list, and extracting every `uses:`
//! reference from workflow YAML.
//!
//! # Modules
//!
//! - [`reference`] — Parsed `author/name@ref` action references.
//! - [`policy`] — Policy documents, modes, and violation checks.
//! - [`workflow`] — Workflow files and `uses:` extraction.
//! - [`error`] — Error types for all of the above.
//!
//! # Example
//!
//! ```
//! use action_policy::{ActionRef, PolicyList, PolicyMode};
//!
//! let policy = PolicyList::from_json(r#"{"actions": ["actions/*@*"]}"#).unwrap();
//!
//! let checkout = ActionRef::parse("actions/checkout@v4").unwrap();
//! assert!(!policy.is_violation(PolicyMode::Allow, &checkout));
//!
//! let vendored = ActionRef::parse("vendor/tool@v1").unwrap();
//! assert!(policy.is_violation(PolicyMode::Allow, &vendored));
//! ```

pub mod error;
pub mod policy;
pub mod reference;
pub mod workflow;

pub use error::{ParseRefError, PolicyError, WorkflowError};
pub use policy::{PolicyList, PolicyMode, covers};
pub use reference::{ActionRef, WILDCARD};
pub use workflow::{Workflow, is_workflow_path};
