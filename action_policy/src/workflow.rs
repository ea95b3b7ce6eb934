//! Workflow files and `uses:` extraction.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_yaml::Value;
use tracing::trace;

use crate::error::WorkflowError;
use crate::reference::ActionRef;

/// The mapping key whose string values are action references.
const USES_KEY: &str = "uses";

/// A parsed workflow file and every action reference it uses, in document
/// order.
///
/// Serializes as `{"filePath": …, "actions": […]}`, the shape of the
/// violations output.
#[derive(Debug, Clone, Serialize)]
pub struct Workflow {
    #[serde(rename = "filePath")]
    pub path: PathBuf,
    pub actions: Vec<ActionRef>,
}

impl Workflow {
    /// Parse workflow YAML and extract every action reference in it.
    pub fn parse_str(path: impl Into<PathBuf>, content: &str) -> Result<Self, WorkflowError> {
        let path = path.into();
        let doc: Value = serde_yaml::from_str(content).map_err(|source| WorkflowError::Yaml {
            path: path.clone(),
            source,
        })?;

        let mut raw = Vec::new();
        collect_uses(&doc, &path, &mut raw)?;

        let mut actions = Vec::with_capacity(raw.len());
        for reference in raw {
            let action = ActionRef::parse(&reference).map_err(|source| WorkflowError::Ref {
                path: path.clone(),
                source,
            })?;
            actions.push(action);
        }

        trace!(path = %path.display(), actions = actions.len(), "parsed workflow");
        Ok(Workflow { path, actions })
    }

    /// Read and parse a workflow file as-is.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, WorkflowError> {
        let path = path.into();
        let content = fs::read_to_string(&path).map_err(|source| WorkflowError::Read {
            path: path.clone(),
            source,
        })?;
        Self::parse_str(path, &content)
    }

    /// Read a repo-relative workflow file from `root`, keeping the relative
    /// path as the workflow's identity.
    pub fn load_in(root: &Path, path: &Path) -> Result<Self, WorkflowError> {
        let full = root.join(path);
        let content = fs::read_to_string(&full).map_err(|source| WorkflowError::Read {
            path: full,
            source,
        })?;
        Self::parse_str(path.to_path_buf(), &content)
    }
}

/// Whether a repo-relative path is a workflow file: directly under
/// `.github/workflows` with a `yml` or `yaml` extension, both
/// case-insensitive. Nested directories don't count.
pub fn is_workflow_path(path: &Path) -> bool {
    let ext_ok = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml"));

    let dir_ok = path
        .parent()
        .map(|dir| dir.to_string_lossy().to_lowercase())
        .is_some_and(|dir| dir == ".github/workflows");

    ext_ok && dir_ok
}

/// Depth-first walk collecting every string value stored under a `uses` key.
///
/// Mappings and sequences are descended regardless of key. An empty `uses:`
/// (YAML null) collects nothing; any other non-string scalar under `uses`
/// fails the file.
fn collect_uses(value: &Value, path: &Path, out: &mut Vec<String>) -> Result<(), WorkflowError> {
    match value {
        Value::Mapping(mapping) => {
            for (key, entry) in mapping {
                let is_uses = key.as_str() == Some(USES_KEY);
                match entry {
                    Value::Mapping(_) | Value::Sequence(_) => collect_uses(entry, path, out)?,
                    Value::String(reference) if is_uses => out.push(reference.clone()),
                    Value::Null => {}
                    _ if is_uses => {
                        return Err(WorkflowError::UsesValue {
                            path: path.to_path_buf(),
                        });
                    }
                    _ => {}
                }
            }
        }
        Value::Sequence(sequence) => {
            for entry in sequence {
                collect_uses(entry, path, out)?;
            }
        }
        _ => {}
    }
    Ok(())
}
