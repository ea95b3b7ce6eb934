//! Error types for references, policy documents, and workflow files.

use std::path::PathBuf;

/// Errors from parsing an `author/name@ref` action reference.
#[derive(Debug, thiserror::Error)]
pub enum ParseRefError {
    #[error("missing '/' between author and name in '{0}'")]
    MissingSlash(String),

    #[error("empty author in '{0}'")]
    EmptyAuthor(String),

    #[error("empty action name in '{0}'")]
    EmptyName(String),

    #[error("empty ref after '@' in '{0}'")]
    EmptyRef(String),
}

impl ParseRefError {
    /// Return a help message suggesting how to fix this error, if applicable.
    pub fn help(&self) -> Option<String> {
        match self {
            ParseRefError::MissingSlash(_) => Some(
                "action references look like 'author/name@ref', e.g. 'actions/checkout@v4'"
                    .to_string(),
            ),
            ParseRefError::EmptyRef(_) => {
                Some("pin a ref ('actions/checkout@v4') or drop the '@' to match any ref".to_string())
            }
            _ => None,
        }
    }
}

/// Errors from loading a policy document.
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    #[error("policy document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid policy entry '{entry}': {source}")]
    Entry {
        entry: String,
        source: ParseRefError,
    },

    #[error("unknown policy mode '{0}'")]
    UnknownMode(String),
}

impl PolicyError {
    /// Return a help message suggesting how to fix this error, if applicable.
    pub fn help(&self) -> Option<String> {
        match self {
            PolicyError::Entry { source, .. } => source.help(),
            PolicyError::UnknownMode(_) => {
                Some("valid modes are 'allow' and 'prohibit'".to_string())
            }
            PolicyError::Json(_) => None,
        }
    }
}

/// Errors from reading or parsing a single workflow file.
///
/// These are scoped to one file; callers scanning a batch record the failure
/// and keep going.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("failed to read workflow {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML parse error in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("non-string value under 'uses' key in {path}")]
    UsesValue { path: PathBuf },

    #[error("invalid action reference in {path}: {source}")]
    Ref {
        path: PathBuf,
        source: ParseRefError,
    },
}
