//! Policy documents and allow/prohibit matching.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::PolicyError;
use crate::reference::{ActionRef, WILDCARD};

/// How the policy list is interpreted.
///
/// Allow mode treats the list as the complete set of permitted actions;
/// prohibit mode treats it as a deny list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyMode {
    Allow,
    Prohibit,
}

impl fmt::Display for PolicyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyMode::Allow => write!(f, "allow"),
            PolicyMode::Prohibit => write!(f, "prohibit"),
        }
    }
}

impl FromStr for PolicyMode {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "allow" => Ok(PolicyMode::Allow),
            "prohibit" => Ok(PolicyMode::Prohibit),
            _ => Err(PolicyError::UnknownMode(s.to_string())),
        }
    }
}

/// Wire shape of the remote policy document.
#[derive(Debug, Deserialize)]
struct PolicyDocument {
    actions: Vec<String>,
}

/// The parsed policy: an ordered list of entries.
#[derive(Debug, Clone, Default)]
pub struct PolicyList {
    pub entries: Vec<ActionRef>,
}

impl PolicyList {
    /// Parse `{"actions": ["author/name@ref", …]}`. Any malformed entry fails
    /// the whole document.
    pub fn from_json(json: &str) -> Result<Self, PolicyError> {
        let doc: PolicyDocument = serde_json::from_str(json)?;
        let mut entries = Vec::with_capacity(doc.actions.len());
        for raw in doc.actions {
            match ActionRef::parse(&raw) {
                Ok(entry) => entries.push(entry),
                Err(source) => return Err(PolicyError::Entry { entry: raw, source }),
            }
        }
        Ok(PolicyList { entries })
    }

    /// First entry covering `action`, in document order.
    pub fn matching_entry(&self, action: &ActionRef) -> Option<&ActionRef> {
        self.entries.iter().find(|entry| covers(entry, action))
    }

    /// Whether `action` violates this policy under `mode`.
    ///
    /// Local actions never violate. In allow mode a violation is an action no
    /// entry covers; in prohibit mode, one that some entry covers.
    pub fn is_violation(&self, mode: PolicyMode, action: &ActionRef) -> bool {
        if action.is_local() {
            return false;
        }
        let matched = self.matching_entry(action).is_some();
        trace!(action = %action, matched, mode = %mode, "policy check");
        match mode {
            PolicyMode::Allow => !matched,
            PolicyMode::Prohibit => matched,
        }
    }
}

/// Whether a policy entry covers an action: equal author, with `*` matching
/// any name or ref.
pub fn covers(entry: &ActionRef, action: &ActionRef) -> bool {
    entry.author == action.author
        && (entry.name == WILDCARD || entry.name == action.name)
        && (entry.git_ref == WILDCARD || entry.git_ref == action.git_ref)
}
