//! Parsed `author/name@ref` action references.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseRefError;

/// Matches any value when used as the name or ref of a policy entry.
pub const WILDCARD: &str = "*";

/// The author of repository-local actions (`uses: ./path/to/action`).
const LOCAL_AUTHOR: &str = ".";

/// One `author/name@ref` action reference, lower-cased at parse time.
///
/// An unpinned reference (no `@`) carries the wildcard ref `*`. Serialization
/// spells the ref field `ref`, the shape consumers of the violations output
/// expect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRef {
    pub author: String,
    pub name: String,
    #[serde(rename = "ref")]
    pub git_ref: String,
}

impl ActionRef {
    /// Parse a `uses:` value or policy entry.
    ///
    /// The author is everything before the first `/`; the rest splits on the
    /// first `@` into name and ref. Nested paths keep the whole name, so
    /// `github/codeql-action/init@v3` has the name `codeql-action/init`.
    pub fn parse(input: &str) -> Result<Self, ParseRefError> {
        let lowered = input.trim().to_lowercase();

        let Some((author, rest)) = lowered.split_once('/') else {
            return Err(ParseRefError::MissingSlash(input.to_string()));
        };
        if author.is_empty() {
            return Err(ParseRefError::EmptyAuthor(input.to_string()));
        }

        let (name, git_ref) = match rest.split_once('@') {
            Some((_, "")) => return Err(ParseRefError::EmptyRef(input.to_string())),
            Some((name, git_ref)) => (name, git_ref),
            None => (rest, WILDCARD),
        };

        // `uses: ./` is the repository-root action; local names may be empty.
        if name.is_empty() && author != LOCAL_AUTHOR {
            return Err(ParseRefError::EmptyName(input.to_string()));
        }

        Ok(ActionRef {
            author: author.to_string(),
            name: name.to_string(),
            git_ref: git_ref.to_string(),
        })
    }

    /// Repository-local actions (`./…`) are exempt from policy checks.
    pub fn is_local(&self) -> bool {
        self.author == LOCAL_AUTHOR
    }
}

impl fmt::Display for ActionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}@{}", self.author, self.name, self.git_ref)
    }
}

impl FromStr for ActionRef {
    type Err = ParseRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionRef::parse(s)
    }
}
