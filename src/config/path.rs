//! Dot-path traversal over a configuration tree.

use super::ConfigTree;
use serde_json::Value;
use thiserror::Error;

/// Why a dot path did not resolve to a value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// `segment` is not a key of the mapping reached so far.
    #[error("{path}: key '{segment}' not found")]
    NotFound { path: String, segment: String },
    /// Traversal needed to descend through `segment`, but its value is not a mapping.
    #[error("{path}: '{segment}' is not a table")]
    NotATable { path: String, segment: String },
}

impl PathError {
    /// The full path that was looked up.
    pub fn path(&self) -> &str {
        match self {
            PathError::NotFound { path, .. } | PathError::NotATable { path, .. } => path,
        }
    }
}

/// Resolve `path` against `tree`, borrowing the value it points at.
///
/// The path is split on the first `.`; the head must be a key of the
/// current mapping and, if anything remains, its value must itself be a
/// mapping to continue into. Segments are matched literally, so `"a..b"`
/// looks up the empty-string key under `a`.
pub fn resolve<'a>(tree: &'a ConfigTree, path: &str) -> Result<&'a Value, PathError> {
    let mut current = tree;
    let mut remaining = path;

    loop {
        let (head, rest) = match remaining.split_once('.') {
            Some((head, rest)) => (head, Some(rest)),
            None => (remaining, None),
        };

        let found = current.get(head).ok_or_else(|| PathError::NotFound {
            path: path.to_string(),
            segment: head.to_string(),
        })?;

        let Some(rest) = rest else {
            return Ok(found);
        };

        current = found.as_object().ok_or_else(|| PathError::NotATable {
            path: path.to_string(),
            segment: head.to_string(),
        })?;
        remaining = rest;
    }
}
