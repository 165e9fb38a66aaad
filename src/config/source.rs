//! Sources that resolve a config name to raw bytes.
//!
//! A [`ConfigStore`](super::ConfigStore) is bound to one reader for its
//! whole life. [`DirSource`] reads from a directory on disk; [`MemorySource`]
//! serves names out of an in-memory map and is mostly useful in tests.

use std::collections::HashMap;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Resolves a config name to its raw content.
pub trait SourceReader: Send + Sync {
    /// Read the full content of `name`.
    fn read(&self, name: &str) -> io::Result<Vec<u8>>;

    /// Human-readable description for logging.
    fn describe(&self) -> String;
}

impl<F> SourceReader for F
where
    F: Fn(&str) -> io::Result<Vec<u8>> + Send + Sync,
{
    fn read(&self, name: &str) -> io::Result<Vec<u8>> {
        self(name)
    }

    fn describe(&self) -> String {
        "closure".to_string()
    }
}

/// Reads names as slash-separated paths relative to a root directory.
///
/// Names must stay inside the root: empty names, absolute paths and any
/// `.` or `..` component are rejected with [`io::ErrorKind::InvalidInput`].
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, name: &str) -> io::Result<PathBuf> {
        if !is_valid_name(name) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid source name: {:?}", name),
            ));
        }
        Ok(self.root.join(name))
    }
}

impl SourceReader for DirSource {
    fn read(&self, name: &str) -> io::Result<Vec<u8>> {
        let path = self.resolve(name)?;
        std::fs::read(&path)
            .map_err(|e| io::Error::new(e.kind(), format!("{}: {}", path.display(), e)))
    }

    fn describe(&self) -> String {
        format!("dir:{}", self.root.display())
    }
}

fn is_valid_name(name: &str) -> bool {
    if name.is_empty() || name.starts_with('/') || name.ends_with('/') {
        return false;
    }
    name.split('/').all(|seg| !seg.is_empty() && seg != "." && seg != "..")
        && Path::new(name)
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
}

/// In-memory map of names to content.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: HashMap<String, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, replacing any previous content under the same name.
    pub fn with_file(mut self, name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.files.insert(name.into(), content.into());
        self
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl SourceReader for MemorySource {
    fn read(&self, name: &str) -> io::Result<Vec<u8>> {
        self.files.get(name).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("{}: file does not exist", name))
        })
    }

    fn describe(&self) -> String {
        format!("memory:{} files", self.files.len())
    }
}
