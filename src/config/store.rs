//! Thread-safe merged configuration store.
//!
//! The merged tree lives behind an [`ArcSwap`]: every lookup works against
//! one published snapshot, and every load builds the next tree off to the
//! side before swapping it in. Loads are serialized by a writer mutex so two
//! concurrent loads can never drop each other's keys; readers never wait on
//! that mutex.

use super::format::{Decoder, Format};
use super::merge::merge_tree;
use super::path::{PathError, resolve};
use super::source::SourceReader;
use super::ConfigTree;
use crate::error::{Error, Result};
use arc_swap::ArcSwap;
use serde_json::Value;
use std::io::Write;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// Configuration assembled from one or more sources.
pub struct ConfigStore {
    reader: Box<dyn SourceReader>,
    tree: ArcSwap<ConfigTree>,
    write_lock: Mutex<()>,
}

impl ConfigStore {
    /// Create an empty store that reads sources through `reader`.
    pub fn new(reader: impl SourceReader + 'static) -> Self {
        Self {
            reader: Box::new(reader),
            tree: ArcSwap::from_pointee(ConfigTree::new()),
            write_lock: Mutex::new(()),
        }
    }

    /// Read `name`, decode it and deep-merge it over the current tree.
    ///
    /// Values from this source win over values already loaded, at every
    /// nesting level. On error the tree is left untouched.
    pub fn load(&self, name: &str, decoder: &dyn Decoder) -> Result<()> {
        let bytes = self
            .reader
            .read(name)
            .map_err(|source| Error::SourceUnavailable {
                name: name.to_string(),
                source,
            })?;

        let candidate = decoder
            .decode(&bytes)
            .map_err(|source| Error::DecodeFailed {
                name: name.to_string(),
                source,
            })?;
        let keys = candidate.len();

        // Merges run on a copy, so the published tree is never partial even if
        // the lock is poisoned.
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut next = ConfigTree::clone(&self.tree.load());
        merge_tree(&mut next, candidate);
        self.tree.store(Arc::new(next));

        debug!(source = %name, keys, "merged config source");
        Ok(())
    }

    /// Load `name` with the built-in decoder picked from its extension.
    pub fn load_format(&self, name: &str) -> Result<()> {
        let format = Format::from_name(name).ok_or_else(|| Error::UnknownFormat {
            name: name.to_string(),
        })?;
        self.load(name, &format)
    }

    /// Load `name`, writing the error message to `sink` instead of returning it.
    ///
    /// Returns whether the load succeeded. Prefer [`ConfigStore::load`] when
    /// the caller needs to act on the failure. If the sink itself fails, the
    /// load error is logged instead.
    pub fn load_or_report(&self, name: &str, decoder: &dyn Decoder, sink: &mut dyn Write) -> bool {
        match self.load(name, decoder) {
            Ok(()) => true,
            Err(err) => {
                if let Err(write_err) = writeln!(sink, "{}", err) {
                    warn!(
                        source = %name,
                        error = %err,
                        sink_error = %write_err,
                        "could not report config load failure"
                    );
                }
                false
            }
        }
    }

    /// Value at the dot-separated `path`, or `None` if it does not resolve.
    ///
    /// Unlike a "return empty string when missing" API, a stored `""` comes
    /// back as `Some(Value::String(""))` and a missing key as `None`. Use
    /// [`ConfigStore::lookup`] to find out why a path did not resolve.
    pub fn get(&self, path: &str) -> Option<Value> {
        self.lookup(path).ok()
    }

    /// Value at the dot-separated `path`, or the reason it does not resolve.
    pub fn lookup(&self, path: &str) -> std::result::Result<Value, PathError> {
        let snapshot = self.tree.load();
        resolve(&snapshot, path).cloned()
    }

    /// The currently published tree.
    ///
    /// Later loads never modify a snapshot that has already been handed out.
    pub fn snapshot(&self) -> Arc<ConfigTree> {
        self.tree.load_full()
    }

    /// Owned copy of the current tree.
    pub fn tree(&self) -> ConfigTree {
        ConfigTree::clone(&self.tree.load())
    }

    pub fn is_empty(&self) -> bool {
        self.tree.load().is_empty()
    }

    /// Description of the bound source reader.
    pub fn source(&self) -> String {
        self.reader.describe()
    }
}

impl std::fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigStore")
            .field("reader", &self.reader.describe())
            .field("keys", &self.tree.load().len())
            .finish()
    }
}
