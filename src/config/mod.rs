//! Layered configuration.
//!
//! Sources are read through a [`SourceReader`], decoded by a [`Decoder`] and
//! deep-merged into a [`ConfigStore`] in load order:
//!
//! 1. **Read** - the bound reader resolves the source name to bytes
//! 2. **Decode** - JSON, YAML, TOML or any caller-supplied decoder
//! 3. **Merge** - later sources override earlier ones field by field
//!
//! ## Merge Strategy
//! - Mappings: merged recursively, sibling keys are preserved
//! - Everything else (scalars, sequences, null): replaced wholesale
//!
//! Values are looked up by dot-separated path (`database.host`).

pub mod format;
pub mod merge;
pub mod path;
pub mod source;
pub mod store;

pub use format::{Decoder, Format};
pub use merge::{deep_merge, merge_all, merge_tree};
pub use path::{PathError, resolve};
pub use source::{DirSource, MemorySource, SourceReader};
pub use store::ConfigStore;

/// Mapping from string keys to dynamically-typed values.
pub type ConfigTree = serde_json::Map<String, serde_json::Value>;
