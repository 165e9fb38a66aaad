//! Layered configuration loading.
//!
//! Loads JSON, YAML and TOML files (or any format with a custom decoder),
//! deep-merges them in load order, and looks up values by dot path.

pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;

pub use config::{ConfigStore, ConfigTree};
pub use error::{Error, ErrorCode, Result};
