//! Get subcommand for config-merge CLI
//!
//! Loads the given files in order and prints the value at each dot path.

use crate::config::ConfigStore;
use crate::format::{OutputFormat, format_value};
use anyhow::Result;
use clap::Args;
use std::io::Write;

/// Arguments for the get subcommand
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Config file to load; repeat to layer overrides (later files win)
    #[arg(short, long = "file", value_name = "FILE", required = true)]
    pub files: Vec<String>,

    /// Output format: text (default), json, yaml, or toml
    #[arg(long, default_value = "text", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Dot-separated paths to look up, e.g. database.host
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<String>,
}

/// Print each requested path to `out`; unresolved paths are reported to `err`.
///
/// Returns the number of paths that did not resolve.
pub fn run_get(
    args: &GetArgs,
    store: &ConfigStore,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<usize> {
    let mut missing = 0;
    for path in &args.paths {
        match store.lookup(path) {
            Ok(value) => writeln!(out, "{}", format_value(&value, args.format)?)?,
            Err(e) => {
                writeln!(err, "{}", e)?;
                missing += 1;
            }
        }
    }
    Ok(missing)
}
