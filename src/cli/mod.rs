//! CLI command definitions for config-merge
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

pub mod dump;
pub mod get;

use crate::config::{ConfigStore, Format};
use crate::error::Error;
use anyhow::Result;
use clap::{Parser, Subcommand};
use dump::DumpArgs;
use get::GetArgs;
use std::io::Write;
use std::path::PathBuf;

/// Merge layered configuration files and query the result
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory that config file names are resolved against
    #[arg(short = 'C', long, default_value = ".", global = true)]
    pub dir: PathBuf,

    /// Stop at the first file that fails to load
    #[arg(long, global = true)]
    pub strict: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load files in order and print the value at each path
    Get(GetArgs),

    /// Load files in order and print the merged tree
    Dump(DumpArgs),
}

/// Load `files` into `store` in order, picking each decoder from the extension.
///
/// Without `strict`, failures are written to `err` and loading continues with
/// the next file. Returns the number of files that failed.
pub fn load_files(
    store: &ConfigStore,
    files: &[String],
    strict: bool,
    err: &mut dyn Write,
) -> Result<usize> {
    let mut failed = 0;
    for name in files {
        if strict {
            store.load_format(name)?;
            continue;
        }
        let loaded = match Format::from_name(name) {
            Some(format) => store.load_or_report(name, &format, err),
            None => {
                writeln!(err, "{}", Error::UnknownFormat { name: name.clone() })?;
                false
            }
        };
        if !loaded {
            failed += 1;
        }
    }
    Ok(failed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemorySource;
    use crate::format::OutputFormat;
    use serde_json::json;

    fn store() -> ConfigStore {
        ConfigStore::new(
            MemorySource::new()
                .with_file("base.json", r#"{"environment": "production"}"#)
                .with_file("local.yaml", "environment: development")
                .with_file("broken.toml", "= nope"),
        )
    }

    fn names(files: &[&str]) -> Vec<String> {
        files.iter().map(|f| f.to_string()).collect()
    }

    #[test]
    fn test_load_files_reports_and_continues() {
        let store = store();
        let mut err = Vec::new();

        let failed = load_files(
            &store,
            &names(&["base.json", "broken.toml", "missing.json", "notes.txt", "local.yaml"]),
            false,
            &mut err,
        )
        .unwrap();

        assert_eq!(failed, 3);
        assert_eq!(store.get("environment"), Some(json!("development")));
        let err = String::from_utf8(err).unwrap();
        assert_eq!(err.matches("config source '").count(), 3);
        assert!(err.contains("broken.toml"));
        assert!(err.contains("missing.json"));
        assert!(err.contains("notes.txt"));
    }

    #[test]
    fn test_load_files_strict_stops() {
        let store = store();
        let mut err = Vec::new();

        let result = load_files(
            &store,
            &names(&["base.json", "missing.json", "local.yaml"]),
            true,
            &mut err,
        );

        let error = result.unwrap_err();
        let error = error.downcast_ref::<Error>().unwrap();
        assert_eq!(error.source_name(), "missing.json");
        assert_eq!(store.get("environment"), Some(json!("production")));
        assert!(err.is_empty());
    }

    #[test]
    fn test_parse_get() {
        let cli = Cli::try_parse_from([
            "config-merge",
            "get",
            "-f",
            "fixtures/config.json",
            "-f",
            "fixtures/config.local.yaml",
            "environment",
            "database.host",
        ])
        .unwrap();

        assert_eq!(cli.dir, PathBuf::from("."));
        assert_eq!(cli.log, "2");
        let Command::Get(args) = cli.command else {
            panic!("expected get");
        };
        assert_eq!(
            args.files,
            vec!["fixtures/config.json", "fixtures/config.local.yaml"]
        );
        assert_eq!(args.paths, vec!["environment", "database.host"]);
        assert_eq!(args.format, OutputFormat::Text);
    }

    #[test]
    fn test_parse_dump_with_globals() {
        let cli = Cli::try_parse_from([
            "config-merge",
            "dump",
            "--file",
            "base.toml",
            "--format",
            "yaml",
            "--strict",
            "-C",
            "/etc/app",
        ])
        .unwrap();

        assert!(cli.strict);
        assert_eq!(cli.dir, PathBuf::from("/etc/app"));
        let Command::Dump(args) = cli.command else {
            panic!("expected dump");
        };
        assert_eq!(args.files, vec!["base.toml"]);
        assert_eq!(args.format, OutputFormat::Yaml);
    }

    #[test]
    fn test_get_requires_path() {
        assert!(Cli::try_parse_from(["config-merge", "get", "-f", "a.json"]).is_err());
    }

    #[test]
    fn test_invalid_format_rejected() {
        assert!(
            Cli::try_parse_from(["config-merge", "dump", "-f", "a.json", "--format", "xml"])
                .is_err()
        );
    }
}
