//! Dump subcommand for config-merge CLI
//!
//! Loads the given files in order and prints the merged tree.

use crate::config::ConfigStore;
use crate::format::{OutputFormat, format_tree};
use anyhow::Result;
use clap::Args;
use std::io::Write;

/// Arguments for the dump subcommand
#[derive(Args, Debug)]
pub struct DumpArgs {
    /// Config file to load; repeat to layer overrides (later files win)
    #[arg(short, long = "file", value_name = "FILE", required = true)]
    pub files: Vec<String>,

    /// Output format: json (default), yaml, or toml
    #[arg(long, default_value = "json", value_name = "FORMAT")]
    pub format: OutputFormat,
}

/// Print the merged tree held by `store`.
pub fn run_dump(args: &DumpArgs, store: &ConfigStore, out: &mut dyn Write) -> Result<()> {
    let tree = store.snapshot();
    writeln!(out, "{}", format_tree(&tree, args.format)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Format, MemorySource};

    #[test]
    fn test_run_dump_yaml() {
        let store = ConfigStore::new(
            MemorySource::new()
                .with_file("a.json", r#"{"name": "api", "limits": {"rps": 10, "burst": 20}}"#)
                .with_file("b.toml", "[limits]\nrps = 50\n"),
        );
        store.load("a.json", &Format::Json).unwrap();
        store.load("b.toml", &Format::Toml).unwrap();

        let mut out = Vec::new();
        let args = DumpArgs {
            files: vec!["a.json".to_string(), "b.toml".to_string()],
            format: OutputFormat::Yaml,
        };
        run_dump(&args, &store, &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "limits:\n  burst: 20\n  rps: 50\nname: api\n"
        );
    }

    #[test]
    fn test_run_dump_toml_names_null_key() {
        let store = ConfigStore::new(
            MemorySource::new()
                .with_file("a.json", r#"{"database": {"host": "mysql", "password": "x"}}"#)
                .with_file("b.yaml", "database:\n  password: null\n"),
        );
        store.load("a.json", &Format::Json).unwrap();
        store.load("b.yaml", &Format::Yaml).unwrap();

        let mut out = Vec::new();
        let args = DumpArgs {
            files: vec!["a.json".to_string(), "b.yaml".to_string()],
            format: OutputFormat::Toml,
        };
        let err = run_dump(&args, &store, &mut out).unwrap_err();

        assert!(err.to_string().contains("'database.password'"));
        assert!(out.is_empty());
    }
}
