//! config-merge
//!
//! Loads configuration files in order, merges them, and prints lookups or
//! the merged tree.

use anyhow::Result;
use clap::Parser;
use config_merge::cli::dump::run_dump;
use config_merge::cli::get::run_get;
use config_merge::cli::{Cli, Command, load_files};
use config_merge::config::{ConfigStore, DirSource};
use config_merge::logging::{LogTarget, init, level_for};
use std::process::ExitCode;
use tracing::{debug, warn};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    init(&LogTarget::parse(&cli.log), level_for(cli.verbose))?;

    let store = ConfigStore::new(DirSource::new(&cli.dir));
    debug!(source = %store.source(), "config store ready");

    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    let mut out = stdout.lock();
    let mut err = stderr.lock();

    let files = match &cli.command {
        Command::Get(args) => &args.files,
        Command::Dump(args) => &args.files,
    };
    let failed_loads = load_files(&store, files, cli.strict, &mut err)?;
    if failed_loads > 0 {
        warn!(failed = failed_loads, total = files.len(), "some config files were not loaded");
    }

    let missing = match &cli.command {
        Command::Get(args) => run_get(args, &store, &mut out, &mut err)?,
        Command::Dump(args) => {
            run_dump(args, &store, &mut out)?;
            0
        }
    };

    if failed_loads > 0 || missing > 0 {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
