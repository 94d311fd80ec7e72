//! CLI for the SJQBN dataset fetcher.

mod report;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use sjqbn_fetch_core::config::DEFAULT_CONFIG_PATH;
use sjqbn_fetch_core::fetch::{fetch_with_config, FetchError, FetchRequest};
use sjqbn_fetch_core::model::SJQBN;
use sjqbn_fetch_core::process::SystemRunner;
use sjqbn_fetch_core::volume::VOLUME_TOP_DIR_ENV;
use std::path::PathBuf;

/// Fetch the SJQBN model dataset into `./<model_dir>`.
#[derive(Debug, Parser)]
#[command(name = "sjqbn-fetch")]
#[command(about = "Retrieve the SJQBN velocity model dataset", long_about = None)]
pub struct Cli {
    /// Model config file providing `model_data_path` and `model_dir`.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH, value_name = "PATH")]
    pub config: PathBuf,

    /// Shared volume holding a pre-fetched `<model_dir>`; linked instead of downloading.
    #[arg(long, env = VOLUME_TOP_DIR_ENV, value_name = "DIR")]
    pub volume_top_dir: Option<String>,

    /// More log output on stderr; repeat for debug.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Write logs to the XDG state dir instead of stderr.
    #[arg(long)]
    pub log_file: bool,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        let work_dir = std::env::current_dir().context("cannot determine working directory")?;
        let request = FetchRequest {
            work_dir,
            volume_top_dir: self.volume_top_dir.clone(),
        };

        let outcome = fetch_with_config(
            &self.config,
            SJQBN,
            &request,
            &SystemRunner,
            &mut report::print_event,
        )?;
        report::print_outcome(&outcome);
        Ok(())
    }
}

/// Process exit status for a failed run.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<FetchError>()
        .map(FetchError::exit_code)
        .unwrap_or(1)
}

/// Configuration problems are reported on stdout, everything else on stderr.
pub fn is_config_error(err: &anyhow::Error) -> bool {
    err.downcast_ref::<FetchError>()
        .is_some_and(FetchError::is_config)
}
