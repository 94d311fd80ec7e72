//! Logging init for a one-shot install step.
//!
//! Logs go to stderr next to the progress lines by default. `-v` raises the
//! level; `--log-file` sends them to the XDG state dir instead, for runs
//! driven by an installer that discards the terminal. `RUST_LOG` overrides
//! the level either way.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const APP_NAME: &str = "sjqbn-fetch";

/// Default filter for a `-v` count.
pub fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info,sjqbn_fetch_core=debug",
        _ => "debug",
    }
}

fn env_filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)))
}

/// Path of the log file: `$XDG_STATE_HOME/sjqbn-fetch/sjqbn-fetch.log`.
pub fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix(APP_NAME)?;
    Ok(xdg_dirs
        .get_state_home()
        .join(APP_NAME)
        .join(format!("{}.log", APP_NAME)))
}

/// Install the global subscriber. With `to_file`, an unusable state dir is
/// an error and nothing is installed, so the caller can retry on stderr.
pub fn init_logging(verbosity: u8, to_file: bool) -> Result<()> {
    if !to_file {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter(verbosity))
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
            .try_init();
        return Ok(());
    }

    let path = log_file_path()?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("cannot create {}", dir.display()))?;
    }
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("cannot open {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbosity))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    tracing::info!("{} logging to {}", APP_NAME, path.display());
    Ok(())
}
