//! Fetch flow error type and its exit-code mapping.

use crate::config::ConfigError;
use crate::downloader::DownloadError;

/// Any fatal failure of a fetch run.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("downloading model dataset failed")]
    Download(#[from] DownloadError),
    /// External command ran but exited non-zero (or was killed: `code` is `None`).
    #[error("`{command}` failed with {}", describe_code(.code))]
    CommandFailed { command: String, code: Option<i32> },
    /// External command could not be started at all.
    #[error("could not run `{command}`")]
    CommandSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("exit status {}", c),
        None => "a signal".to_string(),
    }
}

impl FetchError {
    /// Process exit status for this error. Failed external commands pass
    /// their own status through; everything else exits 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            FetchError::CommandFailed {
                code: Some(c), ..
            } if *c != 0 => *c,
            _ => 1,
        }
    }

    pub fn is_config(&self) -> bool {
        matches!(self, FetchError::Config(_))
    }
}
