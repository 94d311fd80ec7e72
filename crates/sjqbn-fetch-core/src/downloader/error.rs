//! Download error type.

use std::path::PathBuf;

/// Why a download failed. Nothing here is retried; the caller aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// URL did not parse or uses a scheme we do not fetch.
    #[error("invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    /// Destination file could not be created/truncated.
    #[error("cannot create {}", .path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Curl reported an error (connection refused, DNS, reset, ...).
    #[error("transfer failed")]
    Curl(#[from] curl::Error),
    /// HTTP response had a non-2xx status.
    #[error("GET {url} returned HTTP {status}")]
    Http { url: String, status: u32 },
    /// Writing a received chunk to disk failed (e.g. disk full).
    #[error("write to {} failed", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
