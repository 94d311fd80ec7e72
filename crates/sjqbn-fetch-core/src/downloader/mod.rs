//! Single-stream HTTP GET to a local file.
//!
//! Writes the response body sequentially into a create/truncate file,
//! at most [`CHUNK_SIZE`] bytes per write. The file is only opened once the
//! server has answered with a 2xx status, so a failed GET leaves any
//! earlier tarball alone. No retries, no resume, no timeouts beyond curl's
//! defaults; a transfer that dies mid-body leaves its partial file behind.

mod error;

pub use error::DownloadError;

use std::cell::Cell;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::str;

/// Receive buffer size handed to curl; each write callback gets at most this much.
pub const CHUNK_SIZE: usize = 16 * 1024;

/// Downloads `url` into `dest` and returns the number of bytes written.
/// Failures are logged here before being returned.
pub fn download_to_file(url: &str, dest: &Path) -> Result<u64, DownloadError> {
    match download_inner(url, dest) {
        Ok(written) => {
            tracing::info!("downloaded {} bytes from {} to {}", written, url, dest.display());
            Ok(written)
        }
        Err(e) => {
            tracing::error!("failed retrieving and saving model datafiles from {}: {:?}", url, e);
            Err(e)
        }
    }
}

/// Returns whether HTTP status codes apply to this URL's scheme.
fn check_scheme(url: &str) -> Result<bool, DownloadError> {
    let parsed = url::Url::parse(url).map_err(|e| DownloadError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(true),
        "file" => Ok(false),
        other => Err(DownloadError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme `{}`", other),
        }),
    }
}

/// Status code from an `HTTP/x.y NNN reason` header line.
fn parse_status_line(line: &[u8]) -> Option<u32> {
    let line = str::from_utf8(line).ok()?;
    if !line.starts_with("HTTP/") {
        return None;
    }
    line.split_whitespace().nth(1)?.parse().ok()
}

fn is_success(status: u32) -> bool {
    (200..300).contains(&status)
}

fn create(dest: &Path) -> Result<File, DownloadError> {
    File::create(dest).map_err(|source| DownloadError::Create {
        path: dest.to_path_buf(),
        source,
    })
}

fn download_inner(url: &str, dest: &Path) -> Result<u64, DownloadError> {
    let is_http = check_scheme(url)?;

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.get(true)?;
    easy.follow_location(true)?;
    easy.buffer_size(CHUNK_SIZE)?;

    // Last status line seen; redirects produce several.
    let status = Cell::new(0u32);
    let mut file: Option<File> = None;
    let mut written: u64 = 0;
    let mut write_err: Option<DownloadError> = None;
    let performed = {
        let mut transfer = easy.transfer();
        transfer.header_function(|line| {
            if let Some(code) = parse_status_line(line) {
                status.set(code);
            }
            true
        })?;
        transfer.write_function(|data| {
            if is_http && !is_success(status.get()) {
                // Error page body; the status check below reports it.
                return Ok(data.len());
            }
            if file.is_none() {
                match create(dest) {
                    Ok(f) => file = Some(f),
                    Err(e) => {
                        write_err = Some(e);
                        return Ok(0); // abort transfer
                    }
                }
            }
            let Some(f) = file.as_mut() else {
                return Ok(0);
            };
            match f.write_all(data) {
                Ok(()) => {
                    written += data.len() as u64;
                    Ok(data.len())
                }
                Err(source) => {
                    write_err = Some(DownloadError::Write {
                        path: dest.to_path_buf(),
                        source,
                    });
                    Ok(0) // abort transfer
                }
            }
        })?;
        transfer.perform()
    };

    if let Some(e) = write_err {
        return Err(e);
    }
    performed?;

    if is_http {
        let status = easy.response_code()?;
        if !is_success(status) {
            return Err(DownloadError::Http {
                url: url.to_string(),
                status,
            });
        }
    }

    // Empty body: still leave an (empty) file behind, as a plain copy would.
    let mut file = match file {
        Some(f) => f,
        None => create(dest)?,
    };
    file.flush().map_err(|source| DownloadError::Write {
        path: dest.to_path_buf(),
        source,
    })?;
    Ok(written)
}
