//! Single-stream HTTP GET of a media file or PDF to disk.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use super::temp_path;
use crate::error::{AssetError, FetchError};
use crate::fetch::{self, FetchOptions};

/// Copies the bytes at a URL to a destination path.
pub trait DirectDownloader {
    /// Returns the number of bytes written. `dest` only appears once complete.
    fn download(&self, url: &str, dest: &Path) -> Result<u64, AssetError>;
}

/// libcurl-backed direct downloader writing through a `.part` file.
#[derive(Debug, Clone)]
pub struct CurlDownloader {
    opts: FetchOptions,
}

impl CurlDownloader {
    pub fn new(opts: FetchOptions) -> Self {
        Self { opts }
    }
}

impl Default for CurlDownloader {
    fn default() -> Self {
        Self::new(FetchOptions {
            timeout: None,
            ..FetchOptions::default()
        })
    }
}

impl DirectDownloader for CurlDownloader {
    fn download(&self, url: &str, dest: &Path) -> Result<u64, AssetError> {
        let part = temp_path(dest);
        let mut file = File::create(&part).map_err(|source| AssetError::WriteFailure {
            path: part.clone(),
            source,
        })?;

        let result = transfer_into(url, &mut file, &self.opts);
        let written = match result {
            Ok(n) => n,
            Err(e) => {
                drop(file);
                let _ = std::fs::remove_file(&part);
                return Err(e.into_asset_error(url, &part));
            }
        };

        file.sync_all().map_err(|source| AssetError::WriteFailure {
            path: part.clone(),
            source,
        })?;
        drop(file);
        std::fs::rename(&part, dest).map_err(|source| AssetError::WriteFailure {
            path: dest.to_path_buf(),
            source,
        })?;
        tracing::info!(url, path = %dest.display(), bytes = written, "downloaded");
        Ok(written)
    }
}

enum TransferError {
    Fetch(FetchError),
    Write(std::io::Error),
}

impl TransferError {
    fn into_asset_error(self, url: &str, part: &Path) -> AssetError {
        match self {
            TransferError::Fetch(e) => AssetError::TransferFailed {
                url: url.to_string(),
                reason: e.to_string(),
            },
            TransferError::Write(source) => AssetError::WriteFailure {
                path: part.to_path_buf(),
                source,
            },
        }
    }
}

fn transfer_into(url: &str, file: &mut File, opts: &FetchOptions) -> Result<u64, TransferError> {
    let mut easy = fetch::prepare_easy(url, opts).map_err(TransferError::Fetch)?;
    // Stalled transfers abort; there is no overall timeout for media.
    easy.low_speed_limit(1024).map_err(|e| curl_failure(url, e))?;
    easy.low_speed_time(Duration::from_secs(60))
        .map_err(|e| curl_failure(url, e))?;

    let mut written: u64 = 0;
    let mut write_err: Option<std::io::Error> = None;
    let performed = {
        let mut transfer = easy.transfer();
        transfer
            .write_function(|data| match file.write_all(data) {
                Ok(()) => {
                    written += data.len() as u64;
                    Ok(data.len())
                }
                Err(e) => {
                    tracing::warn!("direct download write failed: {}", e);
                    write_err = Some(e);
                    Ok(0) // abort transfer
                }
            })
            .map_err(|e| curl_failure(url, e))?;
        transfer.perform()
    };

    if let Some(e) = write_err {
        return Err(TransferError::Write(e));
    }
    performed.map_err(|e| curl_failure(url, e))?;
    fetch::check_status(&mut easy, url).map_err(TransferError::Fetch)?;
    Ok(written)
}

fn curl_failure(url: &str, source: curl::Error) -> TransferError {
    TransferError::Fetch(FetchError::Curl {
        url: url.to_string(),
        source,
    })
}
