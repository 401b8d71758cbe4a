//! Error taxonomy for page resolution and asset transfer.
//!
//! Failures are scoped: a `ResolveError` belongs to one listing or catalog
//! page, an `AssetError` to one asset of one session. Neither aborts siblings.

use std::path::PathBuf;

/// Failure to retrieve a page over HTTP.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: curl::Error,
    },
    #[error("request to {url} failed: {source}")]
    Curl {
        url: String,
        #[source]
        source: curl::Error,
    },
    #[error("{url} returned HTTP {status}")]
    Http { url: String, status: u32 },
    #[error("{url} returned an empty body")]
    EmptyBody { url: String },
}

/// Failure to resolve a listing page or a catalog index page.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The page could not be fetched (unreachable, non-2xx or empty). Not retried.
    #[error("page unavailable: {url}: {reason}")]
    PageUnavailable { url: String, reason: String },
    /// A pattern template produced an invalid regular expression.
    #[error("invalid extraction pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl ResolveError {
    pub(crate) fn unavailable(url: &str, err: &FetchError) -> Self {
        ResolveError::PageUnavailable {
            url: url.to_string(),
            reason: err.to_string(),
        }
    }
}

/// Failure to transfer a single asset.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    /// The transfer completed its fetch but the bytes could not be persisted.
    #[error("could not write {}: {source}", path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The asset itself could not be fetched.
    #[error("transfer of {url} failed: {reason}")]
    TransferFailed { url: String, reason: String },
    /// The external stream downloader could not be run or exited unsuccessfully.
    #[error("stream download of {url} failed: {reason}")]
    StreamFailed { url: String, reason: String },
}
