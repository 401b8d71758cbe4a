//! Per-asset results of processing a session.

use std::fmt;
use std::path::PathBuf;

use crate::error::AssetError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Video,
    Pdf,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetKind::Video => write!(f, "video"),
            AssetKind::Pdf => write!(f, "pdf"),
        }
    }
}

#[derive(Debug)]
pub enum OutcomeStatus {
    /// Bytes copied directly to `path`.
    Downloaded { path: PathBuf, bytes: u64 },
    /// Handed to the external stream downloader, which wrote `path`.
    Streamed { path: PathBuf },
    /// Destination existed; nothing transferred.
    AlreadyPresent { path: PathBuf },
    /// The listing page had no match for this asset.
    NotFound,
    Failed(AssetError),
}

impl OutcomeStatus {
    pub fn is_failure(&self) -> bool {
        matches!(self, OutcomeStatus::Failed(_))
    }
}

#[derive(Debug)]
pub struct DownloadOutcome {
    pub session_id: String,
    pub asset: AssetKind,
    pub status: OutcomeStatus,
}

impl fmt::Display for DownloadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: ", self.session_id, self.asset)?;
        match &self.status {
            OutcomeStatus::Downloaded { path, bytes } => {
                write!(f, "downloaded {} ({} bytes)", path.display(), bytes)
            }
            OutcomeStatus::Streamed { path } => write!(f, "streamed to {}", path.display()),
            OutcomeStatus::AlreadyPresent { path } => {
                write!(f, "already present at {}", path.display())
            }
            OutcomeStatus::NotFound => write!(f, "not found"),
            OutcomeStatus::Failed(e) => write!(f, "failed: {e}"),
        }
    }
}
