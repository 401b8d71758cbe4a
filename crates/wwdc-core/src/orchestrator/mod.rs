//! Download decisions for a resolved session.
//!
//! PDF first, then video. Every transfer is preceded by an existence check on
//! its destination, so re-running over the same session is a cheap no-op.
//! Failures are recorded per asset and never stop the remaining assets.

mod outcome;

pub use outcome::{AssetKind, DownloadOutcome, OutcomeStatus};

use std::path::{Path, PathBuf};

use crate::download::{DirectDownloader, StreamDownloader};
use crate::error::AssetError;
use crate::policy::DownloadPolicy;
use crate::resolver::{extension_from_url, ResolvedSession, VideoSource};

/// A planned transfer. `already_exists` is sampled right before transferring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTarget {
    pub source_url: String,
    pub destination_path: PathBuf,
    pub already_exists: bool,
}

impl DownloadTarget {
    pub fn new(source_url: &str, destination_path: PathBuf) -> Self {
        let already_exists = destination_path.exists();
        Self {
            source_url: source_url.to_string(),
            destination_path,
            already_exists,
        }
    }
}

/// Routes assets to the direct or the external stream downloader.
pub struct DownloadOrchestrator<'a> {
    direct: &'a dyn DirectDownloader,
    stream: &'a dyn StreamDownloader,
}

impl<'a> DownloadOrchestrator<'a> {
    pub fn new(direct: &'a dyn DirectDownloader, stream: &'a dyn StreamDownloader) -> Self {
        Self { direct, stream }
    }

    /// Fetches what `policy` asks for from `resolved` into `<dest>/WWDC-<year>/`.
    pub fn process(&self, resolved: ResolvedSession, policy: &DownloadPolicy) -> Vec<DownloadOutcome> {
        let dir = policy.year_directory(&resolved.year);
        let stem = resolved.file_stem();
        let mut outcomes = Vec::with_capacity(2);

        if policy.wants_pdf {
            let status = match &resolved.pdf_url {
                Some(url) => {
                    let dest = dir.join(format!("{stem}.{}", ext_or(url, "pdf")));
                    self.transfer_direct(&dir, DownloadTarget::new(url, dest))
                }
                None => {
                    tracing::info!(session = %resolved.session_id, "PDF not found");
                    OutcomeStatus::NotFound
                }
            };
            outcomes.push(outcome(&resolved, AssetKind::Pdf, status));
        }

        if !policy.pdf_only {
            let status = match &resolved.video {
                VideoSource::DirectFile(url) if policy.transport_override => {
                    self.delegate_stream(url, &dir, &stem)
                }
                VideoSource::DirectFile(url) => {
                    let dest = dir.join(format!("{stem}.{}", ext_or(url, "mp4")));
                    self.transfer_direct(&dir, DownloadTarget::new(url, dest))
                }
                VideoSource::SegmentedStream(url) => self.delegate_stream(url, &dir, &stem),
                VideoSource::None => {
                    tracing::info!(session = %resolved.session_id, "video not found");
                    OutcomeStatus::NotFound
                }
            };
            outcomes.push(outcome(&resolved, AssetKind::Video, status));
        }

        outcomes
    }

    fn transfer_direct(&self, dir: &Path, target: DownloadTarget) -> OutcomeStatus {
        if target.already_exists {
            tracing::info!(path = %target.destination_path.display(), "already present, skipping");
            return OutcomeStatus::AlreadyPresent {
                path: target.destination_path,
            };
        }
        if let Err(e) = ensure_dir(dir) {
            return failed(e);
        }
        match self.direct.download(&target.source_url, &target.destination_path) {
            Ok(bytes) => OutcomeStatus::Downloaded {
                path: target.destination_path,
                bytes,
            },
            Err(e) => failed(e),
        }
    }

    fn delegate_stream(&self, url: &str, dir: &Path, stem: &str) -> OutcomeStatus {
        let target = DownloadTarget::new(url, self.stream.output_path(dir, stem));
        if target.already_exists {
            tracing::info!(path = %target.destination_path.display(), "already present, skipping");
            return OutcomeStatus::AlreadyPresent {
                path: target.destination_path,
            };
        }
        if let Err(e) = ensure_dir(dir) {
            return failed(e);
        }
        match self.stream.download_stream(url, dir, stem) {
            Ok(path) => OutcomeStatus::Streamed { path },
            Err(e) => failed(e),
        }
    }
}

/// Creates the year directory on first use.
fn ensure_dir(dir: &Path) -> Result<(), AssetError> {
    if dir.is_dir() {
        return Ok(());
    }
    std::fs::create_dir_all(dir).map_err(|source| AssetError::WriteFailure {
        path: dir.to_path_buf(),
        source,
    })?;
    tracing::debug!(dir = %dir.display(), "created destination directory");
    Ok(())
}

fn failed(e: AssetError) -> OutcomeStatus {
    tracing::warn!("{}", e);
    OutcomeStatus::Failed(e)
}

fn ext_or(url: &str, fallback: &str) -> String {
    extension_from_url(url).unwrap_or_else(|| fallback.to_string())
}

fn outcome(resolved: &ResolvedSession, asset: AssetKind, status: OutcomeStatus) -> DownloadOutcome {
    DownloadOutcome {
        session_id: resolved.session_id.clone(),
        asset,
        status,
    }
}

#[cfg(test)]
mod tests;
