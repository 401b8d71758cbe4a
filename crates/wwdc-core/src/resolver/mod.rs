//! Session resolution: listing page → title, video and PDF URLs.
//!
//! Extraction is first-match regex over the raw page text using the year's
//! `PatternSet`. Missing assets are not errors; only an unreachable listing
//! page is.

mod filename;
mod title;

pub(crate) use filename::extension_from_url;

use crate::error::ResolveError;
use crate::fetch::PageFetcher;
use crate::patterns::{self, first_match, PatternKind, PatternSet};
use crate::policy::{DownloadPolicy, Quality};
use crate::site::Site;

/// How the selected video reaches disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoTransport {
    DirectFile,
    SegmentedStream,
    None,
}

/// The selected video, if any. The URL kind is tied to its transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoSource {
    /// Direct media file (mp4/mov), copied byte for byte.
    DirectFile(String),
    /// HLS manifest; only for a streaming-capable downloader.
    SegmentedStream(String),
    None,
}

/// Assets found for one session. Consumed once by the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSession {
    pub year: String,
    pub session_id: String,
    pub title: Option<String>,
    pub video: VideoSource,
    pub pdf_url: Option<String>,
}

impl ResolvedSession {
    pub fn video_transport(&self) -> VideoTransport {
        match self.video {
            VideoSource::DirectFile(_) => VideoTransport::DirectFile,
            VideoSource::SegmentedStream(_) => VideoTransport::SegmentedStream,
            VideoSource::None => VideoTransport::None,
        }
    }

    pub fn video_url(&self) -> Option<&str> {
        match &self.video {
            VideoSource::DirectFile(url) | VideoSource::SegmentedStream(url) => Some(url),
            VideoSource::None => None,
        }
    }

    /// Destination file stem: `<session>-<title>` or `<session>`.
    pub fn file_stem(&self) -> String {
        filename::file_stem(&self.session_id, self.title.as_deref())
    }

    /// True when neither a video nor a PDF was found.
    pub fn is_empty(&self) -> bool {
        self.video == VideoSource::None && self.pdf_url.is_none()
    }
}

/// Resolves sessions of the catalog at `site` through `fetcher`.
pub struct SessionResolver<'a> {
    fetcher: &'a dyn PageFetcher,
    site: &'a Site,
}

impl<'a> SessionResolver<'a> {
    pub fn new(fetcher: &'a dyn PageFetcher, site: &'a Site) -> Self {
        Self { fetcher, site }
    }

    /// Fetches the listing page for (`year`, `session_id`) and extracts assets
    /// according to `policy`. Fails only with `PageUnavailable` (or a broken pattern).
    pub fn resolve(
        &self,
        year: &str,
        session_id: &str,
        policy: &DownloadPolicy,
    ) -> Result<ResolvedSession, ResolveError> {
        let url = self.site.listing_url(year, session_id);
        let page = self
            .fetcher
            .fetch_text(&url)
            .map_err(|e| ResolveError::unavailable(&url, &e))?;
        resolve_page(year, session_id, &page, policy)
    }
}

/// Applies the year's rules to an already fetched listing page.
pub fn resolve_page(
    year: &str,
    session_id: &str,
    page: &str,
    policy: &DownloadPolicy,
) -> Result<ResolvedSession, ResolveError> {
    let title = title::extract_title(page)?;
    let rules = patterns::rules_for(year);
    tracing::debug!(year, session_id, bucket = rules.label, "applying pattern set");

    let pdf_url = if policy.wants_pdf {
        let found = find(rules, PatternKind::Pdf, year, session_id, page)?;
        if found.is_none() {
            tracing::info!(year, session_id, "no PDF on listing page");
        }
        found
    } else {
        None
    };

    let video = if policy.pdf_only {
        VideoSource::None
    } else {
        select_video(rules, year, session_id, page, policy.quality)?
    };

    Ok(ResolvedSession {
        year: year.to_string(),
        session_id: session_id.to_string(),
        title,
        video,
        pdf_url,
    })
}

/// The requested quality only, then the HLS manifest.
fn select_video(
    rules: &PatternSet,
    year: &str,
    session_id: &str,
    page: &str,
    quality: Quality,
) -> Result<VideoSource, ResolveError> {
    let direct = match quality {
        Quality::Hd => PatternKind::HdVideo,
        Quality::Sd => PatternKind::SdVideo,
    };

    if let Some(url) = find(rules, direct, year, session_id, page)? {
        return Ok(VideoSource::DirectFile(url));
    }
    if let Some(url) = find(rules, PatternKind::StreamManifest, year, session_id, page)? {
        tracing::info!(year, session_id, %quality, "no direct video in requested quality, using stream manifest");
        return Ok(VideoSource::SegmentedStream(url));
    }
    tracing::info!(year, session_id, %quality, "no video in requested quality on listing page");
    Ok(VideoSource::None)
}

fn find(
    rules: &PatternSet,
    kind: PatternKind,
    year: &str,
    session_id: &str,
    page: &str,
) -> Result<Option<String>, ResolveError> {
    let re = rules.asset_regex(kind, year, session_id)?;
    Ok(first_match(&re, page))
}
