//! `wwdc-dl show <session>` – resolve one session without downloading.

use anyhow::{Context, Result};
use wwdc_core::config::WwdcConfig;
use wwdc_core::fetch::{CurlFetcher, FetchOptions};
use wwdc_core::policy::{DownloadPolicy, Quality};
use wwdc_core::resolver::{ResolvedSession, SessionResolver, VideoTransport};
use wwdc_core::site::Site;

use super::year_or_default;

pub fn run_show(
    cfg: &WwdcConfig,
    year: Option<&str>,
    quality: Option<Quality>,
    session: &str,
) -> Result<()> {
    let year = year_or_default(cfg, year);
    let site = Site::new(&cfg.site_base_url);
    let fetcher = CurlFetcher::new(FetchOptions::for_pages(cfg));
    let policy = show_policy(cfg, quality)?;

    let resolved = SessionResolver::new(&fetcher, &site)
        .resolve(year, session, &policy)
        .with_context(|| format!("resolving WWDC {year} session {session}"))?;
    for line in describe(&resolved) {
        println!("{line}");
    }
    Ok(())
}

/// Same quality choice `download` would make.
pub(crate) fn show_policy(cfg: &WwdcConfig, quality: Option<Quality>) -> Result<DownloadPolicy> {
    Ok(DownloadPolicy {
        quality: quality.unwrap_or(cfg.default_quality),
        ..DownloadPolicy::new(cfg.resolved_download_root()?)
    })
}

pub(crate) fn describe(resolved: &ResolvedSession) -> Vec<String> {
    let transport = match resolved.video_transport() {
        VideoTransport::DirectFile => "direct",
        VideoTransport::SegmentedStream => "stream",
        VideoTransport::None => "none",
    };
    vec![
        format!("session: {} ({})", resolved.session_id, resolved.year),
        format!("title:   {}", resolved.title.as_deref().unwrap_or("-")),
        format!("file:    {}", resolved.file_stem()),
        format!(
            "video:   [{}] {}",
            transport,
            resolved.video_url().unwrap_or("-")
        ),
        format!("pdf:     {}", resolved.pdf_url.as_deref().unwrap_or("-")),
    ]
}
