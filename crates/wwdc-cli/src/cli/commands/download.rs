//! `wwdc-dl download` – resolve and fetch sessions of one year.

use anyhow::{bail, Context, Result};
use wwdc_core::catalog::CatalogResolver;
use wwdc_core::config::WwdcConfig;
use wwdc_core::download::{CurlDownloader, ExternalStreamDownloader};
use wwdc_core::fetch::{CurlFetcher, FetchOptions};
use wwdc_core::orchestrator::DownloadOrchestrator;
use wwdc_core::pipeline::{self, SessionReport};
use wwdc_core::policy::DownloadPolicy;
use wwdc_core::resolver::SessionResolver;
use wwdc_core::site::Site;

use super::year_or_default;
use crate::cli::DownloadArgs;

pub fn run_download(cfg: &WwdcConfig, args: &DownloadArgs) -> Result<()> {
    let year = year_or_default(cfg, args.year.as_deref());
    let policy = build_policy(cfg, args)?;
    let site = Site::new(&cfg.site_base_url);
    let fetcher = CurlFetcher::new(FetchOptions::for_pages(cfg));

    let session_ids = if args.all {
        CatalogResolver::new(&fetcher, &site)
            .list_session_ids(year)
            .with_context(|| format!("listing sessions for WWDC {year}"))?
    } else {
        normalize_sessions(&args.sessions)
    };
    if session_ids.is_empty() {
        println!("No sessions to download for WWDC {year}.");
        return Ok(());
    }
    tracing::info!(
        year,
        sessions = session_ids.len(),
        dest = %policy.destination_directory.display(),
        "starting download run"
    );

    let direct = CurlDownloader::new(FetchOptions::for_transfers(cfg));
    let stream = ExternalStreamDownloader::new(&cfg.stream);
    let resolver = SessionResolver::new(&fetcher, &site);
    let orchestrator = DownloadOrchestrator::new(&direct, &stream);

    let summary = pipeline::process_sessions(
        &resolver,
        &orchestrator,
        year,
        &session_ids,
        &policy,
        print_report,
    );

    println!(
        "{} session(s): {} unavailable, {} failed asset(s), {} with nothing found",
        summary.sessions, summary.unavailable, summary.failed_assets, summary.empty_sessions
    );
    if summary.failed(args.strict) {
        bail!("download run for WWDC {year} did not complete cleanly");
    }
    Ok(())
}

/// Config defaults overridden by flags.
pub(crate) fn build_policy(cfg: &WwdcConfig, args: &DownloadArgs) -> Result<DownloadPolicy> {
    let root = match &args.dest {
        Some(dir) => dir.clone(),
        None => cfg.resolved_download_root()?,
    };
    Ok(DownloadPolicy {
        wants_pdf: !args.no_pdf,
        pdf_only: args.pdf_only,
        quality: args.quality.unwrap_or(cfg.default_quality),
        transport_override: args.external,
        ..DownloadPolicy::new(root)
    })
}

/// Trimmed, non-empty ids in first-seen order.
pub(crate) fn normalize_sessions(raw: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(raw.len());
    for id in raw.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
        if !out.iter().any(|seen| seen == id) {
            out.push(id.to_string());
        }
    }
    out
}

fn print_report(report: &SessionReport) {
    match report {
        SessionReport::Processed { outcomes, .. } => {
            for outcome in outcomes {
                println!("{outcome}");
            }
        }
        SessionReport::Unavailable { session_id, error } => {
            println!("{session_id}: {error}");
        }
    }
}
