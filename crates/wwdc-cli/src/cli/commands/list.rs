//! `wwdc-dl list` – print the session ids of a year's catalog.

use anyhow::{Context, Result};
use wwdc_core::catalog::CatalogResolver;
use wwdc_core::config::WwdcConfig;
use wwdc_core::fetch::{CurlFetcher, FetchOptions};
use wwdc_core::site::Site;

use super::year_or_default;

pub fn run_list(cfg: &WwdcConfig, year: Option<&str>) -> Result<()> {
    let year = year_or_default(cfg, year);
    let site = Site::new(&cfg.site_base_url);
    let fetcher = CurlFetcher::new(FetchOptions::for_pages(cfg));
    let ids = CatalogResolver::new(&fetcher, &site)
        .list_session_ids(year)
        .with_context(|| format!("listing sessions for WWDC {year}"))?;

    if ids.is_empty() {
        println!("No sessions found for WWDC {year}.");
    } else {
        for id in ids {
            println!("{id}");
        }
    }
    Ok(())
}
