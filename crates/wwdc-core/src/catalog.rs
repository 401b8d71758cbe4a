//! Catalog index: every session id published for a year.

use std::collections::BTreeSet;

use crate::error::ResolveError;
use crate::fetch::PageFetcher;
use crate::patterns;
use crate::site::Site;

/// Lists sessions from the per-year catalog index page.
pub struct CatalogResolver<'a> {
    fetcher: &'a dyn PageFetcher,
    site: &'a Site,
}

impl<'a> CatalogResolver<'a> {
    pub fn new(fetcher: &'a dyn PageFetcher, site: &'a Site) -> Self {
        Self { fetcher, site }
    }

    /// Distinct session ids for `year`, ascending lexicographic order.
    pub fn list_session_ids(&self, year: &str) -> Result<Vec<String>, ResolveError> {
        let url = self.site.catalog_url(year);
        let page = self
            .fetcher
            .fetch_text(&url)
            .map_err(|e| ResolveError::unavailable(&url, &e))?;
        let ids = extract_session_ids(year, &page)?;
        tracing::debug!(year, count = ids.len(), "catalog sessions");
        Ok(ids)
    }
}

/// Every session-link capture on `page`, de-duplicated and sorted.
pub fn extract_session_ids(year: &str, page: &str) -> Result<Vec<String>, ResolveError> {
    let re = patterns::rules_for(year).session_link_regex(year)?;
    let ids: BTreeSet<String> = re
        .captures_iter(page)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        .collect();
    Ok(ids.into_iter().collect())
}
