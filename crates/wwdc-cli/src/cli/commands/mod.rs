//! CLI command handlers, one per file.

mod completions;
mod download;
mod list;
mod show;
mod years;

pub use completions::run_completions;
pub use download::run_download;
pub use list::run_list;
pub use show::run_show;
pub use years::run_years;

use wwdc_core::config::WwdcConfig;

/// `--year` if given, else the configured default.
pub(crate) fn year_or_default<'a>(cfg: &'a WwdcConfig, year: Option<&'a str>) -> &'a str {
    year.unwrap_or(&cfg.default_year)
}

#[cfg(test)]
pub(crate) use download::{build_policy, normalize_sessions};
#[cfg(test)]
pub(crate) use show::{describe, show_policy};
