//! Request settings shared by the page fetcher and the direct downloader.

use crate::config::WwdcConfig;
use std::time::Duration;

/// libcurl request settings.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub user_agent: String,
    pub connect_timeout: Duration,
    /// Overall transfer timeout. `None` means no limit (used for large media files).
    pub timeout: Option<Duration>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            user_agent: concat!("wwdc-dl/", env!("CARGO_PKG_VERSION")).to_string(),
            connect_timeout: Duration::from_secs(15),
            timeout: Some(Duration::from_secs(30)),
        }
    }
}

impl FetchOptions {
    /// Options for page requests, taken from the loaded config.
    pub fn for_pages(cfg: &WwdcConfig) -> Self {
        Self {
            user_agent: cfg.user_agent.clone(),
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
            timeout: Some(Duration::from_secs(cfg.timeout_secs)),
        }
    }

    /// Options for media transfers: same UA and connect timeout, no overall limit.
    pub fn for_transfers(cfg: &WwdcConfig) -> Self {
        Self {
            timeout: None,
            ..Self::for_pages(cfg)
        }
    }
}
