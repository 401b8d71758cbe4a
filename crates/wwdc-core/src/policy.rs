//! User preferences threaded through resolution and download.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Preferred direct video quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Hd,
    #[default]
    Sd,
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quality::Hd => write!(f, "hd"),
            Quality::Sd => write!(f, "sd"),
        }
    }
}

impl FromStr for Quality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("hd") {
            Ok(Quality::Hd)
        } else if s.eq_ignore_ascii_case("sd") {
            Ok(Quality::Sd)
        } else {
            Err(format!("unknown quality '{s}' (expected hd or sd)"))
        }
    }
}

/// What to fetch for each session and where to put it.
#[derive(Debug, Clone)]
pub struct DownloadPolicy {
    pub wants_pdf: bool,
    pub pdf_only: bool,
    pub quality: Quality,
    /// Root directory; assets land in `<root>/WWDC-<year>/`.
    pub destination_directory: PathBuf,
    /// Hand direct media files to the external downloader as well.
    pub transport_override: bool,
}

impl DownloadPolicy {
    pub fn new(destination_directory: impl Into<PathBuf>) -> Self {
        Self {
            wants_pdf: true,
            pdf_only: false,
            quality: Quality::default(),
            destination_directory: destination_directory.into(),
            transport_override: false,
        }
    }

    /// Directory for one year's assets.
    pub fn year_directory(&self, year: &str) -> PathBuf {
        self.destination_directory.join(format!("WWDC-{year}"))
    }
}
