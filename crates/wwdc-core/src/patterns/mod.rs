//! Extraction rules for listing and catalog pages.
//!
//! A `PatternSet` holds regex templates with `{year}` and `{session}`
//! placeholders. Substituted values are regex-escaped, so session ids and
//! years are always matched literally.

mod table;

pub use table::{default_rules, listed_years, rules_for, CURRENT_YEAR};

use regex::Regex;

/// Asset kinds a listing page is searched for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    HdVideo,
    SdVideo,
    Pdf,
    StreamManifest,
}

/// Immutable extraction rules for one year bucket.
#[derive(Debug)]
pub struct PatternSet {
    /// Bucket name, for diagnostics.
    pub label: &'static str,
    pub hd_video: &'static str,
    pub sd_video: &'static str,
    pub pdf: &'static str,
    pub stream_manifest: &'static str,
    /// Catalog index link; capture group 1 is the session id.
    pub session_link: &'static str,
}

impl PatternSet {
    pub fn template(&self, kind: PatternKind) -> &'static str {
        match kind {
            PatternKind::HdVideo => self.hd_video,
            PatternKind::SdVideo => self.sd_video,
            PatternKind::Pdf => self.pdf,
            PatternKind::StreamManifest => self.stream_manifest,
        }
    }

    /// Compiled asset pattern for one session.
    pub fn asset_regex(
        &self,
        kind: PatternKind,
        year: &str,
        session_id: &str,
    ) -> Result<Regex, regex::Error> {
        Regex::new(&instantiate(self.template(kind), year, session_id))
    }

    /// Compiled catalog link pattern for one year.
    pub fn session_link_regex(&self, year: &str) -> Result<Regex, regex::Error> {
        Regex::new(&instantiate(self.session_link, year, ""))
    }
}

fn instantiate(template: &str, year: &str, session_id: &str) -> String {
    template
        .replace("{year}", &regex::escape(year))
        .replace("{session}", &regex::escape(session_id))
}

/// First match of `re` in document order.
pub fn first_match(re: &Regex, text: &str) -> Option<String> {
    re.find(text).map(|m| m.as_str().to_string())
}
