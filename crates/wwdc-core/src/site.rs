//! Catalog page locations.

/// URL layout of the video catalog site.
#[derive(Debug, Clone)]
pub struct Site {
    base: String,
}

impl Site {
    /// `base` is the catalog root, e.g. `https://developer.apple.com/videos`.
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    /// Per-session listing page.
    pub fn listing_url(&self, year: &str, session_id: &str) -> String {
        format!("{}/play/wwdc{}/{}/", self.base, year, session_id)
    }

    /// Per-year catalog index page.
    pub fn catalog_url(&self, year: &str) -> String {
        format!("{}/wwdc{}/", self.base, year)
    }
}

impl Default for Site {
    fn default() -> Self {
        Self::new("https://developer.apple.com/videos")
    }
}
