//! Year-bucketed extraction rules.
//!
//! Each bucket encodes how the asset host laid out files that year. Lookup is
//! an exact match on the year string; anything unlisted uses `DEFAULT`.

use super::PatternSet;

/// Most recent year served with the current URL scheme.
pub const CURRENT_YEAR: &str = "2026";

macro_rules! legacy_host {
    () => {
        r"http://devstreaming\.apple\.com"
    };
}

macro_rules! cdn_host {
    () => {
        r"https://devstreaming-cdn\.apple\.com"
    };
}

macro_rules! host {
    (legacy) => {
        legacy_host!()
    };
    (cdn) => {
        cdn_host!()
    };
}

/// Wildcard confined to URL characters so a match never spans two links.
macro_rules! url_chars {
    () => {
        r#"[^"'\s<>]*"#
    };
}

macro_rules! stream_manifest {
    () => {
        concat!(
            cdn_host!(),
            "/videos/wwdc/{year}/{session}",
            url_chars!(),
            r"\.m3u8"
        )
    };
}

macro_rules! session_link {
    () => {
        r"/videos/play/wwdc{year}/(\d+)/"
    };
}

/// `<host>/videos/wwdc/<year>/<id>…/<id>/<id>_{hd,sd}_….<ext>` and `<id>_….pdf`.
macro_rules! legacy_set {
    ($label:literal, $host:ident, $ext:literal) => {
        PatternSet {
            label: $label,
            hd_video: concat!(
                host!($host),
                "/videos/wwdc/{year}/{session}",
                url_chars!(),
                "/{session}/{session}_hd_",
                url_chars!(),
                r"\.",
                $ext
            ),
            sd_video: concat!(
                host!($host),
                "/videos/wwdc/{year}/{session}",
                url_chars!(),
                "/{session}/{session}_sd_",
                url_chars!(),
                r"\.",
                $ext
            ),
            pdf: concat!(
                host!($host),
                "/videos/wwdc/{year}/{session}",
                url_chars!(),
                "/{session}/{session}_",
                url_chars!(),
                r"\.pdf"
            ),
            stream_manifest: stream_manifest!(),
            session_link: session_link!(),
        }
    };
}

static DEFAULT: PatternSet = legacy_set!("default", legacy, "mp4");

static Y2014: PatternSet = legacy_set!("2014", legacy, "mov");

static CDN_LEGACY: PatternSet = legacy_set!("2017-2019", cdn, "mp4");

static Y2020: PatternSet = PatternSet {
    label: "2020",
    hd_video: concat!(
        cdn_host!(),
        "/videos/wwdc/{year}/{session}/",
        url_chars!(),
        r"{session}_hd\.mp4"
    ),
    sd_video: concat!(
        cdn_host!(),
        "/videos/wwdc/{year}/{session}/",
        url_chars!(),
        r"{session}_sd\.mp4"
    ),
    pdf: concat!(
        cdn_host!(),
        "/videos/wwdc/{year}/{session}/",
        url_chars!(),
        r"\.pdf"
    ),
    stream_manifest: stream_manifest!(),
    session_link: session_link!(),
};

static MODERN: PatternSet = PatternSet {
    label: "2021+",
    hd_video: concat!(
        cdn_host!(),
        "/videos/wwdc/{year}/{session}/",
        url_chars!(),
        "/downloads/",
        r#"[^"'\s<>/]*"#,
        r"{session}_hd\.mp4"
    ),
    sd_video: concat!(
        cdn_host!(),
        "/videos/wwdc/{year}/{session}/",
        url_chars!(),
        "/downloads/",
        r#"[^"'\s<>/]*"#,
        r"{session}_sd\.mp4"
    ),
    pdf: concat!(
        cdn_host!(),
        "/videos/wwdc/{year}/{session}/",
        url_chars!(),
        r"\.pdf"
    ),
    stream_manifest: stream_manifest!(),
    session_link: session_link!(),
};

static ENTRIES: [(&str, &PatternSet); 10] = [
    ("2014", &Y2014),
    ("2017", &CDN_LEGACY),
    ("2018", &CDN_LEGACY),
    ("2019", &CDN_LEGACY),
    ("2020", &Y2020),
    ("2021", &MODERN),
    ("2022", &MODERN),
    ("2023", &MODERN),
    ("2024", &MODERN),
    ("2025", &MODERN),
];

/// Rules for `year`: its listed bucket, or the default. Never fails.
pub fn rules_for(year: &str) -> &'static PatternSet {
    if year == CURRENT_YEAR {
        return &MODERN;
    }
    ENTRIES
        .iter()
        .find(|(y, _)| *y == year)
        .map(|(_, set)| *set)
        .unwrap_or(&DEFAULT)
}

/// Years with an explicit entry, paired with their bucket label.
pub fn listed_years() -> impl Iterator<Item = (&'static str, &'static str)> {
    ENTRIES
        .iter()
        .map(|(y, set)| (*y, set.label))
        .chain(std::iter::once((CURRENT_YEAR, MODERN.label)))
}

/// The fallback bucket.
pub fn default_rules() -> &'static PatternSet {
    &DEFAULT
}
