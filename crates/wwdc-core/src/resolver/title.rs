//! Session title extraction from a listing page.

use regex::Regex;

const OG_TITLE: &str = r#"<meta\s+property="og:title"\s+content="([^"]*)""#;
const TITLE_ELEMENT: &str = r"<title>([^<]*)</title>";
const SITE_SUFFIX: &str = r"(?i)\s*-\s*(?:WWDC\s*\d*\s*-\s*)?Videos\s*-\s*Apple\s+Developer\s*$";

/// First `og:title` content, else the `<title>` element, with the site suffix
/// (" - WWDC16 - Videos - Apple Developer") removed. `None` if absent or blank.
pub(crate) fn extract_title(page: &str) -> Result<Option<String>, regex::Error> {
    let mut raw = None;
    for pattern in [OG_TITLE, TITLE_ELEMENT] {
        let re = Regex::new(pattern)?;
        if let Some(caps) = re.captures(page) {
            raw = Some(caps[1].to_string());
            break;
        }
    }
    let Some(raw) = raw else {
        return Ok(None);
    };

    let suffix = Regex::new(SITE_SUFFIX)?;
    let decoded = decode_entities(raw.trim());
    let title = suffix.replace(&decoded, "").trim().to_string();
    Ok((!title.is_empty()).then_some(title))
}

fn decode_entities(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
