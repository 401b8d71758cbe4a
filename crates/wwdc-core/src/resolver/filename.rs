//! Destination file naming for resolved assets.

/// Longest stem we produce, leaving room for an extension within NAME_MAX (255).
const STEM_MAX: usize = 240;

/// `<session>-<title>` with the title made filesystem-safe, or `<session>` alone.
pub(crate) fn file_stem(session_id: &str, title: Option<&str>) -> String {
    let title = title.map(sanitize_title).filter(|t| !t.is_empty());
    let stem = match title {
        Some(t) => format!("{session_id}-{t}"),
        None => session_id.to_string(),
    };
    truncate_at_char_boundary(&stem, STEM_MAX).to_string()
}

/// Replaces path separators, NUL and control characters with `_`, collapses
/// runs of `_`, trims surrounding spaces, dots and underscores. Spaces inside
/// the title are kept.
pub(crate) fn sanitize_title(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut prev_underscore = false;

    for c in title.chars() {
        let replacement = if c == '\0' || c == '/' || c == '\\' || c.is_control() {
            '_'
        } else {
            c
        };

        if replacement == '_' {
            if !prev_underscore {
                out.push('_');
            }
            prev_underscore = true;
        } else {
            out.push(replacement);
            prev_underscore = false;
        }
    }

    out.trim_matches(|c| c == ' ' || c == '.' || c == '_')
        .to_string()
}

/// Lowercased extension of the last path segment of `url`, if any.
pub(crate) fn extension_from_url(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let segment = parsed.path().split('/').filter(|s| !s.is_empty()).last()?;
    let (_, ext) = segment.rsplit_once('.')?;
    if ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

fn truncate_at_char_boundary(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut take = max;
    while take > 0 && !s.is_char_boundary(take) {
        take -= 1;
    }
    &s[..take]
}
