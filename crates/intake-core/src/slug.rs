use regex::Regex;
use std::sync::OnceLock;

/// Maximum slug length in characters.
pub const SLUG_MAX_LEN: usize = 40;

/// Token used when the input has no usable characters.
pub const SLUG_FALLBACK: &str = "unbekannt";

struct SlugPatterns {
    disallowed: Regex,
    separators: Regex,
}

fn build_slug_patterns() -> Option<SlugPatterns> {
    Some(SlugPatterns {
        disallowed: Regex::new(r"[^a-z0-9\s_-]").ok()?,
        separators: Regex::new(r"[\s_-]+").ok()?,
    })
}

fn slug_patterns() -> Option<&'static SlugPatterns> {
    static PATTERNS: OnceLock<Option<SlugPatterns>> = OnceLock::new();
    PATTERNS.get_or_init(build_slug_patterns).as_ref()
}

/// Spell out German umlauts so `München` becomes `muenchen` instead of `mnchen`.
fn transliterate(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            'ä' => out.push_str("ae"),
            'ö' => out.push_str("oe"),
            'ü' => out.push_str("ue"),
            'ß' => out.push_str("ss"),
            other => out.push(other),
        }
    }
    out
}

/// Turn free text into a lowercase, filesystem-safe token.
///
/// Keeps `[a-z0-9]`, collapses whitespace/underscore/hyphen runs into a single
/// hyphen, strips hyphens at both ends and truncates to [`SLUG_MAX_LEN`].
/// Returns [`SLUG_FALLBACK`] when nothing survives.
pub fn sanitize_slug(text: &str) -> String {
    let Some(patterns) = slug_patterns() else {
        return SLUG_FALLBACK.to_string();
    };

    let lowered = transliterate(&text.trim().to_lowercase());
    let kept = patterns.disallowed.replace_all(&lowered, "");
    let collapsed = patterns.separators.replace_all(&kept, "-");
    let trimmed = collapsed.trim_matches('-');

    let truncated: String = trimmed.chars().take(SLUG_MAX_LEN).collect();
    let slug = truncated.trim_end_matches('-');

    if slug.is_empty() {
        SLUG_FALLBACK.to_string()
    } else {
        slug.to_string()
    }
}
