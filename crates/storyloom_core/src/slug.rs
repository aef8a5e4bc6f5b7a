//! Theme slug normalization.

use regex::Regex;
use std::sync::LazyLock;

/// Slug used when a theme has no usable title.
pub const UNKNOWN_SLUG: &str = "unknown";

static SEPARATOR_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9]+").expect("Valid separator regex"));

/// Convert a human-readable title into a filesystem/URL-safe slug.
///
/// Runs of anything other than ASCII letters and digits collapse to a single
/// `_`, separators at either end are dropped, and the result is lowercased.
///
/// # Examples
///
/// ```
/// use storyloom_core::slugify;
///
/// assert_eq!(slugify("Sharing & Friendship!"), "sharing_friendship");
/// assert_eq!(slugify("  Creative   Cooking "), "creative_cooking");
/// assert_eq!(slugify("!!!"), "");
/// ```
pub fn slugify(text: &str) -> String {
    SEPARATOR_RUNS
        .replace_all(text.trim(), "_")
        .trim_matches('_')
        .to_lowercase()
}

/// Slug for an optional theme title, falling back to [`UNKNOWN_SLUG`].
///
/// ```
/// use storyloom_core::theme_slug;
///
/// assert_eq!(theme_slug(Some("Rainy Day")), "rainy_day");
/// assert_eq!(theme_slug(None), "unknown");
/// assert_eq!(theme_slug(Some("???")), "unknown");
/// ```
pub fn theme_slug(title: Option<&str>) -> String {
    let slug = title.map(slugify).unwrap_or_default();
    if slug.is_empty() {
        UNKNOWN_SLUG.to_string()
    } else {
        slug
    }
}
