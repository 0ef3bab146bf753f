//! Emoji shortcode substitution.

use std::sync::LazyLock;

use regex::Regex;

/// Regex pattern for `:shortcode:` tokens.
static SHORTCODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":([a-zA-Z0-9_+\-]+):").expect("invalid shortcode regex"));

/// Replace `:shortcode:` tokens with emoji glyphs.
///
/// Applied to the raw Markdown before parsing. Tokens that don't resolve to
/// a known shortcode are left untouched.
#[must_use]
pub fn replace_shortcodes(text: &str) -> String {
    SHORTCODE_PATTERN
        .replace_all(text, |caps: &regex::Captures| {
            emojis::get_by_shortcode(&caps[1])
                .map_or_else(|| caps[0].to_owned(), |emoji| emoji.as_str().to_owned())
        })
        .into_owned()
}
