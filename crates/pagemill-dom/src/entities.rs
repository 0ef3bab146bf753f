//! Named HTML entity normalization.
//!
//! Markdown authors (and raw HTML passthrough) use named entities like
//! `&nbsp;` that XML does not define, so they are rewritten to their Unicode
//! characters before the fragment reaches the XML parser. The five XML
//! entities stay escaped; the parser resolves those itself.

use std::sync::LazyLock;

use regex::Regex;

static ENTITY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&([a-zA-Z]+);").expect("invalid entity regex"));

/// HTML entities seen in docs content, mapped to their Unicode characters.
///
/// Deliberately not the full HTML5 entity list; the parser keeps unknown
/// references verbatim, so they stay visible in the output.
const NAMED_ENTITIES: &[(&str, &str)] = &[
    ("bull", "\u{2022}"),
    ("copy", "\u{00a9}"),
    ("deg", "\u{00b0}"),
    ("hellip", "\u{2026}"),
    ("laquo", "\u{00ab}"),
    ("larr", "\u{2190}"),
    ("ldquo", "\u{201c}"),
    ("lsquo", "\u{2018}"),
    ("mdash", "\u{2014}"),
    ("nbsp", "\u{00a0}"),
    ("ndash", "\u{2013}"),
    ("para", "\u{00b6}"),
    ("plusmn", "\u{00b1}"),
    ("raquo", "\u{00bb}"),
    ("rarr", "\u{2192}"),
    ("rdquo", "\u{201d}"),
    ("reg", "\u{00ae}"),
    ("rsquo", "\u{2019}"),
    ("sect", "\u{00a7}"),
    ("times", "\u{00d7}"),
    ("trade", "\u{2122}"),
];

/// Rewrite named HTML entities to Unicode characters.
///
/// XML entities (`amp`, `lt`, `gt`, `quot`, `apos`) and unknown names are
/// left as-is.
#[must_use]
pub fn convert_html_entities(html: &str) -> String {
    ENTITY_PATTERN
        .replace_all(html, |caps: &regex::Captures| {
            let name = &caps[1];
            NAMED_ENTITIES
                .iter()
                .find(|(entity, _)| *entity == name)
                .map_or_else(|| caps[0].to_owned(), |(_, ch)| (*ch).to_owned())
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_rewrites_named_entities() {
        assert_eq!(
            convert_html_entities("a&nbsp;b&mdash;c&hellip;"),
            "a\u{00a0}b\u{2014}c\u{2026}"
        );
    }

    #[test]
    fn test_xml_entities_stay_escaped() {
        let text = "&lt;p&gt; &amp; &quot;q&quot; &apos;a&apos;";
        assert_eq!(convert_html_entities(text), text);
    }

    #[test]
    fn test_unknown_names_pass_through() {
        assert_eq!(convert_html_entities("&bogus; &x;"), "&bogus; &x;");
    }

    #[test]
    fn test_table_sorted_and_excludes_xml_entities() {
        assert!(NAMED_ENTITIES.is_sorted_by_key(|(name, _)| *name));
        for xml in ["amp", "lt", "gt", "quot", "apos"] {
            assert!(NAMED_ENTITIES.iter().all(|(name, _)| *name != xml));
        }
    }
}
