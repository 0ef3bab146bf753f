//! Shell highlighting fixup.
//!
//! The syntax highlighter does not recognize `{…}` URI-template
//! placeholders inside shell commands, so code elements starting with
//! `curl ` get each placeholder wrapped in an "other"-token span.

use std::sync::LazyLock;

use pagemill_dom::Node;
use regex::Regex;

use super::walk_mut;

/// Non-greedy `{…}` placeholder, case-insensitive, may span lines.
static URI_TEMPLATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)\{.+?\}").expect("invalid uri-template regex"));

/// Highlight token class for "other" tokens.
const OTHER_TOKEN_CLASS: &str = "o";

/// Wrap `{…}` placeholders in curl command code elements.
pub(crate) fn highlight_uri_templates(doc: &mut Node) {
    walk_mut(doc, &mut |node| {
        if node.tag == "code" && node.text_content().starts_with("curl ") {
            wrap_placeholders(node);
        }
    });
}

fn wrap_placeholders(node: &mut Node) {
    // Descendants first. Generated spans carry a matched placeholder as
    // their text, so they must never be re-scanned.
    for child in &mut node.children {
        wrap_placeholders(child);
    }

    // Direct text: matched spans become leading children.
    if let Some((lead, spans)) = split_spans(&node.text) {
        node.text = lead;
        for (offset, span) in spans.into_iter().enumerate() {
            node.children.insert(offset, span);
        }
    }

    // Tails of children (e.g. between highlighter token spans).
    let mut i = 0;
    while i < node.children.len() {
        let tail = std::mem::take(&mut node.children[i].tail);
        if let Some((lead, spans)) = split_spans(&tail) {
            node.children[i].tail = lead;
            for (offset, span) in spans.into_iter().enumerate() {
                node.children.insert(i + 1 + offset, span);
                i += 1;
            }
        } else {
            node.children[i].tail = tail;
        }
        i += 1;
    }
}

/// Split text around `{…}` matches.
///
/// Returns the leading text and one span node per match, each carrying the
/// following text as its tail. `None` when the text has no placeholders.
fn split_spans(text: &str) -> Option<(String, Vec<Node>)> {
    let matches: Vec<(usize, usize)> = URI_TEMPLATE
        .find_iter(text)
        .map(|m| (m.start(), m.end()))
        .collect();
    if matches.is_empty() {
        return None;
    }

    let lead = text[..matches[0].0].to_owned();
    let spans = matches
        .iter()
        .enumerate()
        .map(|(idx, &(start, end))| {
            let tail_end = matches.get(idx + 1).map_or(text.len(), |next| next.0);
            Node::new("span")
                .with_attr("class", OTHER_TOKEN_CLASS)
                .with_text(&text[start..end])
                .with_tail(&text[end..tail_end])
        })
        .collect();

    Some((lead, spans))
}
