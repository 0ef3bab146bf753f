//! HTML fragment serializer.

#![allow(clippy::unused_self)] // Unit struct methods have &self for API consistency

use std::fmt::Write;

use crate::node::Node;

/// HTML void elements that never take a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Serialize a [`Node`] tree back to an HTML fragment string.
pub struct HtmlSerializer;

impl HtmlSerializer {
    /// Create a new serializer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Serialize a tree to an HTML string.
    ///
    /// The synthetic root wrapper is skipped; only its children are emitted.
    #[must_use]
    pub fn serialize(&self, tree: &Node) -> String {
        let mut out = String::with_capacity(4096);
        for child in &tree.children {
            serialize_node(child, &mut out);
        }
        out
    }
}

impl Default for HtmlSerializer {
    fn default() -> Self {
        Self::new()
    }
}

/// Serialize a single node recursively.
fn serialize_node(node: &Node, out: &mut String) {
    // Opening tag
    out.push('<');
    out.push_str(&node.tag);

    // Attributes
    for (key, value) in &node.attrs {
        write!(out, r#" {}="{}""#, key, escape_attr(value)).unwrap();
    }

    if VOID_ELEMENTS.contains(&node.tag.as_str()) {
        out.push_str(" />");
    } else {
        out.push('>');

        if !node.text.is_empty() {
            out.push_str(&escape_text(&node.text));
        }

        for child in &node.children {
            serialize_node(child, out);
        }

        write!(out, "</{}>", node.tag).unwrap();
    }

    // Tail text
    if !node.tail.is_empty() {
        out.push_str(&escape_text(&node.tail));
    }
}

/// Escape text for HTML content.
fn escape_text(text: &str) -> String {
    escape(text, false)
}

/// Escape text for HTML attribute values.
fn escape_attr(text: &str) -> String {
    escape(text, true)
}

fn escape(text: &str, escape_quotes: bool) -> String {
    let mut result = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' if escape_quotes => result.push_str("&quot;"),
            '\'' if escape_quotes => result.push_str("&#x27;"),
            _ => result.push(ch),
        }
    }
    result
}
