//! HTML fragment parser built on quick-xml.

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::entities::convert_html_entities;
use crate::error::ParseError;
use crate::node::Node;

/// Parse rendered HTML fragments into a [`Node`] tree.
///
/// The converter emits XHTML-style markup (void elements self-closed),
/// so the fragment is parseable as XML once named HTML entities are
/// normalized to Unicode.
pub struct HtmlParser;

impl HtmlParser {
    /// Create a new parser.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Parse an HTML fragment string into a synthetic root [`Node`].
    ///
    /// The returned node has an empty tag; the fragment's top-level elements
    /// are its children. Fragments may have any number of top-level elements.
    ///
    /// # Errors
    ///
    /// Returns an error if the fragment cannot be parsed as well-formed XML.
    #[allow(clippy::unused_self)]
    pub fn parse(&self, html: &str) -> Result<Node, ParseError> {
        let html = convert_html_entities(html);
        let mut reader = Reader::from_str(&html);
        reader.config_mut().trim_text(false);

        // Stack of open elements; the bottom entry is the synthetic root.
        let mut stack = vec![Node::default()];

        loop {
            match reader.read_event()? {
                Event::Start(start) => stack.push(open_element(&reader, &start)?),
                Event::Empty(start) => {
                    let element = open_element(&reader, &start)?;
                    push_child(&mut stack, element);
                }
                Event::End(_) => {
                    // The root never closes; a stray end tag is dropped.
                    if stack.len() > 1 {
                        let closed = stack.pop().unwrap_or_default();
                        push_child(&mut stack, closed);
                    }
                }
                Event::Text(e) => {
                    let text = reader.decoder().decode(&e)?.into_owned();
                    push_text(&mut stack, &text);
                }
                Event::GeneralRef(e) => {
                    let name = reader.decoder().decode(&e)?;
                    push_text(&mut stack, &resolve_reference(&name));
                }
                Event::CData(e) => {
                    let text = String::from_utf8_lossy(&e).into_owned();
                    push_text(&mut stack, &text);
                }
                Event::Eof => break,
                Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
            }
        }

        // Fold any unclosed elements into their parents.
        let mut node = stack.pop().unwrap_or_default();
        while let Some(mut parent) = stack.pop() {
            parent.children.push(node);
            node = parent;
        }
        Ok(node)
    }
}

impl Default for HtmlParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a node from a start tag, with attributes in document order.
fn open_element(reader: &Reader<&[u8]>, start: &BytesStart) -> Result<Node, ParseError> {
    let tag = reader.decoder().decode(start.name().as_ref())?.into_owned();
    let mut node = Node::new(tag);
    for attr in start.attributes() {
        let attr = attr?;
        let key = reader.decoder().decode(attr.key.as_ref())?.into_owned();
        let value = match attr.unescape_value() {
            Ok(value) => value.into_owned(),
            Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
        };
        node.attrs.push((key, value));
    }
    Ok(node)
}

/// Attach a completed element to the innermost open element.
fn push_child(stack: &mut Vec<Node>, child: Node) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(child);
    }
}

/// Append text under the innermost open element, following the text/tail
/// convention: text after a child belongs to that child's tail.
fn push_text(stack: &mut Vec<Node>, text: &str) {
    let Some(parent) = stack.last_mut() else {
        return;
    };
    if let Some(last) = parent.children.last_mut() {
        last.tail.push_str(text);
    } else {
        parent.text.push_str(text);
    }
}

/// Resolve a general entity reference to its text.
///
/// Handles the five XML entities and numeric character references; anything
/// else is kept verbatim in `&name;` form.
fn resolve_reference(name: &str) -> String {
    let ch = match name {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "apos" => Some('\''),
        "quot" => Some('"'),
        other => char_reference(other),
    };
    ch.map_or_else(|| format!("&{name};"), String::from)
}

fn char_reference(name: &str) -> Option<char> {
    let body = name.strip_prefix('#')?;
    let code = if let Some(hex) = body.strip_prefix(['x', 'X']) {
        u32::from_str_radix(hex, 16).ok()?
    } else {
        body.parse().ok()?
    };
    char::from_u32(code)
}
