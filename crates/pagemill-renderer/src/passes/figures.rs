//! Code-block captioning and hidden-code collapsing directives.

use pagemill_dom::Node;

use super::{consume_sibling_directives, quoted_value};
use crate::error::RenderError;

const FILE_PREFIX: &str = "{: codeblock-file=";
const HIDDEN_PREFIX: &str = r#"{: code="hidden""#;

/// Class of the figure wrapping a captioned code block.
pub(crate) const FIGURE_CLASS: &str = "codeblock-figure";

/// Class of the disclosure container wrapping hidden code.
pub(crate) const HIDDEN_CLASS: &str = "hidden-code";

/// Summary label of the hidden-code disclosure container.
pub(crate) const HIDDEN_SUMMARY: &str = "Show response body";

/// Apply `{: codeblock-file="…"}` directives.
///
/// Wraps the preceding element in a `<figure>` with the filename as its
/// `<figcaption>`.
pub(crate) fn caption_code_blocks(doc: &mut Node) -> Result<(), RenderError> {
    consume_sibling_directives(doc, FILE_PREFIX, &mut |text, prev| {
        if let Some(filename) = quoted_value(text) {
            wrap(prev, |inner| {
                Node::new("figure")
                    .with_attr("class", FIGURE_CLASS)
                    .with_children(vec![Node::new("figcaption").with_text(filename), inner])
            });
        } else {
            tracing::warn!(directive = %text, "Malformed codeblock-file directive, dropping");
        }
    })
}

/// Apply `{: code="hidden" …}` directives.
///
/// Wraps the preceding element in a collapsible disclosure container.
pub(crate) fn collapse_hidden_code(doc: &mut Node) -> Result<(), RenderError> {
    consume_sibling_directives(doc, HIDDEN_PREFIX, &mut |_text, prev| {
        wrap(prev, |inner| {
            Node::new("details")
                .with_attr("class", HIDDEN_CLASS)
                .with_children(vec![Node::new("summary").with_text(HIDDEN_SUMMARY), inner])
        });
    })
}

/// Replace `prev` in place with a wrapper built around it.
///
/// The wrapped element's tail moves to the wrapper so following text stays
/// outside the new container.
fn wrap(prev: &mut Node, build: impl FnOnce(Node) -> Node) {
    let mut inner = std::mem::take(prev);
    let tail = std::mem::take(&mut inner.tail);
    *prev = build(inner).with_tail(tail);
}
