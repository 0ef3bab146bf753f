//! Custom id/class injection directives.
//!
//! `{: id="…"}` and `{: class="…"}` paragraphs transfer their payload onto
//! the immediately preceding sibling element and are removed.

use pagemill_dom::Node;

use super::{consume_sibling_directives, quoted_value};
use crate::error::RenderError;

const ID_PREFIX: &str = "{: id=";
const CLASS_PREFIX: &str = "{: class=";

/// Apply `{: id="…"}` directives.
pub(crate) fn inject_custom_ids(doc: &mut Node) -> Result<(), RenderError> {
    inject(doc, ID_PREFIX, "id")
}

/// Apply `{: class="…"}` directives.
pub(crate) fn inject_custom_classes(doc: &mut Node) -> Result<(), RenderError> {
    inject(doc, CLASS_PREFIX, "class")
}

fn inject(doc: &mut Node, prefix: &str, attr: &'static str) -> Result<(), RenderError> {
    consume_sibling_directives(doc, prefix, &mut |text, prev| {
        if let Some(value) = quoted_value(text) {
            prev.set_attr(attr, value);
        } else {
            tracing::warn!(directive = %text, "Malformed attribute directive, dropping");
        }
    })
}
