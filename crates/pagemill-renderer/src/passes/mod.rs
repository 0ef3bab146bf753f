//! DOM post-processing passes.
//!
//! Each pass is a pure transformation over the parsed document tree. The
//! order is fixed and significant: directive paragraphs are consumed by
//! their pass, so later passes never see paragraphs already handled by
//! earlier ones, and id directives must land before automatic heading-id
//! generation runs.

mod attrs;
mod figures;
mod headings;
mod shell;
mod toc;

use std::sync::LazyLock;

use pagemill_dom::Node;
use regex::Regex;

use crate::error::RenderError;

/// Apply the full pass pipeline in its fixed order.
pub(crate) fn apply_all(doc: &mut Node) -> Result<(), RenderError> {
    attrs::inject_custom_ids(doc)?;
    attrs::inject_custom_classes(doc)?;
    headings::assign_heading_ids(doc);
    headings::add_anchor_links(doc);
    toc::build_toc(doc);
    shell::highlight_uri_templates(doc);
    figures::caption_code_blocks(doc)?;
    figures::collapse_hidden_code(doc)?;
    Ok(())
}

/// Pattern for the quoted payload of a directive paragraph.
static QUOTED_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]*)""#).expect("invalid quoted-value regex"));

/// Extract the first double-quoted value from directive text.
pub(crate) fn quoted_value(text: &str) -> Option<String> {
    QUOTED_VALUE
        .captures(text)
        .map(|caps| caps[1].to_owned())
}

/// Check whether a node is a paragraph whose text starts with `prefix`.
pub(crate) fn is_directive_paragraph(node: &Node, prefix: &str) -> bool {
    node.tag == "p" && node.text_content().trim().starts_with(prefix)
}

/// Consume directive paragraphs in `node.children`, handing each one's text
/// and its preceding sibling to `action`.
///
/// The directive paragraph is removed and its tail re-attached to the
/// preceding sibling. Recurses into the whole tree. A directive with no
/// preceding sibling element is a hard error.
pub(crate) fn consume_sibling_directives<F>(
    node: &mut Node,
    prefix: &str,
    action: &mut F,
) -> Result<(), RenderError>
where
    F: FnMut(&str, &mut Node),
{
    let mut i = 0;
    while i < node.children.len() {
        if is_directive_paragraph(&node.children[i], prefix) {
            let text = node.children[i].text_content().trim().to_owned();
            if i == 0 {
                return Err(RenderError::OrphanDirective { directive: text });
            }
            let para = node.children.remove(i);
            action(&text, &mut node.children[i - 1]);
            node.children[i - 1].tail.push_str(&para.tail);
            continue;
        }
        consume_sibling_directives(&mut node.children[i], prefix, action)?;
        i += 1;
    }
    Ok(())
}

/// Visit every element below `node` mutably, in document order.
pub(crate) fn walk_mut<F: FnMut(&mut Node)>(node: &mut Node, f: &mut F) {
    for child in &mut node.children {
        f(child);
        walk_mut(child, f);
    }
}
