//! Automatic heading ids and anchor links.

use std::collections::HashMap;

use pagemill_dom::Node;

use super::walk_mut;
use crate::slug::slugify;

/// Class set on every anchored h2/h3 heading.
pub(crate) const HEADING_CLASS: &str = "anchored-heading";

/// Class of the appended anchor link element.
pub(crate) const ANCHOR_CLASS: &str = "anchor-link";

/// Allocates document-unique heading ids.
///
/// Duplicate slugs get `-1`, `-2`, … suffixes. Pre-existing ids are
/// reserved first so generated ids never collide with manual ones, which
/// also makes the pass idempotent.
#[derive(Default)]
struct IdAllocator {
    counts: HashMap<String, usize>,
}

impl IdAllocator {
    fn reserve(&mut self, id: &str) {
        let count = self.counts.entry(id.to_owned()).or_insert(0);
        if *count == 0 {
            *count = 1;
        }
    }

    fn allocate(&mut self, base: &str) -> String {
        let count = self.counts.entry(base.to_owned()).or_default();
        let id = match *count {
            0 => base.to_owned(),
            n => format!("{base}-{n}"),
        };
        *count += 1;
        id
    }
}

/// Assign ids to level-2 and level-3 headings that lack one.
///
/// Every `<h2>` without an id gets a slug of its text. Every `<h3>` without
/// an id that follows an identified `<h2>` gets `<h2-id>-<h3-slug>`; the
/// nearest preceding `<h2>` wins, tracked by a single linear scan. An
/// `<h3>` before the first `<h2>` is left alone, as are headings with
/// manually assigned ids.
pub(crate) fn assign_heading_ids(doc: &mut Node) {
    let mut ids = IdAllocator::default();
    doc.visit(&mut |node| {
        if let Some(id) = node.attr("id") {
            ids.reserve(id);
        }
    });

    let mut section: Option<String> = None;
    scan(doc, &mut section, &mut ids);
}

fn scan(node: &mut Node, section: &mut Option<String>, ids: &mut IdAllocator) {
    for child in &mut node.children {
        match child.tag.as_str() {
            "h2" => {
                if let Some(id) = child.attr("id") {
                    *section = Some(id.to_owned());
                } else {
                    let id = ids.allocate(&slugify(&child.text_content()));
                    child.set_attr("id", id.clone());
                    *section = Some(id);
                }
            }
            "h3" => {
                if !child.has_attr("id")
                    && let Some(section_id) = section.as_deref()
                {
                    let id =
                        ids.allocate(&format!("{section_id}-{}", slugify(&child.text_content())));
                    child.set_attr("id", id);
                }
            }
            _ => {}
        }
        scan(child, section, ids);
    }
}

/// Mark every identified h2/h3 heading and append a self-link anchor.
///
/// Headings without an id (an h3 before the first h2) are left alone; an
/// anchor pointing at `#` would be a dead link. The anchor is non-semantic
/// for assistive technology.
pub(crate) fn add_anchor_links(doc: &mut Node) {
    walk_mut(doc, &mut |node| {
        if (node.tag == "h2" || node.tag == "h3")
            && let Some(id) = node.attr("id")
        {
            let href = format!("#{id}");
            node.set_attr("class", HEADING_CLASS);
            node.children.push(
                Node::new("a")
                    .with_attr("class", ANCHOR_CLASS)
                    .with_attr("href", href)
                    .with_attr("aria-hidden", "true"),
            );
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagemill_dom::{HtmlParser, HtmlSerializer};

    fn parse(html: &str) -> Node {
        HtmlParser::new().parse(html).unwrap()
    }

    #[test]
    fn test_h2_gets_slug_id() {
        let mut doc = parse("<h2>Getting Started</h2>");
        assign_heading_ids(&mut doc);
        assert_eq!(doc.children[0].attr("id"), Some("getting-started"));
    }

    #[test]
    fn test_h3_inherits_section_prefix() {
        let mut doc = parse("<h2>Getting Started</h2><p>x</p><h3>Setup</h3>");
        assign_heading_ids(&mut doc);
        assert_eq!(doc.children[2].attr("id"), Some("getting-started-setup"));
    }

    #[test]
    fn test_h3_uses_nearest_preceding_h2() {
        let mut doc = parse("<h2>One</h2><h3>A</h3><h2>Two</h2><h3>B</h3>");
        assign_heading_ids(&mut doc);
        assert_eq!(doc.children[1].attr("id"), Some("one-a"));
        assert_eq!(doc.children[3].attr("id"), Some("two-b"));
    }

    #[test]
    fn test_h3_before_first_h2_untouched() {
        let mut doc = parse("<h3>Early</h3><h2>First</h2>");
        assign_heading_ids(&mut doc);
        assert!(!doc.children[0].has_attr("id"));
    }

    #[test]
    fn test_manual_ids_never_overwritten() {
        let mut doc = parse(r#"<h2 id="custom">Title</h2><h3>Setup</h3>"#);
        assign_heading_ids(&mut doc);
        assert_eq!(doc.children[0].attr("id"), Some("custom"));
        assert_eq!(doc.children[1].attr("id"), Some("custom-setup"));
    }

    #[test]
    fn test_duplicate_slugs_deduplicated() {
        let mut doc = parse("<h2>FAQ</h2><h2>FAQ</h2><h2>FAQ</h2>");
        assign_heading_ids(&mut doc);
        assert_eq!(doc.children[0].attr("id"), Some("faq"));
        assert_eq!(doc.children[1].attr("id"), Some("faq-1"));
        assert_eq!(doc.children[2].attr("id"), Some("faq-2"));
    }

    #[test]
    fn test_generated_id_avoids_manual_collision() {
        let mut doc = parse(r#"<h2 id="faq">Custom</h2><h2>FAQ</h2>"#);
        assign_heading_ids(&mut doc);
        assert_eq!(doc.children[1].attr("id"), Some("faq-1"));
    }

    #[test]
    fn test_idempotent() {
        let mut doc = parse("<h2>Getting Started</h2><h3>Setup</h3>");
        assign_heading_ids(&mut doc);
        let first = HtmlSerializer::new().serialize(&doc);
        assign_heading_ids(&mut doc);
        assert_eq!(HtmlSerializer::new().serialize(&doc), first);
    }

    #[test]
    fn test_anchor_link_appended() {
        let mut doc = parse("<h2>Intro</h2>");
        assign_heading_ids(&mut doc);
        add_anchor_links(&mut doc);

        let h2 = &doc.children[0];
        assert_eq!(h2.attr("class"), Some(HEADING_CLASS));
        let anchor = h2.children.last().unwrap();
        assert_eq!(anchor.tag, "a");
        assert_eq!(anchor.attr("href"), Some("#intro"));
        assert_eq!(anchor.attr("aria-hidden"), Some("true"));
    }

    #[test]
    fn test_anchor_link_not_added_to_other_levels() {
        let mut doc = parse("<h1>Title</h1><h4>Deep</h4>");
        add_anchor_links(&mut doc);
        assert!(doc.children[0].children.is_empty());
        assert!(doc.children[1].children.is_empty());
    }

    #[test]
    fn test_idless_heading_gets_no_anchor() {
        let mut doc = parse("<h3>Early</h3><h2>First</h2>");
        assign_heading_ids(&mut doc);
        add_anchor_links(&mut doc);

        let h3 = &doc.children[0];
        assert!(h3.children.is_empty());
        assert!(!h3.has_attr("class"));
        let h2 = &doc.children[1];
        assert_eq!(h2.children.last().unwrap().attr("href"), Some("#first"));
    }
}
