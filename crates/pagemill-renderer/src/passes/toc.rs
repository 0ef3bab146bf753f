//! Table-of-contents synthesis.
//!
//! Paragraphs whose exact text is `{:toc}` are replaced with an ordered
//! list of links to every level-2 heading, or removed when the document
//! has none.

use pagemill_dom::Node;

const TOC_TOKEN: &str = "{:toc}";

/// Class of the generated table-of-contents block.
pub(crate) const TOC_CLASS: &str = "page-toc";

/// Replace `{:toc}` paragraphs with a table of contents.
pub(crate) fn build_toc(doc: &mut Node) {
    let mut entries: Vec<(String, String)> = Vec::new();
    doc.visit(&mut |node| {
        if node.tag == "h2" {
            entries.push((
                node.attr("id").unwrap_or_default().to_owned(),
                node.text_content().trim().to_owned(),
            ));
        }
    });

    replace_tokens(doc, &entries);
}

fn replace_tokens(node: &mut Node, entries: &[(String, String)]) {
    let mut i = 0;
    while i < node.children.len() {
        if node.children[i].tag == "p" && node.children[i].text_content().trim() == TOC_TOKEN {
            if entries.is_empty() {
                let para = node.children.remove(i);
                if i == 0 {
                    node.text.push_str(&para.tail);
                } else {
                    node.children[i - 1].tail.push_str(&para.tail);
                }
            } else {
                let tail = std::mem::take(&mut node.children[i].tail);
                node.children[i] = toc_block(entries).with_tail(tail);
                i += 1;
            }
            continue;
        }
        replace_tokens(&mut node.children[i], entries);
        i += 1;
    }
}

fn toc_block(entries: &[(String, String)]) -> Node {
    let items = entries
        .iter()
        .map(|(id, title)| {
            Node::new("li").with_children(vec![
                Node::new("a")
                    .with_attr("href", format!("#{id}"))
                    .with_text(title),
            ])
        })
        .collect();

    Node::new("nav")
        .with_attr("class", TOC_CLASS)
        .with_children(vec![Node::new("ol").with_children(items)])
}
