//! Tree node representation for rendered HTML fragments.

/// Node in a parsed HTML fragment tree.
///
/// Attributes are stored as an ordered list so serialization is
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    /// Element tag name.
    pub tag: String,
    /// Direct text content.
    pub text: String,
    /// Text after this element inside its parent.
    pub tail: String,
    /// Element attributes in document order.
    pub attrs: Vec<(String, String)>,
    /// Child nodes.
    pub children: Vec<Node>,
}

impl Node {
    /// Create a new node with the given tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Set text content.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set tail content.
    #[must_use]
    pub fn with_tail(mut self, tail: impl Into<String>) -> Self {
        self.tail = tail.into();
        self
    }

    /// Append an attribute.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    /// Set children.
    #[must_use]
    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    /// Look up an attribute value by name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing an existing value with the same name.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(entry) = self.attrs.iter_mut().find(|(k, _)| *k == name) {
            entry.1 = value;
        } else {
            self.attrs.push((name, value));
        }
    }

    /// Check whether the node has an attribute with the given name.
    #[must_use]
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|(k, _)| k == name)
    }

    /// Verbatim text content of this node and all descendants.
    ///
    /// Concatenates direct text, children's content, and the tails between
    /// children. The node's own tail is not included.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        out.push_str(&self.text);
        for child in &self.children {
            child.collect_text(out);
            out.push_str(&child.tail);
        }
    }

    /// Visit this node and all descendants in document order.
    pub fn visit<F: FnMut(&Node)>(&self, f: &mut F) {
        f(self);
        for child in &self.children {
            child.visit(f);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_content_direct() {
        let node = Node::new("p").with_text("Hello World");
        assert_eq!(node.text_content(), "Hello World");
    }

    #[test]
    fn test_text_content_mixed() {
        let strong = Node::new("strong").with_text("bold").with_tail(" after");
        let node = Node::new("p")
            .with_text("before ")
            .with_children(vec![strong]);
        assert_eq!(node.text_content(), "before bold after");
    }

    #[test]
    fn test_text_content_excludes_own_tail() {
        let node = Node::new("span").with_text("Hello").with_tail(" World");
        assert_eq!(node.text_content(), "Hello");
    }

    #[test]
    fn test_attr_lookup() {
        let node = Node::new("h2").with_attr("id", "intro").with_attr("class", "x");
        assert_eq!(node.attr("id"), Some("intro"));
        assert_eq!(node.attr("class"), Some("x"));
        assert_eq!(node.attr("href"), None);
    }

    #[test]
    fn test_set_attr_replaces() {
        let mut node = Node::new("h2").with_attr("id", "old");
        node.set_attr("id", "new");
        assert_eq!(node.attr("id"), Some("new"));
        assert_eq!(node.attrs.len(), 1);
    }

    #[test]
    fn test_set_attr_appends() {
        let mut node = Node::new("h2");
        node.set_attr("id", "intro");
        assert!(node.has_attr("id"));
    }

    #[test]
    fn test_visit_document_order() {
        let doc = Node::new("root").with_children(vec![
            Node::new("h2"),
            Node::new("p").with_children(vec![Node::new("em")]),
        ]);
        let mut tags = Vec::new();
        doc.visit(&mut |n| tags.push(n.tag.clone()));
        assert_eq!(tags, ["root", "h2", "p", "em"]);
    }
}
