//! The documentation page renderer.

use pagemill_dom::{HtmlParser, HtmlSerializer};

use crate::collab::{DirectImages, Highlighter, ImageProxy, NullHighlighter};
use crate::convert::MarkdownConverter;
use crate::emoji::replace_shortcodes;
use crate::error::RenderError;
use crate::options::RenderOptions;
use crate::passes;

/// Renders a Markdown documentation page to enriched HTML.
///
/// Each render call owns its document tree for the duration of the call;
/// the renderer holds no mutable state and can be reused across pages.
///
/// # Example
///
/// ```
/// use pagemill_renderer::{DocRenderer, RenderOptions};
///
/// let renderer = DocRenderer::new(RenderOptions::default());
/// let html = renderer
///     .render("## Getting Started\n\nWelcome! :tada:")
///     .unwrap();
/// assert!(html.contains("🎉"));
/// ```
pub struct DocRenderer {
    options: RenderOptions,
    image_proxy: Box<dyn ImageProxy>,
    highlighter: Box<dyn Highlighter>,
}

impl DocRenderer {
    /// Create a renderer with passthrough collaborator seams.
    #[must_use]
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            image_proxy: Box::new(DirectImages),
            highlighter: Box::new(NullHighlighter),
        }
    }

    /// Install an image-proxy URL builder.
    #[must_use]
    pub fn with_image_proxy<P: ImageProxy + 'static>(mut self, proxy: P) -> Self {
        self.image_proxy = Box::new(proxy);
        self
    }

    /// Install a syntax highlighter plugin.
    #[must_use]
    pub fn with_highlighter<H: Highlighter + 'static>(mut self, highlighter: H) -> Self {
        self.highlighter = Box::new(highlighter);
        self
    }

    /// Render Markdown source text to an HTML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the converted HTML cannot be parsed into a DOM
    /// tree, or if a directive paragraph has no preceding element.
    pub fn render(&self, markdown: &str) -> Result<String, RenderError> {
        tracing::debug!(source_len = markdown.len(), "Rendering page");

        let source = replace_shortcodes(markdown);
        let html = MarkdownConverter::new(
            &self.options.image_class,
            &*self.image_proxy,
            &*self.highlighter,
        )
        .convert(&source);

        let mut doc = HtmlParser::new().parse(&html)?;
        passes::apply_all(&mut doc)?;

        let html = HtmlSerializer::new().serialize(&doc);
        tracing::debug!(html_len = html.len(), "Page rendered");
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(markdown: &str) -> String {
        DocRenderer::new(RenderOptions::default())
            .render(markdown)
            .unwrap()
    }

    #[test]
    fn test_heading_gets_generated_id_and_anchor() {
        let html = render("## Getting Started");
        assert_eq!(
            html,
            concat!(
                r##"<h2 id="getting-started" class="anchored-heading">Getting Started"##,
                r##"<a class="anchor-link" href="#getting-started" aria-hidden="true"></a></h2>"##
            )
        );
    }

    #[test]
    fn test_h3_id_follows_section() {
        let html = render("## Getting Started\n\n### Setup");
        assert!(html.contains(r##"<h3 id="getting-started-setup""##));
    }

    #[test]
    fn test_manual_id_wins_over_generated() {
        let html = render("## Getting Started\n\n{: id=\"custom\"}");
        assert!(html.contains(r##"<h2 id="custom""##));
        assert!(!html.contains("getting-started"));
        assert!(!html.contains("{: id"));
    }

    #[test]
    fn test_custom_class_directive() {
        let html = render("Some paragraph.\n\n{: class=\"note\"}");
        assert!(html.contains(r#"<p class="note">Some paragraph.</p>"#));
    }

    #[test]
    fn test_toc_with_headings() {
        let html = render("{:toc}\n\n## First\n\n## Second");
        assert!(html.contains(r#"<nav class="page-toc"><ol>"#));
        assert!(html.contains(r##"<li><a href="#first">First</a></li>"##));
        assert!(html.contains(r##"<li><a href="#second">Second</a></li>"##));
    }

    #[test]
    fn test_toc_without_headings_removed() {
        let html = render("{:toc}\n\nJust a paragraph.");
        assert_eq!(html, "<p>Just a paragraph.</p>");
    }

    #[test]
    fn test_curl_template_wrapped() {
        let html = render("```\ncurl https://x/{id}\n```");
        assert!(html.contains(r#"curl https://x/<span class="o">{id}</span>"#));
    }

    #[test]
    fn test_codeblock_file_caption() {
        let html = render("```ruby\nputs 1\n```\n\n{: codeblock-file=\"app.rb\"}");
        assert!(html.contains(r#"<figure class="codeblock-figure"><figcaption>app.rb</figcaption>"#));
        assert!(html.contains("</pre></figure>"));
    }

    #[test]
    fn test_hidden_code_collapsed() {
        let html = render("```json\n{\"ok\": true}\n```\n\n{: code=\"hidden\"}");
        assert!(html.contains(r#"<details class="hidden-code"><summary>Show response body</summary>"#));
        assert!(html.contains("</pre></details>"));
    }

    #[test]
    fn test_emoji_substitution() {
        let html = render("Shipped :rocket:");
        assert_eq!(html, "<p>Shipped 🚀</p>");
    }

    #[test]
    fn test_bare_url_autolinked() {
        let html = render("Visit https://example.com/docs today.");
        assert_eq!(
            html,
            concat!(
                r#"<p>Visit <a href="https://example.com/docs">https://example.com/docs</a>"#,
                " today.</p>"
            )
        );
    }

    #[test]
    fn test_orphan_directive_fails() {
        let err = DocRenderer::new(RenderOptions::default())
            .render("{: id=\"custom\"}")
            .unwrap_err();
        assert!(matches!(err, RenderError::OrphanDirective { .. }));
    }

    #[test]
    fn test_image_gets_class_and_proxy() {
        struct Camo;
        impl ImageProxy for Camo {
            fn rewrite(&self, url: &str) -> String {
                format!("https://camo.example/{url}")
            }
        }
        let html = DocRenderer::new(RenderOptions::default())
            .with_image_proxy(Camo)
            .render("![Logo](logo.png)")
            .unwrap();
        assert_eq!(
            html,
            r#"<p><img src="https://camo.example/logo.png" class="doc-image" alt="Logo" /></p>"#
        );
    }

    #[test]
    fn test_highlighter_output_survives_passes() {
        struct Tokens;
        impl Highlighter for Tokens {
            fn highlight(&self, _lang: &str, code: &str) -> Option<String> {
                Some(format!(
                    r#"<pre><code><span class="nb">{}</span></code></pre>"#,
                    code.trim_end()
                ))
            }
        }
        let html = DocRenderer::new(RenderOptions::default())
            .with_highlighter(Tokens)
            .render("```shell\nls -la\n```")
            .unwrap();
        assert_eq!(
            html,
            r#"<pre><code><span class="nb">ls -la</span></code></pre>"#
        );
    }

    #[test]
    fn test_full_page_pipeline() {
        let markdown = "\
{:toc}

## Getting Started

Install the gem.

### Setup

```shell
curl https://api.example.com/v1/things/{id}
```

{: codeblock-file=\"fetch.sh\"}
";
        let html = render(markdown);

        // ToC links to the one h2
        assert!(html.contains(r##"<li><a href="#getting-started">Getting Started</a></li>"##));
        // Nested h3 id
        assert!(html.contains(r##"<h3 id="getting-started-setup""##));
        // Shell fixup inside the captioned figure
        assert!(html.contains(r#"<span class="o">{id}</span>"#));
        assert!(html.contains(r#"<figcaption>fetch.sh</figcaption>"#));
        // No directive paragraphs remain
        assert!(!html.contains("{:"));
    }

    #[test]
    fn test_renders_are_independent() {
        let renderer = DocRenderer::new(RenderOptions::default());
        let first = renderer.render("## FAQ").unwrap();
        let second = renderer.render("## FAQ").unwrap();
        // Slug dedup state must not leak across calls
        assert_eq!(first, second);
        assert!(second.contains(r##"id="faq""##));
    }
}
