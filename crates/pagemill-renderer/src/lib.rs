//! Documentation-page rendering pipeline.
//!
//! Converts Markdown source text into sanitized, enriched HTML for a docs
//! website. Rendering is a linear pipeline:
//!
//! 1. Emoji shortcode substitution on the raw Markdown.
//! 2. Markdown-to-HTML conversion (syntax highlighting seam, image
//!    proxying, bare-URL autolinking, code-span escaping).
//! 3. A fixed sequence of DOM passes: custom id/class injection, automatic
//!    heading ids, heading anchor links, table-of-contents synthesis, shell
//!    highlighting fixup, code filename captioning, and hidden-code
//!    collapsing.
//!
//! Directive paragraphs (`{: id="…"}`, `{: class="…"}`,
//! `{: codeblock-file="…"}`, `{: code="hidden" …}`, `{:toc}`) are consumed
//! by their pass and removed from the output.
//!
//! # Example
//!
//! ```
//! use pagemill_renderer::{DocRenderer, RenderOptions};
//!
//! let renderer = DocRenderer::new(RenderOptions::default());
//! let html = renderer.render("## Getting Started").unwrap();
//! assert!(html.contains(r##"<h2 id="getting-started""##));
//! ```

mod collab;
mod convert;
mod emoji;
mod error;
mod options;
mod passes;
mod renderer;
mod slug;

pub use collab::{DirectImages, Highlighter, ImageProxy, NullHighlighter};
pub use convert::MarkdownConverter;
pub use emoji::replace_shortcodes;
pub use error::RenderError;
pub use options::RenderOptions;
pub use renderer::DocRenderer;
pub use slug::{escape_html, slugify};
