//! Seams for external collaborators.
//!
//! The docs site supplies an image-proxy URL builder and a syntax
//! highlighter at build time. Both are pure synchronous functions, so they
//! are modeled as object-safe traits with passthrough defaults.

/// Builds proxied URLs for externally hosted images.
pub trait ImageProxy {
    /// Rewrite an image URL, e.g. through a camo-style asset proxy.
    fn rewrite(&self, url: &str) -> String;
}

/// Default proxy: images are served from their original URLs.
pub struct DirectImages;

impl ImageProxy for DirectImages {
    fn rewrite(&self, url: &str) -> String {
        url.to_owned()
    }
}

/// Syntax highlighter plugin for fenced code blocks.
pub trait Highlighter {
    /// Highlight a code block, returning complete pre-escaped HTML.
    ///
    /// Return `None` to fall back to the built-in
    /// `<pre><code class="language-…">` rendering.
    fn highlight(&self, lang: &str, code: &str) -> Option<String>;
}

/// Default highlighter: always falls back to class-annotated code blocks.
pub struct NullHighlighter;

impl Highlighter for NullHighlighter {
    fn highlight(&self, _lang: &str, _code: &str) -> Option<String> {
        None
    }
}
