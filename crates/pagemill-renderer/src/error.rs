//! Error types for page rendering.

/// Error returned when rendering a page fails.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Rendered HTML could not be parsed into a DOM tree.
    #[error("DOM error: {0}")]
    Dom(#[from] pagemill_dom::ParseError),

    /// A directive paragraph has no preceding sibling element to act on.
    ///
    /// This is a content-authoring error; silently dropping the directive
    /// would ship broken documentation.
    #[error("directive {directive:?} has no preceding element")]
    OrphanDirective {
        /// The directive paragraph text.
        directive: String,
    },
}
