//! Rendering options.

/// Options for a render call.
///
/// Passed explicitly to [`DocRenderer::new`](crate::DocRenderer::new); there
/// is no ambient configuration.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RenderOptions {
    /// CSS class applied to every rendered `<img>` element.
    pub image_class: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            image_class: "doc-image".to_owned(),
        }
    }
}
