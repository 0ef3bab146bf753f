//! Error types for HTML fragment parsing.

use std::str::Utf8Error;

/// Error during HTML fragment parsing.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// XML parsing error.
    #[error("HTML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    /// UTF-8 decoding error.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] Utf8Error),

    /// Text encoding error.
    #[error("encoding error: {0}")]
    Encoding(#[from] quick_xml::encoding::EncodingError),

    /// XML attribute error.
    #[error("HTML attribute error: {0}")]
    XmlAttr(#[from] quick_xml::events::attributes::AttrError),
}
