//! Lightweight HTML fragment tree for documentation post-processing.
//!
//! This crate parses the HTML fragments produced by the markdown converter
//! into a mutable [`Node`] tree, lets rendering passes rearrange it, and
//! serializes the result back to a fragment string.
//!
//! The node model follows the text/tail convention: each element owns its
//! direct text plus the text that follows it inside its parent, so mixed
//! content (`<p>a <em>b</em> c</p>`) round-trips without a separate text
//! node type.
//!
//! # Example
//!
//! ```
//! use pagemill_dom::{HtmlParser, HtmlSerializer};
//!
//! let doc = HtmlParser::new().parse("<p>Hello <em>world</em></p>").unwrap();
//! assert_eq!(doc.children[0].text_content(), "Hello world");
//! assert_eq!(
//!     HtmlSerializer::new().serialize(&doc),
//!     "<p>Hello <em>world</em></p>"
//! );
//! ```

mod entities;
mod error;
mod node;
mod parser;
mod serializer;

pub use entities::convert_html_entities;
pub use error::ParseError;
pub use node::Node;
pub use parser::HtmlParser;
pub use serializer::HtmlSerializer;
