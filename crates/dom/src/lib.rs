//! Parsed HTML documents and the node selections hq queries run against.
//!
//! Parsing and CSS matching are delegated to `scraper`; this crate only
//! adapts it to the [`hq_query::Selection`] capability set.

pub mod document;
pub mod error;
pub mod selection;

pub use document::HtmlDocument;
pub use error::DomError;
pub use selection::HtmlSelection;
