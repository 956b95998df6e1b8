//! Owns a parsed HTML tree.
use crate::error::DomError;
use crate::selection::HtmlSelection;
use scraper::Html;
use std::io::Read;

/// A parsed HTML document. Selections borrow from it and cannot outlive it.
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    /// Parses a complete document. HTML parsing is error-recovering, so
    /// malformed markup never fails; recovered errors are logged.
    pub fn parse(source: &str) -> Self {
        let html = Html::parse_document(source);
        log::debug!(
            "Parsed HTML document: {} bytes, {} recovered parse errors",
            source.len(),
            html.errors.len()
        );
        for error in &html.errors {
            log::trace!("HTML parse error: {}", error);
        }
        Self { html }
    }

    /// Reads and parses a document. Invalid UTF-8 is replaced rather than
    /// rejected.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, DomError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Ok(Self::parse(&String::from_utf8_lossy(&bytes)))
    }

    /// A selection holding the document node itself.
    pub fn root(&self) -> HtmlSelection<'_> {
        HtmlSelection::document(&self.html)
    }

    /// The whole document, serialized.
    pub fn to_html(&self) -> String {
        self.html.html()
    }
}
