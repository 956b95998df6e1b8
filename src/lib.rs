//! `hq` runs jq-style queries against HTML documents.
//!
//! ```text
//! query text --parse--> Filter --evaluate(root selection)--> Value --render--> text
//! ```
//!
//! The language lives in `hq-query`, the HTML backend in `hq-dom`; this crate
//! wires them together and hosts the command-line front end.

pub mod cli;
pub mod error;

pub use error::HqError;
pub use hq_dom::{HtmlDocument, HtmlSelection};
pub use hq_query::{Filter, QueryError, Value, parse_query};

use std::io::Read;

/// A parsed query, reusable across documents.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    filter: Filter,
}

impl Query {
    pub fn compile(source: &str) -> Result<Self, HqError> {
        Ok(Self {
            filter: parse_query(source)?,
        })
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    /// Evaluates the query against the whole document and renders the result.
    pub fn exec_document(&self, document: &HtmlDocument) -> Result<String, HqError> {
        let root = Value::Selection(document.root());
        let result = hq_query::evaluate(&self.filter, &root)?;
        log::debug!("Query produced {}", result.kind());
        Ok(hq_query::render(&result)?)
    }
}

/// Parses `query`, reads an HTML document from `input`, evaluates the query
/// against it and returns the rendered output, without a trailing newline.
pub fn exec<R: Read>(query: &str, input: R) -> Result<String, HqError> {
    let query = Query::compile(query)?;
    let document = HtmlDocument::from_reader(input)?;
    query.exec_document(&document)
}

/// Like [`exec`], for a document already in memory.
pub fn exec_str(query: &str, html: &str) -> Result<String, HqError> {
    let query = Query::compile(query)?;
    query.exec_document(&HtmlDocument::parse(html))
}
