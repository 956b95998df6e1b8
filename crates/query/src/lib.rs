//! A jq-like query language for extracting data from HTML documents.
//!
//! Queries are parsed into a small AST and evaluated against any type
//! implementing [`Selection`], so the engine stays independent of the HTML
//! parser and CSS selector engine that back it.

pub mod ast;
pub mod engine;
pub mod error;
mod parser;
pub mod render;
pub mod selection;
pub mod value;

// --- Public API ---
pub use ast::{Atomic, Comma, Filter, Pipe, Suffix};
pub use engine::evaluate;
pub use error::QueryError;
pub use parser::parse_query;
pub use render::render;
pub use selection::Selection;
pub use value::{Item, Value};

/// Parses `query`, evaluates it against `root` and renders the result.
pub fn run<S: Selection>(query: &str, root: S) -> Result<String, QueryError> {
    let filter = parse_query(query)?;
    let result = evaluate(&filter, &Value::Selection(root))?;
    render(&result)
}
