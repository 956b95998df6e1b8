// src/error.rs
use hq_dom::DomError;
use hq_query::QueryError;
use thiserror::Error;

/// A comprehensive error type for running a query end to end.
#[derive(Error, Debug)]
pub enum HqError {
    #[error("{0}")]
    Query(#[from] QueryError),

    #[error("{0}")]
    Document(#[from] DomError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Usage: cat some.html | hq [QUERY]\n\n{0}")]
    Usage(String),
}
