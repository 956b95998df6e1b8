use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("Parse error at offset {offset}: unexpected {found}, expected {expected}")]
    Parse {
        offset: usize,
        found: String,
        expected: String,
    },

    #[error("Cannot iterate over {0}")]
    Iteration(&'static str),

    #[error("Cannot index {0}")]
    Index(&'static str),

    #[error("Type error: {operation} requires a selection, got {kind}")]
    Type {
        operation: &'static str,
        kind: &'static str,
    },

    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    #[error("Serialization error: {0}")]
    Serialization(String),
}
