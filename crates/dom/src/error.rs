use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomError {
    #[error("Failed to read document: {0}")]
    Read(#[from] std::io::Error),
}

