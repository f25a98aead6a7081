//! Document decoding errors

use thiserror::Error;

pub type DocumentResult<T> = Result<T, DocumentError>;

#[derive(Debug, Error)]
pub enum DocumentError {
    /// The layout exists but holds no form (empty string, `null`, or `[]`).
    #[error("No form found")]
    Empty,

    #[error("Malformed form JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}
