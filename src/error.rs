//! Error types. Alignment itself never fails; only parameters can be invalid.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Parameters that parse but can not be used.
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    /// Malformed JSON parameters.
    #[error("could not parse parameters: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
