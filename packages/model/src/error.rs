//! Error types for the content model

use thiserror::Error;

pub type ModelResult<T> = Result<T, ModelError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Block not found: {0}")]
    MissingBlock(String),

    #[error("Invalid block location: {0}")]
    InvalidLocation(String),

    #[error("Block already exists: {0}")]
    DuplicateId(String),

    #[error("Invalid user: {0}")]
    InvalidUser(String),
}
