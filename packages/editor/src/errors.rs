//! Error types for the editor

use thiserror::Error;

pub type EditorResult<T> = Result<T, EditorError>;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Model error: {0}")]
    Model(#[from] studio_model::ModelError),

    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Template error in {template}: {message}")]
    Template { template: String, message: String },

    #[error("Render error for {block}: {message}")]
    Render { block: String, message: String },

    #[error("Failed to duplicate {child} (source {source_block}): {message}")]
    Duplication {
        child: String,
        source_block: String,
        message: String,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl EditorError {
    /// True when the error comes from a dangling block reference
    pub fn is_missing_block(&self) -> bool {
        matches!(
            self,
            EditorError::Model(studio_model::ModelError::MissingBlock(_))
        )
    }
}
