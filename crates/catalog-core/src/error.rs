//! Error types for product validation and persistence

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in a product store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store could not be reached or initialized
    #[error("Connection error: {0}")]
    Connection(String),

    /// Reading records failed
    #[error("Query failed: {0}")]
    Query(String),

    /// Inserting a record failed
    #[error("Write failed: {0}")]
    Write(String),

    /// A stored document could not be mapped to a product
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
}

/// Reasons a submitted product is rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Required field absent or blank
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Price present but not a finite number
    #[error("Invalid price: {0}")]
    InvalidPrice(String),
}

impl ValidationError {
    /// Plain-text message shown to the submitter
    pub fn user_message(&self) -> &'static str {
        match self {
            ValidationError::MissingField(_) => "All fields are required!",
            ValidationError::InvalidPrice(_) => "Price must be a number",
        }
    }
}
