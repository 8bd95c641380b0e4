//! Error types for StudyRag

use thiserror::Error;

/// Result type alias for StudyRag operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in StudyRag operations
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to load or run the embedding model
    #[error("embedding error: {0}")]
    Embedding(String),

    /// Failed to extract text from a source document
    #[error("extraction error: {0}")]
    Extraction(String),

    /// Vector index misuse (misaligned batch or dimension mismatch)
    #[error("index error: {0}")]
    Index(String),

    /// The generation backend failed or is not configured
    #[error("generation error: {0}")]
    Generation(String),

    /// Invalid input provided
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
