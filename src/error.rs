//! Error types for the Lexicomb library.
//!
//! All fallible operations return [`LexicombError`]. Absence of data (a word
//! missing from the lexicon, an empty prefix match, no anchor syllable for a
//! pool) is never an error: those cases are reported through sentinel return
//! values. Errors are reserved for malformed input data and I/O failures.
//!
//! # Examples
//!
//! ```
//! use lexicomb::error::{LexicombError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(LexicombError::invalid_argument("min length exceeds max length"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Lexicomb operations.
#[derive(Error, Debug)]
pub enum LexicombError {
    /// I/O errors (segment files, model documents, word lists)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A trie segment blob that cannot be decoded
    #[error("Segment error: {0}")]
    Segment(String),

    /// A phonotactic model document that is missing tables or holds invalid values
    #[error("Model error: {0}")]
    Model(String),

    /// Binary serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid argument supplied by the caller
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Errors raised by caller-provided capabilities such as segment loaders
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with LexicombError.
pub type Result<T> = std::result::Result<T, LexicombError>;

impl LexicombError {
    /// Create a new segment error.
    pub fn segment<S: Into<String>>(msg: S) -> Self {
        LexicombError::Segment(msg.into())
    }

    /// Create a new model error.
    pub fn model<S: Into<String>>(msg: S) -> Self {
        LexicombError::Model(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        LexicombError::InvalidArgument(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        LexicombError::Config(msg.into())
    }
}

impl From<bincode::Error> for LexicombError {
    fn from(err: bincode::Error) -> Self {
        LexicombError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = LexicombError::segment("bad magic");
        assert_eq!(error.to_string(), "Segment error: bad magic");

        let error = LexicombError::model("missing charTransitions");
        assert_eq!(error.to_string(), "Model error: missing charTransitions");

        let error = LexicombError::invalid_argument("empty pool");
        assert_eq!(error.to_string(), "Invalid argument: empty pool");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = LexicombError::from(io_error);

        match error {
            LexicombError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }

    #[test]
    fn test_bincode_error_conversion() {
        let bincode_error = bincode::deserialize::<String>(&[0xFF]).unwrap_err();
        let error = LexicombError::from(bincode_error);
        assert!(matches!(error, LexicombError::Serialization(_)));
    }

    #[test]
    fn test_anyhow_conversion() {
        let error = LexicombError::from(anyhow::anyhow!("loader offline"));
        assert!(error.to_string().contains("loader offline"));
    }
}
