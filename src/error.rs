//! Error types for the Vantage library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! [`VantageError`] enum. Configuration problems (an unrecognized strategy
//! identifier, an unsupported predicate combination) are reported once and
//! abort the current operation; they are never silently defaulted.
//!
//! # Examples
//!
//! ```
//! use vantage::error::{Result, VantageError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(VantageError::configuration("unknown picksplit strategy"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Vantage operations.
#[derive(Error, Debug)]
pub enum VantageError {
    /// I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Configuration errors (unrecognized strategy identifiers, bad options).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Query errors (unsupported predicates, predicate conjunctions).
    #[error("Query error: {0}")]
    Query(String),

    /// Key parsing / well-formedness errors.
    #[error("Key error: {0}")]
    Key(String),

    /// Invalid operation (e.g. splitting fewer than two members).
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic anyhow error.
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with [`VantageError`].
pub type Result<T> = std::result::Result<T, VantageError>;

impl VantageError {
    /// Create a new configuration error.
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        VantageError::Configuration(msg.into())
    }

    /// Create a new query error.
    pub fn query<S: Into<String>>(msg: S) -> Self {
        VantageError::Query(msg.into())
    }

    /// Create a new key error.
    pub fn key<S: Into<String>>(msg: S) -> Self {
        VantageError::Key(msg.into())
    }

    /// Create a new invalid-operation error.
    pub fn invalid_operation<S: Into<String>>(msg: S) -> Self {
        VantageError::InvalidOperation(msg.into())
    }
}
