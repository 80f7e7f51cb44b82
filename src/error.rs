//! Error types for the WikiRaider library.
//!
//! All errors are represented by the [`WikiRaiderError`] enum. Resolution,
//! download, extraction and parse errors are fatal for a run; page processing
//! errors are caught per item by the work queue and never escalate.
//!
//! # Examples
//!
//! ```
//! use wikiraider::error::{Result, WikiRaiderError};
//!
//! fn resolve() -> Result<()> {
//!     Err(WikiRaiderError::resolution("no `articlesdump` job"))
//! }
//!
//! match resolve() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for WikiRaider operations.
#[derive(Error, Debug)]
pub enum WikiRaiderError {
    /// I/O errors (file operations, streams, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// HTTP transport errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The dump status document did not describe an articles dump
    #[error("Resolution error: {0}")]
    Resolution(String),

    /// A segment could not be downloaded
    #[error("Download error: {0}")]
    Download(String),

    /// A segment could not be decompressed
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// The export XML could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// A single page failed while being tokenized
    #[error("Page processing error: {0}")]
    PageProcessing(String),

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Thread join errors
    #[error("Thread join error: {0}")]
    ThreadJoin(String),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with WikiRaiderError.
pub type Result<T> = std::result::Result<T, WikiRaiderError>;

impl WikiRaiderError {
    /// Create a new resolution error.
    pub fn resolution<S: Into<String>>(msg: S) -> Self {
        WikiRaiderError::Resolution(msg.into())
    }

    /// Create a new download error.
    pub fn download<S: Into<String>>(msg: S) -> Self {
        WikiRaiderError::Download(msg.into())
    }

    /// Create a new extraction error.
    pub fn extraction<S: Into<String>>(msg: S) -> Self {
        WikiRaiderError::Extraction(msg.into())
    }

    /// Create a new parse error.
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        WikiRaiderError::Parse(msg.into())
    }

    /// Create a new page processing error.
    pub fn page_processing<S: Into<String>>(msg: S) -> Self {
        WikiRaiderError::PageProcessing(msg.into())
    }

    /// Create a new invalid operation error.
    pub fn invalid_operation<S: Into<String>>(msg: S) -> Self {
        WikiRaiderError::InvalidOperation(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        WikiRaiderError::Other(format!("Invalid argument: {}", msg.into()))
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        WikiRaiderError::Other(msg.into())
    }
}
