//! Error types for locip
//!
//! This module defines custom error types using thiserror for better error handling.

use std::path::PathBuf;
use thiserror::Error;

/// Maximum number of response body bytes kept for an HTTP error diagnostic
pub const HTTP_ERROR_BODY_LIMIT: usize = 1024;

/// Main error type for locip
#[derive(Error, Debug)]
pub enum LocipError {
    /// Bad argument shape; usage text is printed after the message
    #[error("{0}")]
    Usage(String),

    /// Argument combination rejected; the message goes to stdout with the usage
    /// text and no `ERR:` line
    #[error("{0}")]
    Rejected(String),

    /// Bad argument value; reported without usage text
    #[error("{0}")]
    InvalidArgument(String),

    /// No AbuseIPDB credential in the environment or key files
    #[error("{0} not set")]
    MissingCredential(String),

    /// Geo database file does not exist
    #[error("database file not found: {}", .0.display())]
    DatabaseNotFound(PathBuf),

    /// Geo database exists but could not be opened or parsed
    #[error("invalid database {}: {reason}", path.display())]
    DatabaseInvalid { path: PathBuf, reason: String },

    /// Target is not a parseable IP address
    #[error("invalid IP address: {0}")]
    InvalidIp(String),

    /// No entry for the address in the database
    #[error("address not found: {0}")]
    AddressNotFound(String),

    /// Database lookup failed for another reason
    #[error("lookup error: {0}")]
    Lookup(String),

    /// Transport-level failure
    #[error("{0}")]
    Network(String),

    /// Non-2xx response
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Response body could not be decoded
    #[error("{0}")]
    Decode(String),

    /// Input list could not be opened
    #[error("Could not open IP list file '{}': {source}", path.display())]
    InputOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input list failed while being read
    #[error("Could not read IP list file '{}': {source}", path.display())]
    InputRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type alias for locip
pub type Result<T> = std::result::Result<T, LocipError>;

impl LocipError {
    /// Create a usage error
    pub fn usage<S: Into<String>>(msg: S) -> Self {
        LocipError::Usage(msg.into())
    }

    /// Create a rejection reported on stdout
    pub fn rejected<S: Into<String>>(msg: S) -> Self {
        LocipError::Rejected(msg.into())
    }

    /// Create a network error
    pub fn network<S: Into<String>>(msg: S) -> Self {
        LocipError::Network(msg.into())
    }

    /// Whether the usage text should follow this error
    pub fn shows_usage(&self) -> bool {
        matches!(self, LocipError::Usage(_) | LocipError::Rejected(_))
    }

    /// Whether the message belongs on stdout rather than in an `ERR:` line
    pub fn is_rejection(&self) -> bool {
        matches!(self, LocipError::Rejected(_))
    }
}

/// Convert from reqwest::Error
impl From<reqwest::Error> for LocipError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            LocipError::Decode(err.to_string())
        } else {
            LocipError::Network(err.to_string())
        }
    }
}
