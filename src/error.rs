//! Error types for the AIDP query tool.
//!
//! Defines the main error enum used throughout the crate.

use thiserror::Error;

/// Main error type for AIDP query operations.
#[derive(Error, Debug)]
pub enum AidpError {
    /// Configuration errors (missing environment variables, invalid requests).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Connection errors (driver failed to establish a session).
    #[error("Connection error: {0}")]
    Connection(String),

    /// Statement errors (preamble or main SQL failed server-side).
    #[error("Statement error: {0}")]
    Statement(String),

    /// Internal errors (malformed tool arguments, unexpected states).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AidpError {
    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a connection error with the given message.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates a statement error with the given message.
    pub fn statement(msg: impl Into<String>) -> Self {
        Self::Statement(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "Configuration Error",
            Self::Connection(_) => "Connection Error",
            Self::Statement(_) => "Statement Error",
            Self::Internal(_) => "Internal Error",
        }
    }
}

/// Result type alias using AidpError.
pub type Result<T> = std::result::Result<T, AidpError>;
