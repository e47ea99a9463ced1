//! Core error type for danmaku conversion
//!
//! # Error Philosophy
//!
//! - Use `thiserror` for structured error handling (no `anyhow` in the library)
//! - Carry enough context to point at the offending comment or attribute
//! - Never swallow a per-comment failure: dropping a comment silently changes output

use std::fmt;

use thiserror::Error;

use crate::model::MotionType;

/// Main error type for danmaku conversion operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A comment with a motion type the layout engine has no policy for
    #[error("Unsupported danmaku type {motion} for comment \"{text}\"")]
    InvalidInput { text: String, motion: MotionType },

    /// Invalid conversion configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed input document
    #[error("Parse error: {0}")]
    Parse(String),

    /// Numeric value parsing errors
    #[error("Invalid numeric value: {0}")]
    InvalidNumeric(String),

    /// A computed screen coordinate does not fit the script's integer range
    #[error("Coordinate out of range: {0}")]
    OutOfRange(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Result type alias for conversion operations
pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// Create an unsupported-motion error for a comment
    pub fn invalid_input<T: fmt::Display>(text: T, motion: MotionType) -> Self {
        Self::InvalidInput {
            text: format!("{text}"),
            motion,
        }
    }

    /// Create configuration error from message
    pub fn config<T: fmt::Display>(message: T) -> Self {
        Self::Config(format!("{message}"))
    }

    /// Create parse error from message
    pub fn parse<T: fmt::Display>(message: T) -> Self {
        Self::Parse(format!("{message}"))
    }

    /// Create numeric error from the offending value and a reason
    pub fn invalid_numeric<T: fmt::Display>(value: T, reason: &str) -> Self {
        Self::InvalidNumeric(format!("'{value}': {reason}"))
    }

    /// Create out-of-range error from message
    pub fn out_of_range<T: fmt::Display>(message: T) -> Self {
        Self::OutOfRange(format!("{message}"))
    }

    /// Check if the caller can reasonably continue after fixing its input
    ///
    /// `InvalidInput` reaching the layout stage means the motion filter was
    /// bypassed, which is a programming error rather than bad data.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::InvalidInput { .. } => false,
            Self::Config(_)
            | Self::Parse(_)
            | Self::InvalidNumeric(_)
            | Self::OutOfRange(_)
            | Self::Io(_) => true,
        }
    }
}
