//! Error types for danmaku conversion and cross-module error handling
//!
//! Provides the main `CoreError` enum used by every fallible operation in the
//! crate, together with `ErrorCategory` for grouping errors in callers.
//!
//! # Examples
//!
//! ```rust
//! use danmaku_core::utils::errors::{CoreError, ErrorCategory};
//!
//! let err = CoreError::config("line capacity must be positive");
//! assert_eq!(err.category(), ErrorCategory::Configuration);
//! assert!(err.suggestion().is_some());
//! ```

mod category;
mod core;

pub use category::ErrorCategory;
pub use self::core::{CoreError, Result};

/// Convert from standard I/O errors
impl From<std::io::Error> for CoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(format!("{err}"))
    }
}

/// Convert from integer parse errors
impl From<std::num::ParseIntError> for CoreError {
    fn from(err: std::num::ParseIntError) -> Self {
        Self::InvalidNumeric(format!("Integer parse error: {err}"))
    }
}

/// Convert from float parse errors
impl From<std::num::ParseFloatError> for CoreError {
    fn from(err: std::num::ParseFloatError) -> Self {
        Self::InvalidNumeric(format!("Float parse error: {err}"))
    }
}
