//! Error categorization and suggestion utilities
//!
//! Groups `CoreError` variants so callers (the CLI in particular) can decide
//! how to report a failure without matching on every variant.

use super::CoreError;
use std::fmt;

/// Error category for filtering and reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// A comment the engine cannot lay out
    Input,

    /// Invalid conversion settings
    Configuration,

    /// Structurally broken input document
    Parsing,

    /// Well-formed document with an unusable field value
    Format,

    /// File system or stream failures
    Io,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Input => "input",
            Self::Configuration => "configuration",
            Self::Parsing => "parsing",
            Self::Format => "format",
            Self::Io => "io",
        };
        f.write_str(name)
    }
}

impl CoreError {
    /// Get the category of this error
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } | Self::OutOfRange(_) => ErrorCategory::Input,
            Self::Config(_) => ErrorCategory::Configuration,
            Self::Parse(_) => ErrorCategory::Parsing,
            Self::InvalidNumeric(_) => ErrorCategory::Format,
            Self::Io(_) => ErrorCategory::Io,
        }
    }

    /// Get a user-facing hint for resolving the error, if one applies
    #[must_use]
    pub const fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::InvalidInput { .. } => {
                Some("Filter comments with MotionType::is_supported before layout")
            }
            Self::Config(_) => Some(
                "Video size, base font size and line capacity must all be positive",
            ),
            Self::Parse(_) => Some("Check that the input is a bilibili danmaku XML document"),
            Self::InvalidNumeric(_) => {
                Some("Each `p` attribute needs numeric time, mode, size and color fields")
            }
            Self::OutOfRange(_) => {
                Some("Shorten the comment text or lower the base font size")
            }
            Self::Io(_) => None,
        }
    }
}
