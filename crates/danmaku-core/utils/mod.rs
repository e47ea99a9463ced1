//! Utility types shared across the model, layout, track and parser modules
//!
//! Currently holds the crate-wide error type and its categorisation helpers.

pub mod errors;

pub use errors::{CoreError, ErrorCategory};
