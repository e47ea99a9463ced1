//! Data model for danmaku conversion
//!
//! Comments arrive fully decoded from an upstream parser and are never
//! mutated afterwards. [`ConversionConfig`] carries the screen geometry and
//! font settings every placement is computed against.

pub mod comment;
pub mod config;

pub use comment::{Comment, MotionType, PoolKind, SizeClass};
pub use config::ConversionConfig;
