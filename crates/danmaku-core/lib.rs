//! # danmaku-core
//!
//! Layout and timing engine that turns a timed list of video comments
//! ("danmaku") into an ASS subtitle track with absolute screen coordinates
//! and movement directives.
//!
//! ## Pipeline
//!
//! - **Parse** (optional, feature `xml`): bilibili XML into [`Comment`]s
//! - **Filter**: keep the six motion types with a layout policy
//! - **Layout**: duration, screen corners and override markup per comment,
//!   with slot allocation for top- and bottom-anchored comments
//! - **Assemble**: script header plus one `Dialogue:` line per comment
//!
//! ## Quick Start
//!
//! ```rust
//! use danmaku_core::{convert, Comment, ConversionConfig, MotionType, SizeClass};
//!
//! let comments = vec![
//!     Comment::new(MotionType::Scroll, 0.0, "first!").with_index(0),
//!     Comment::new(MotionType::Bottom, 1.0, "bottom line")
//!         .with_index(1)
//!         .with_color(0x00FF00)
//!         .with_size(SizeClass::Large),
//! ];
//!
//! let config = ConversionConfig::new(1920, 1080);
//! let script = convert(&comments, &config)?;
//! assert!(script.starts_with("[Script Info]"));
//! assert_eq!(script.lines().filter(|l| l.starts_with("Dialogue:")).count(), 2);
//! # Ok::<(), danmaku_core::CoreError>(())
//! ```
//!
//! ## Concurrency
//!
//! Conversion is single-threaded and deterministic. Slot registries are
//! threaded through the comment list in arrival order; independent lists
//! may be converted in parallel, each with its own [`track::TrackAssembler`].

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]

pub mod color;
pub mod layout;
pub mod model;
pub mod parser;
pub mod track;
pub mod utils;

pub use layout::{LayoutEngine, LayoutResult, Point, ScreenRect};
pub use model::{Comment, ConversionConfig, MotionType, PoolKind, SizeClass};
pub use track::{convert, TrackAssembler, TrackStats};
pub use utils::{CoreError, ErrorCategory};

/// Crate version for runtime compatibility checks
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type for core operations, using the crate's unified `CoreError`.
pub type Result<T> = core::result::Result<T, CoreError>;

/// Parse a bilibili XML document and convert it in one step
///
/// # Errors
///
/// Returns parse errors from [`parser::parse_document`] and conversion
/// errors from [`convert`].
#[cfg(feature = "xml")]
#[cfg_attr(docsrs, doc(cfg(feature = "xml")))]
pub fn convert_xml(xml: &str, config: &ConversionConfig) -> Result<String> {
    let comments = parser::parse_document(xml)?;
    convert(&comments, config)
}
