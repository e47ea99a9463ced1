//! Input parsers producing [`Comment`](crate::Comment) lists
//!
//! Parsers only decode; they never filter by motion type. The arrival
//! index of each comment is its position in the source document.

#[cfg(feature = "xml")]
#[cfg_attr(docsrs, doc(cfg(feature = "xml")))]
pub mod bilibili;

#[cfg(feature = "xml")]
pub use bilibili::parse_document;
