//! Bilibili danmaku XML parser
//!
//! Documents look like:
//!
//! ```xml
//! <i>
//!   <chatid>200887808</chatid>
//!   <d p="12.5,1,25,16777215,1600000000,0,abcd1234,4242">comment text</d>
//! </i>
//! ```
//!
//! Every child of the root carrying a `p` attribute is a comment. `p` holds
//! `time,mode,size,color[,send_time,pool,sender_hash,id]`; the first four
//! fields are required.

use std::str::FromStr;

use log::debug;
use quick_xml::{events::Event, Reader};

use crate::{
    model::{Comment, MotionType, PoolKind, SizeClass},
    utils::CoreError,
    Result,
};

/// Remove control characters that are illegal in XML 1.0
///
/// Tab, line feed and carriage return are kept.
#[must_use]
pub fn strip_control_chars(xml: &str) -> String {
    xml.chars()
        .filter(|&ch| !matches!(ch, '\u{0}'..='\u{8}' | '\u{b}' | '\u{c}' | '\u{e}'..='\u{1f}'))
        .collect()
}

/// Parse a bilibili XML document into comments in document order
///
/// An empty or whitespace-only document yields an empty list.
///
/// # Errors
///
/// Returns [`CoreError::Parse`] for malformed XML and
/// [`CoreError::InvalidNumeric`] for unusable `p` attribute fields.
///
/// # Example
///
/// ```rust
/// use danmaku_core::{parser::parse_document, MotionType};
///
/// let xml = r#"<i><d p="1.5,5,25,16711680">top &amp; red</d></i>"#;
/// let comments = parse_document(xml)?;
/// assert_eq!(comments.len(), 1);
/// assert_eq!(comments[0].motion, MotionType::Top);
/// assert_eq!(comments[0].color, 0xFF0000);
/// assert_eq!(comments[0].text, "top & red");
/// # Ok::<(), danmaku_core::CoreError>(())
/// ```
pub fn parse_document(xml: &str) -> Result<Vec<Comment>> {
    let cleaned = strip_control_chars(xml);
    if cleaned.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut reader = Reader::from_str(&cleaned);
    reader.config_mut().trim_text(false);

    let mut comments = Vec::new();
    let mut pending: Option<Comment> = None;
    let mut depth = 0usize;

    loop {
        let event = reader.read_event().map_err(|err| {
            CoreError::parse(format!("at byte {}: {err}", reader.buffer_position()))
        })?;

        match event {
            Event::Start(element) => {
                depth += 1;
                if depth == 2 {
                    pending = comment_from_element(&element, comments.len())?;
                }
            }
            Event::Empty(element) => {
                if depth == 1 {
                    if let Some(comment) = comment_from_element(&element, comments.len())? {
                        comments.push(comment);
                    }
                }
            }
            Event::Text(text) => {
                if let Some(comment) = pending.as_mut() {
                    let text = text
                        .unescape()
                        .map_err(|err| CoreError::parse(format!("comment text: {err}")))?;
                    comment.text.push_str(&text);
                }
            }
            Event::CData(data) => {
                if let Some(comment) = pending.as_mut() {
                    comment
                        .text
                        .push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::End(_) => {
                if depth == 2 {
                    if let Some(comment) = pending.take() {
                        comments.push(comment);
                    }
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    debug!("parsed {} comments", comments.len());
    Ok(comments)
}

/// Build a comment from an element's `p` attribute, if it has one
fn comment_from_element(
    element: &quick_xml::events::BytesStart<'_>,
    index: usize,
) -> Result<Option<Comment>> {
    let attribute = element
        .try_get_attribute("p")
        .map_err(|err| CoreError::parse(format!("attribute error: {err}")))?;
    let Some(attribute) = attribute else {
        return Ok(None);
    };
    let value = attribute
        .unescape_value()
        .map_err(|err| CoreError::parse(format!("attribute p: {err}")))?;
    parse_p_attribute(&value, index).map(Some)
}

/// Decode a `p` attribute into a comment with empty text
///
/// # Errors
///
/// Returns [`CoreError::InvalidNumeric`] naming the first field that is
/// missing or fails to parse.
pub fn parse_p_attribute(value: &str, index: usize) -> Result<Comment> {
    let fields: Vec<&str> = value.split(',').map(str::trim).collect();

    let show_time: f64 = required(&fields, 0, "time")?;
    let mode: u8 = required(&fields, 1, "mode")?;
    let size: f64 = required(&fields, 2, "size")?;
    let color: u32 = required(&fields, 3, "color")?;

    if !show_time.is_finite() {
        return Err(CoreError::invalid_numeric(fields[0], "time must be finite"));
    }

    let mut comment = Comment::new(MotionType::from_mode(mode), show_time, String::new())
        .with_size(SizeClass::from_points(size))
        .with_color(color)
        .with_index(index);
    comment.send_time = optional(&fields, 4, "send time")?;
    comment.pool = optional::<u8>(&fields, 5, "pool")?.map_or(PoolKind::Normal, PoolKind::from_pool);
    comment.sender_hash = fields
        .get(6)
        .filter(|hash| !hash.is_empty())
        .map(|hash| (*hash).to_string());
    comment.id = optional(&fields, 7, "id")?;

    Ok(comment)
}

fn required<T: FromStr>(fields: &[&str], position: usize, name: &str) -> Result<T> {
    let raw = fields
        .get(position)
        .filter(|raw| !raw.is_empty())
        .ok_or_else(|| CoreError::invalid_numeric(fields.join(","), &format!("missing {name}")))?;
    raw.parse()
        .map_err(|_| CoreError::invalid_numeric(raw, &format!("invalid {name}")))
}

fn optional<T: FromStr>(fields: &[&str], position: usize, name: &str) -> Result<Option<T>> {
    match fields.get(position) {
        Some(raw) if !raw.is_empty() => raw
            .parse()
            .map(Some)
            .map_err(|_| CoreError::invalid_numeric(raw, &format!("invalid {name}"))),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_p_attribute() {
        let comment =
            parse_p_attribute("12.5,4,36,255,1600000000,1,deadbeef,987654321", 3).unwrap();
        assert!((comment.show_time - 12.5).abs() < 1e-9);
        assert_eq!(comment.motion, MotionType::Bottom);
        assert_eq!(comment.size, SizeClass::Large);
        assert_eq!(comment.color, 0x0000FF);
        assert_eq!(comment.index, 3);
        assert_eq!(comment.send_time, Some(1_600_000_000));
        assert_eq!(comment.pool, PoolKind::Subtitle);
        assert_eq!(comment.sender_hash.as_deref(), Some("deadbeef"));
        assert_eq!(comment.id, Some(987_654_321));
    }

    #[test]
    fn minimal_p_attribute() {
        let comment = parse_p_attribute("0,7,18,0", 0).unwrap();
        assert_eq!(comment.motion, MotionType::Other(7));
        assert_eq!(comment.size, SizeClass::Small);
        assert_eq!(comment.pool, PoolKind::Normal);
        assert_eq!(comment.sender_hash, None);
        assert_eq!(comment.id, None);
    }

    #[test]
    fn p_attribute_errors_name_the_field() {
        let err = parse_p_attribute("abc,1,25,0", 0).unwrap_err();
        assert!(matches!(err, CoreError::InvalidNumeric(ref msg) if msg.contains("time")));

        let err = parse_p_attribute("1.0,1,25", 0).unwrap_err();
        assert!(matches!(err, CoreError::InvalidNumeric(ref msg) if msg.contains("missing color")));

        let err = parse_p_attribute("1.0,1,25,red", 0).unwrap_err();
        assert!(matches!(err, CoreError::InvalidNumeric(ref msg) if msg.contains("color")));

        let err = parse_p_attribute("inf,1,25,0", 0).unwrap_err();
        assert!(matches!(err, CoreError::InvalidNumeric(_)));
    }

    #[test]
    fn control_characters_are_stripped() {
        assert_eq!(strip_control_chars("a\u{1}b\u{b}c\td\ne"), "abc\td\ne");
    }

    #[test]
    fn document_order_sets_index() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<i>
  <chatserver>chat.bilibili.com</chatserver>
  <d p="3.0,1,25,16777215">first</d>
  <d p="1.0,5,25,0">second</d>
  <d p="2.0,4,25,65280"/>
</i>"#;
        let comments = parse_document(xml).unwrap();
        assert_eq!(comments.len(), 3);
        assert_eq!(comments[0].text, "first");
        assert_eq!(comments[0].index, 0);
        assert_eq!(comments[1].motion, MotionType::Top);
        assert_eq!(comments[1].index, 1);
        assert_eq!(comments[2].text, "");
        assert_eq!(comments[2].color, 0x00FF00);
        assert_eq!(comments[2].index, 2);
    }

    #[test]
    fn entities_and_cdata_are_decoded() {
        let xml = r#"<i><d p="0,1,25,0">a &lt;b&gt; &amp; c</d><d p="0,1,25,0"><![CDATA[<raw>]]></d></i>"#;
        let comments = parse_document(xml).unwrap();
        assert_eq!(comments[0].text, "a <b> & c");
        assert_eq!(comments[1].text, "<raw>");
    }

    #[test]
    fn empty_document() {
        assert!(parse_document("").unwrap().is_empty());
        assert!(parse_document("  \n ").unwrap().is_empty());
        assert!(parse_document("<i></i>").unwrap().is_empty());
    }

    #[test]
    fn malformed_document() {
        let err = parse_document(r#"<i><d p="0,1,25,0">oops</x></i>"#).unwrap_err();
        assert_eq!(err.category(), crate::ErrorCategory::Parsing);
    }
}
