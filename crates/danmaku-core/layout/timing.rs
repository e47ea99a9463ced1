//! On-screen duration rules
//!
//! Fixed comments stay for a flat four seconds. Scrolling comments get a
//! seven second base plus a length-dependent bonus capped at six seconds,
//! then the configured tune offset.

use crate::model::{Comment, MotionType};

/// Lifetime of a top or bottom comment
pub const FIXED_DURATION: f64 = 4.0;
/// Base lifetime of a scrolling comment
pub const SCROLL_BASE_DURATION: f64 = 7.0;
/// Maximum length bonus for a scrolling comment
pub const SCROLL_MAX_BONUS: f64 = 6.0;

/// Length bonus for a scrolling comment of `text_length` characters
///
/// Short texts (< 5) earn `len / 1.5`, medium texts (< 12) earn whole
/// halves `len / 2` rounded down, longer texts the flat maximum.
#[must_use]
pub fn length_bonus(text_length: usize) -> f64 {
    match text_length {
        0..=4 => text_length as f64 / 1.5,
        5..=11 => (text_length / 2) as f64,
        _ => SCROLL_MAX_BONUS,
    }
}

/// Seconds a comment stays on screen
///
/// `offset` applies to moving comments only and may be negative; the
/// result is never below zero.
#[must_use]
pub fn duration(motion: MotionType, text_length: usize, offset: f64) -> f64 {
    if motion.is_fixed() {
        return FIXED_DURATION;
    }
    (SCROLL_BASE_DURATION + length_bonus(text_length) + offset).max(0.0)
}

/// Start and end time of a comment, with `end >= start`
#[must_use]
pub fn time_span(comment: &Comment, offset: f64) -> (f64, f64) {
    let start = comment.show_time;
    let end = start + duration(comment.motion, comment.text_length(), offset);
    (start, end)
}
