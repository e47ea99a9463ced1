//! ASS timestamp formatting
//!
//! Times are written as `H:MM:SS.CC`. Seconds are first rounded to whole
//! milliseconds, absorbing binary float noise such as `5.1 * 1000 =
//! 5099.999...`, and then truncated to centiseconds.

/// Convert seconds to whole centiseconds
///
/// Negative and non-finite inputs map to zero.
#[must_use]
pub fn seconds_to_centiseconds(seconds: f64) -> u64 {
    if !seconds.is_finite() || seconds <= 0.0 {
        return 0;
    }
    let millis = (seconds * 1000.0).round() as u64;
    millis / 10
}

/// Format centiseconds as `H:MM:SS.CC`
#[must_use]
pub fn format_ass_time(centiseconds: u64) -> String {
    let hours = centiseconds / 360_000;
    let remainder = centiseconds % 360_000;
    let minutes = remainder / 6000;
    let remainder = remainder % 6000;
    let seconds = remainder / 100;
    let cs = remainder % 100;

    format!("{hours}:{minutes:02}:{seconds:02}.{cs:02}")
}

/// Format seconds as an ASS timestamp
#[must_use]
pub fn format_seconds(seconds: f64) -> String {
    format_ass_time(seconds_to_centiseconds(seconds))
}
