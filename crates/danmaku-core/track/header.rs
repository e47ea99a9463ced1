//! Script header for generated tracks
//!
//! One `[Script Info]` block, a single style every dialogue line refers to,
//! and the `[Events]` format line. The header ends with a newline; dialogue
//! lines follow directly.

use crate::model::ConversionConfig;

/// Name of the only style in the script
pub const STYLE_NAME: &str = "AcplayDefault";

/// Field order of the `[Events]` section
pub const EVENTS_FORMAT: &str =
    "Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text";

const STYLES_FORMAT: &str = "Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding";

/// Render the script header for `config`
///
/// The style uses white primary and secondary colors, black outline and
/// back colors, a one pixel outline, bottom-center alignment and 20 pixel
/// margins.
#[must_use]
pub fn script_header(config: &ConversionConfig) -> String {
    format!(
        "[Script Info]\n\
         ScriptType: v4.00+\n\
         Collisions: Normal\n\
         PlayResX: {width}\n\
         PlayResY: {height}\n\
         \n\
         [V4+ Styles]\n\
         {STYLES_FORMAT}\n\
         Style: {STYLE_NAME}, {font}, {size}, &H00FFFFFF, &H00FFFFFF, &H00000000, &H00000000, 0, 0, 0, 0, 100, 100, 0.00, 0.00, 1, 1, 0, 2, 20, 20, 20, 0\n\
         \n\
         [Events]\n\
         {EVENTS_FORMAT}\n",
        width = config.video_width,
        height = config.video_height,
        font = config.font_name,
        size = config.base_font_size,
    )
}
