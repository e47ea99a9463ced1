//! ASS override tag fragments for a placed comment
//!
//! A comment's override block is the concatenation of four fragments in
//! fixed order: motion, color, outline, font size. Color, outline and font
//! size are empty when the style default already matches.

use bitflags::bitflags;

use super::{Point, ScreenRect};
use crate::color::{needs_white_outline, packed_to_rgb};
use crate::model::MotionType;

/// Packed color rendered without an override
pub const DEFAULT_COLOR: u32 = 0x00FF_FFFF;

bitflags! {
    /// Which optional overrides a markup block carries
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Overrides: u8 {
        /// Primary color differs from white
        const COLOR = 1 << 0;
        /// Outline forced to white for contrast
        const WHITE_OUTLINE = 1 << 1;
        /// Font size differs from the base size
        const FONT_SIZE = 1 << 2;
    }
}

/// Override fragments for one comment
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Markup {
    /// `\move(...)` or `\a6\q2\pos(...)`
    pub motion: String,
    /// `\c&HBBGGRR&`, or empty for white
    pub color: String,
    /// `\3c&HFFFFFF&`, or empty
    pub outline: String,
    /// `\fs<n>`, or empty for the base size
    pub font_size: String,
}

impl Markup {
    /// Build the fragments for a placement
    #[must_use]
    pub fn new(
        motion: MotionType,
        rect: &ScreenRect,
        color: u32,
        font_size: i32,
        base_font_size: i32,
    ) -> Self {
        Self {
            motion: motion_fragment(motion, rect),
            color: color_fragment(color),
            outline: outline_fragment(color),
            font_size: font_size_fragment(font_size, base_font_size),
        }
    }

    /// Optional overrides present in this block
    #[must_use]
    pub fn overrides(&self) -> Overrides {
        let mut overrides = Overrides::empty();
        overrides.set(Overrides::COLOR, !self.color.is_empty());
        overrides.set(Overrides::WHITE_OUTLINE, !self.outline.is_empty());
        overrides.set(Overrides::FONT_SIZE, !self.font_size.is_empty());
        overrides
    }

    /// Full override block, braces included
    #[must_use]
    pub fn to_override_block(&self) -> String {
        let mut block = String::with_capacity(
            2 + self.motion.len() + self.color.len() + self.outline.len() + self.font_size.len(),
        );
        block.push('{');
        block.push_str(&self.motion);
        block.push_str(&self.color);
        block.push_str(&self.outline);
        block.push_str(&self.font_size);
        block.push('}');
        block
    }
}

/// Movement for moving types, anchored static position for fixed ones
///
/// A moving comment whose corners happen to coincide still gets `\move`.
#[must_use]
pub fn motion_fragment(motion: MotionType, rect: &ScreenRect) -> String {
    let ScreenRect {
        start: Point { x: x1, y: y1 },
        end: Point { x: x2, y: y2 },
    } = *rect;
    if motion.is_moving() {
        format!("\\move({x1},{y1},{x2},{y2})")
    } else {
        format!("\\a6\\q2\\pos({x1},{y1})")
    }
}

/// Primary color override in ASS byte order, empty for white
///
/// Channels are written blue-green-red as ASS expects, so a packed
/// `0xRRGGBB` shows as the color the viewer posted. Converters that write
/// the packed value straight through render red and blue swapped; this
/// output deliberately differs from theirs.
#[must_use]
pub fn color_fragment(color: u32) -> String {
    if color == DEFAULT_COLOR {
        return String::new();
    }
    let rgb = packed_to_rgb(color);
    format!("\\c&H{:02X}{:02X}{:02X}&", rgb.b, rgb.g, rgb.r)
}

/// White outline override for colors that need contrast
#[must_use]
pub fn outline_fragment(color: u32) -> String {
    if needs_white_outline(color) {
        String::from("\\3c&HFFFFFF&")
    } else {
        String::new()
    }
}

/// Font size override, empty when equal to the base size
#[must_use]
pub fn font_size_fragment(font_size: i32, base_font_size: i32) -> String {
    if font_size == base_font_size {
        String::new()
    } else {
        format!("\\fs{font_size}")
    }
}
