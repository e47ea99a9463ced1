//! Comment records and their classification enums
//!
//! A [`Comment`] is one timed piece of overlay text. Its [`MotionType`]
//! decides whether the layout engine scrolls it across the screen or pins it
//! to a top/bottom slot; [`SizeClass`] shifts its font size relative to the
//! configured base size.

use std::fmt;

/// Motion class of a comment
///
/// Numeric modes follow the bilibili player: 1-3 scroll right to left,
/// 4 is bottom-anchored, 5 top-anchored, 6 scrolls left to right. Anything
/// else (advanced, code, ...) is carried as [`MotionType::Other`] and skipped
/// by the track assembler.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionType {
    /// Scroll from the right edge to the left edge
    Scroll,
    /// Scroll variant treated identically to [`MotionType::Scroll`]
    ScrollVariantA,
    /// Scroll variant treated identically to [`MotionType::Scroll`]
    ScrollVariantB,
    /// Scroll from the left edge to the right edge
    Reverse,
    /// Static, anchored to the top of the screen
    Top,
    /// Static, anchored to the bottom of the screen
    Bottom,
    /// Any mode without a layout policy, keeping the raw mode number
    Other(u8),
}

impl MotionType {
    /// Map a bilibili mode number to a motion type
    ///
    /// Modes 1 to 3 scroll right to left, 4 is bottom, 5 is top and 6
    /// scrolls left to right. Every other mode, including advanced (7) and
    /// code (8) comments, becomes [`MotionType::Other`] and is filtered out
    /// before layout. Converters that treat every unknown mode and mode 6
    /// as plain scrolling will show those comments where this mapping does
    /// not, and will move mode 6 in the opposite direction.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use danmaku_core::MotionType;
    ///
    /// assert_eq!(MotionType::from_mode(1), MotionType::Scroll);
    /// assert_eq!(MotionType::from_mode(4), MotionType::Bottom);
    /// assert_eq!(MotionType::from_mode(6), MotionType::Reverse);
    /// assert_eq!(MotionType::from_mode(7), MotionType::Other(7));
    /// ```
    #[must_use]
    pub const fn from_mode(mode: u8) -> Self {
        match mode {
            1 => Self::Scroll,
            2 => Self::ScrollVariantA,
            3 => Self::ScrollVariantB,
            4 => Self::Bottom,
            5 => Self::Top,
            6 => Self::Reverse,
            other => Self::Other(other),
        }
    }

    /// Whether the layout engine has a placement policy for this type
    #[must_use]
    pub const fn is_supported(self) -> bool {
        !matches!(self, Self::Other(_))
    }

    /// Whether the comment moves across the screen
    #[must_use]
    pub const fn is_moving(self) -> bool {
        matches!(
            self,
            Self::Scroll | Self::ScrollVariantA | Self::ScrollVariantB | Self::Reverse
        )
    }

    /// Whether the comment is pinned to a top or bottom slot
    #[must_use]
    pub const fn is_fixed(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

impl fmt::Display for MotionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scroll => f.write_str("scroll"),
            Self::ScrollVariantA => f.write_str("scroll-a"),
            Self::ScrollVariantB => f.write_str("scroll-b"),
            Self::Reverse => f.write_str("reverse"),
            Self::Top => f.write_str("top"),
            Self::Bottom => f.write_str("bottom"),
            Self::Other(mode) => write!(f, "other({mode})"),
        }
    }
}

/// Font size class of a comment
///
/// The discriminants are the player's nominal point sizes; only the distance
/// from [`SizeClass::Normal`] matters for layout.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SizeClass {
    Small = 18,
    #[default]
    Normal = 25,
    Large = 36,
}

impl SizeClass {
    /// Classify a raw point size: below 25 is small, 36 and above is large
    #[must_use]
    pub fn from_points(points: f64) -> Self {
        if points < 25.0 {
            Self::Small
        } else if points >= 36.0 {
            Self::Large
        } else {
            Self::Normal
        }
    }

    /// Nominal point size of this class
    #[must_use]
    pub const fn points(self) -> i32 {
        self as i32
    }

    /// Offset added to the base font size
    #[must_use]
    pub const fn font_delta(self) -> i32 {
        self.points() - Self::Normal.points()
    }
}

/// Comment pool the comment was posted to
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PoolKind {
    #[default]
    Normal,
    Subtitle,
    Special,
}

impl PoolKind {
    /// Map a bilibili pool number (0 normal, 1 subtitle, anything else special)
    #[must_use]
    pub const fn from_pool(pool: u8) -> Self {
        match pool {
            0 => Self::Normal,
            1 => Self::Subtitle,
            _ => Self::Special,
        }
    }
}

/// One timed overlay comment
///
/// Only `motion`, `show_time`, `text`, `size`, `color` and `index` influence
/// layout. The remaining fields are provenance metadata kept for callers.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    /// Motion class
    pub motion: MotionType,
    /// Seconds from the start of the video
    pub show_time: f64,
    /// Comment body
    pub text: String,
    /// Font size class
    pub size: SizeClass,
    /// Packed `0xRRGGBB` color
    pub color: u32,
    /// Arrival ordinal, drives scroll line rotation
    pub index: usize,
    /// Unix timestamp the comment was posted at
    pub send_time: Option<i64>,
    /// Pool the comment belongs to
    pub pool: PoolKind,
    /// Hash of the sender id
    pub sender_hash: Option<String>,
    /// Database id of the comment
    pub id: Option<i64>,
}

impl Comment {
    /// Create a white, normal-size comment with no metadata
    pub fn new(motion: MotionType, show_time: f64, text: impl Into<String>) -> Self {
        Self {
            motion,
            show_time,
            text: text.into(),
            size: SizeClass::Normal,
            color: 0x00FF_FFFF,
            index: 0,
            send_time: None,
            pool: PoolKind::Normal,
            sender_hash: None,
            id: None,
        }
    }

    /// Set the size class
    #[must_use]
    pub fn with_size(mut self, size: SizeClass) -> Self {
        self.size = size;
        self
    }

    /// Set the packed RGB color (bits above 24 are dropped)
    #[must_use]
    pub fn with_color(mut self, color: u32) -> Self {
        self.color = color & 0x00FF_FFFF;
        self
    }

    /// Set the arrival index
    #[must_use]
    pub fn with_index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    /// Number of characters, used as the width estimate
    #[must_use]
    pub fn text_length(&self) -> usize {
        self.text.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_mapping() {
        assert_eq!(MotionType::from_mode(2), MotionType::ScrollVariantA);
        assert_eq!(MotionType::from_mode(3), MotionType::ScrollVariantB);
        assert_eq!(MotionType::from_mode(5), MotionType::Top);
        assert_eq!(MotionType::from_mode(6), MotionType::Reverse);
        assert_eq!(MotionType::from_mode(0), MotionType::Other(0));
    }

    #[test]
    fn advanced_and_code_modes_are_unsupported() {
        for mode in [7, 8, 9, 255] {
            let motion = MotionType::from_mode(mode);
            assert_eq!(motion, MotionType::Other(mode));
            assert!(!motion.is_supported());
        }
    }

    #[test]
    fn motion_classes_partition_supported_types() {
        for mode in 0..=9 {
            let motion = MotionType::from_mode(mode);
            if motion.is_supported() {
                assert_ne!(motion.is_moving(), motion.is_fixed(), "{motion}");
            } else {
                assert!(!motion.is_moving() && !motion.is_fixed());
            }
        }
    }

    #[test]
    fn size_classification() {
        assert_eq!(SizeClass::from_points(12.0), SizeClass::Small);
        assert_eq!(SizeClass::from_points(25.0), SizeClass::Normal);
        assert_eq!(SizeClass::from_points(35.9), SizeClass::Normal);
        assert_eq!(SizeClass::from_points(36.0), SizeClass::Large);

        assert_eq!(SizeClass::Small.font_delta(), -7);
        assert_eq!(SizeClass::Normal.font_delta(), 0);
        assert_eq!(SizeClass::Large.font_delta(), 11);
    }

    #[test]
    fn text_length_counts_characters_not_bytes() {
        let comment = Comment::new(MotionType::Scroll, 0.0, "前方高能");
        assert_eq!(comment.text_length(), 4);
    }

    #[test]
    fn color_is_masked_to_24_bits() {
        let comment = Comment::new(MotionType::Top, 0.0, "x").with_color(0xFF12_3456);
        assert_eq!(comment.color, 0x0012_3456);
    }
}
