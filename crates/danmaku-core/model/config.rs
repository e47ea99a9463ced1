//! Conversion settings
//!
//! Screen geometry, font and spacing parameters shared by the layout engine
//! and the track header. All fields have defaults except the video size,
//! which callers normally take from the video being subtitled.

use crate::{utils::CoreError, Result};

/// Default font, chosen for CJK coverage
pub const DEFAULT_FONT_NAME: &str = "Microsoft YaHei";
/// Default base font size in script pixels
pub const DEFAULT_FONT_SIZE: i32 = 64;
/// Default number of rotating scroll lines
pub const DEFAULT_LINE_CAPACITY: usize = 14;
/// Default distance between the lowest bottom slot and the screen edge
pub const DEFAULT_BOTTOM_MARGIN: i32 = 180;
/// Largest accepted video width or height
pub const MAX_VIDEO_DIMENSION: i32 = 16_384;
/// Largest accepted base font size
pub const MAX_FONT_SIZE: i32 = 4_096;

/// Settings for converting one comment list
///
/// # Examples
///
/// ```rust
/// use danmaku_core::ConversionConfig;
///
/// let config = ConversionConfig::new(1280, 720)
///     .with_font_size(48)
///     .with_duration_offset(-0.5);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.line_capacity, 14);
/// ```
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionConfig {
    /// Script resolution width (`PlayResX`)
    pub video_width: i32,
    /// Script resolution height (`PlayResY`)
    pub video_height: i32,
    /// Font family written into the style definition
    pub font_name: String,
    /// Font size of a normal-size comment
    pub base_font_size: i32,
    /// Number of scroll lines comments rotate through
    pub line_capacity: usize,
    /// Offset of bottom slot 0 from the bottom edge
    pub bottom_margin: i32,
    /// Seconds added to every scrolling comment's duration, may be negative
    pub duration_offset: f64,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self::new(1920, 1080)
    }
}

impl ConversionConfig {
    /// Create a config for the given script resolution with default font settings
    #[must_use]
    pub fn new(video_width: i32, video_height: i32) -> Self {
        Self {
            video_width,
            video_height,
            font_name: DEFAULT_FONT_NAME.to_string(),
            base_font_size: DEFAULT_FONT_SIZE,
            line_capacity: DEFAULT_LINE_CAPACITY,
            bottom_margin: DEFAULT_BOTTOM_MARGIN,
            duration_offset: 0.0,
        }
    }

    /// Set the font family
    #[must_use]
    pub fn with_font_name(mut self, font_name: impl Into<String>) -> Self {
        self.font_name = font_name.into();
        self
    }

    /// Set the base font size
    #[must_use]
    pub const fn with_font_size(mut self, base_font_size: i32) -> Self {
        self.base_font_size = base_font_size;
        self
    }

    /// Set the number of scroll lines
    #[must_use]
    pub const fn with_line_capacity(mut self, line_capacity: usize) -> Self {
        self.line_capacity = line_capacity;
        self
    }

    /// Set the bottom margin
    #[must_use]
    pub const fn with_bottom_margin(mut self, bottom_margin: i32) -> Self {
        self.bottom_margin = bottom_margin;
        self
    }

    /// Set the scroll duration tune offset in seconds
    #[must_use]
    pub const fn with_duration_offset(mut self, duration_offset: f64) -> Self {
        self.duration_offset = duration_offset;
        self
    }

    /// Check that the settings describe a usable screen
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Config`] for dimensions outside
    /// `1..=MAX_VIDEO_DIMENSION`, a font size outside `1..=MAX_FONT_SIZE`,
    /// a bottom margin larger than the video height in either direction,
    /// a zero line capacity, an empty font name, or a non-finite duration
    /// offset.
    pub fn validate(&self) -> Result<()> {
        let dimensions = 1..=MAX_VIDEO_DIMENSION;
        if !dimensions.contains(&self.video_width) || !dimensions.contains(&self.video_height) {
            return Err(CoreError::config(format!(
                "video size must be within 1..={MAX_VIDEO_DIMENSION}, got {}x{}",
                self.video_width, self.video_height
            )));
        }
        if !(1..=MAX_FONT_SIZE).contains(&self.base_font_size) {
            return Err(CoreError::config(format!(
                "base font size must be within 1..={MAX_FONT_SIZE}, got {}",
                self.base_font_size
            )));
        }
        if self.bottom_margin.unsigned_abs() > self.video_height.unsigned_abs() {
            return Err(CoreError::config(format!(
                "bottom margin {} exceeds video height {}",
                self.bottom_margin, self.video_height
            )));
        }
        if self.line_capacity == 0 {
            return Err(CoreError::config("line capacity must be at least 1"));
        }
        if self.font_name.trim().is_empty() {
            return Err(CoreError::config("font name must not be empty"));
        }
        if !self.duration_offset.is_finite() {
            return Err(CoreError::config(format!(
                "duration offset must be finite, got {}",
                self.duration_offset
            )));
        }
        Ok(())
    }
}
