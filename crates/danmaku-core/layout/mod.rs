//! Layout and timing engine
//!
//! Places one comment at a time: computes its lifetime, its screen corners
//! and the override markup matching that placement. Scrolling comments
//! rotate through `line_capacity` lines by arrival index; top and bottom
//! comments take a slot from their class's [`SlotRegistry`].
//!
//! # Example
//!
//! ```rust
//! use danmaku_core::{Comment, ConversionConfig, MotionType};
//! use danmaku_core::layout::LayoutEngine;
//!
//! let config = ConversionConfig::new(1920, 1080);
//! let mut engine = LayoutEngine::new(&config);
//!
//! let first = engine.layout(&Comment::new(MotionType::Bottom, 0.0, "a"))?;
//! let second = engine.layout(&Comment::new(MotionType::Bottom, 0.0, "b"))?;
//! assert_eq!(first.slot, Some(0));
//! assert_eq!(second.slot, Some(1));
//! # Ok::<(), danmaku_core::CoreError>(())
//! ```
//!
//! # Ordering
//!
//! Slot registries are mutated on every fixed placement and eviction
//! depends on the start time of the comment being placed, so comments must
//! be laid out in arrival order on a single engine.

pub mod markup;
pub mod slots;
pub mod timing;

use log::debug;

use crate::{
    model::{Comment, ConversionConfig, MotionType},
    utils::CoreError,
    Result,
};

pub use markup::{Markup, Overrides};
pub use slots::{SlotRegistries, SlotRegistry};

/// Point in script coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Create a point
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Start and end corner of a placement
///
/// Equal corners describe a static position, distinct corners a linear
/// movement from `start` to `end` over the comment's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScreenRect {
    pub start: Point,
    pub end: Point,
}

impl ScreenRect {
    /// Movement from `start` to `end`
    #[must_use]
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Static placement at `point`
    #[must_use]
    pub const fn fixed(point: Point) -> Self {
        Self {
            start: point,
            end: point,
        }
    }

    /// Whether both corners coincide
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.start == self.end
    }
}

/// Placement of a single comment
///
/// Computed once per comment and consumed by the track formatter.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult {
    /// Seconds at which the comment appears
    pub start_time: f64,
    /// Seconds at which it disappears, never before `start_time`
    pub end_time: f64,
    /// Screen corners
    pub rect: ScreenRect,
    /// Resolved font size
    pub font_size: i32,
    /// Slot taken in a fixed registry, `None` for moving comments
    pub slot: Option<usize>,
    /// Override fragments
    pub markup: Markup,
}

/// Font size of a comment: base size shifted by its size class
#[must_use]
pub const fn resolve_font_size(comment: &Comment, base_font_size: i32) -> i32 {
    base_font_size + comment.size.font_delta()
}

/// Lay out one comment against a registry pair
///
/// Fixed comments take a slot from `registries` and occupy it until their
/// end time. Moving comments leave the registries untouched. Positions are
/// computed in 64-bit arithmetic and must fit the script's `i32` range.
///
/// # Errors
///
/// Returns [`CoreError::Config`] if `config` fails validation,
/// [`CoreError::InvalidInput`] for [`MotionType::Other`] and
/// [`CoreError::OutOfRange`] when a coordinate overflows; the registries
/// are not modified in the first two cases.
pub fn layout_comment(
    comment: &Comment,
    registries: &mut SlotRegistries,
    config: &ConversionConfig,
) -> Result<LayoutResult> {
    config.validate()?;
    if !comment.motion.is_supported() {
        return Err(CoreError::invalid_input(&comment.text, comment.motion));
    }

    let (start_time, end_time) = timing::time_span(comment, config.duration_offset);
    let font_size = resolve_font_size(comment, config.base_font_size);
    let base = i64::from(config.base_font_size);
    let video_width = i64::from(config.video_width);
    let half_width = base.saturating_mul(widen(comment.text_length())) / 2;

    let (rect, slot) = match comment.motion {
        MotionType::Scroll | MotionType::ScrollVariantA | MotionType::ScrollVariantB => {
            let y = scroll_line_y(comment, font_size, config)?;
            let rect = ScreenRect::new(
                Point::new(coordinate(video_width + half_width, comment)?, y),
                Point::new(coordinate(-half_width, comment)?, y),
            );
            (rect, None)
        }
        MotionType::Reverse => {
            let y = scroll_line_y(comment, font_size, config)?;
            let rect = ScreenRect::new(
                Point::new(coordinate(-half_width, comment)?, y),
                Point::new(coordinate(video_width + half_width, comment)?, y),
            );
            (rect, None)
        }
        MotionType::Bottom => {
            let slot = registries.bottom.choose_slot(start_time);
            registries.bottom.occupy(slot, end_time);
            debug!(
                "bottom slot {slot} for {:?} until {end_time:.2}s",
                comment.text
            );
            let offset = base
                .saturating_mul(widen(slot))
                .saturating_add(i64::from(config.bottom_margin));
            let y = coordinate(i64::from(config.video_height).saturating_sub(offset), comment)?;
            (
                ScreenRect::fixed(Point::new(config.video_width / 2, y)),
                Some(slot),
            )
        }
        MotionType::Top => {
            let slot = registries.top.choose_slot(start_time);
            registries.top.occupy(slot, end_time);
            debug!("top slot {slot} for {:?} until {end_time:.2}s", comment.text);
            let y = coordinate(base.saturating_mul(widen(slot)).saturating_add(1), comment)?;
            (
                ScreenRect::fixed(Point::new(config.video_width / 2, y)),
                Some(slot),
            )
        }
        MotionType::Other(_) => {
            return Err(CoreError::invalid_input(&comment.text, comment.motion));
        }
    };

    let markup = Markup::new(
        comment.motion,
        &rect,
        comment.color,
        font_size,
        config.base_font_size,
    );

    Ok(LayoutResult {
        start_time,
        end_time,
        rect,
        font_size,
        slot,
        markup,
    })
}

/// Vertical position of a scroll line, never above the comment's own height
fn scroll_line_y(comment: &Comment, font_size: i32, config: &ConversionConfig) -> Result<i32> {
    let line = widen(comment.index % config.line_capacity).saturating_add(1);
    let y = line.saturating_mul(i64::from(config.base_font_size));
    coordinate(y.max(i64::from(font_size)), comment)
}

fn widen(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Narrow a computed coordinate to the script's integer range
fn coordinate(value: i64, comment: &Comment) -> Result<i32> {
    i32::try_from(value).map_err(|_| {
        CoreError::out_of_range(format!(
            "{value} for comment #{} ({} characters)",
            comment.index,
            comment.text_length()
        ))
    })
}

/// Stateful engine owning the registry pair for one conversion
#[derive(Debug, Clone)]
pub struct LayoutEngine<'a> {
    config: &'a ConversionConfig,
    registries: SlotRegistries,
}

impl<'a> LayoutEngine<'a> {
    /// Create an engine with empty registries
    #[must_use]
    pub const fn new(config: &'a ConversionConfig) -> Self {
        Self {
            config,
            registries: SlotRegistries::new(),
        }
    }

    /// Lay out the next comment in arrival order
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidInput`] for unsupported motion types and
    /// propagates configuration and coordinate range errors.
    pub fn layout(&mut self, comment: &Comment) -> Result<LayoutResult> {
        layout_comment(comment, &mut self.registries, self.config)
    }

    /// Configuration the engine places against
    #[must_use]
    pub const fn config(&self) -> &ConversionConfig {
        self.config
    }

    /// Current slot registries
    #[must_use]
    pub const fn registries(&self) -> &SlotRegistries {
        &self.registries
    }
}
