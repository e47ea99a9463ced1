//! Track assembly: comment list in, ASS script text out
//!
//! [`TrackAssembler`] drives one [`LayoutEngine`] over the comments in
//! arrival order, dropping motion types without a layout policy, and turns
//! each placement into a `Dialogue:` line. [`convert`] wraps the whole
//! process for callers holding a complete list.
//!
//! # Example
//!
//! ```rust
//! use danmaku_core::{convert, Comment, ConversionConfig, MotionType};
//!
//! let comments = vec![
//!     Comment::new(MotionType::Scroll, 1.5, "hello").with_index(0),
//!     Comment::new(MotionType::Other(7), 2.0, "[advanced]").with_index(1),
//! ];
//! let script = convert(&comments, &ConversionConfig::new(1280, 720))?;
//! let events: Vec<&str> = script.lines().filter(|l| l.starts_with("Dialogue:")).collect();
//! assert_eq!(events.len(), 1);
//! assert!(events[0].starts_with("Dialogue: 3,0:00:01.50,0:00:10.50,AcplayDefault,"));
//! # Ok::<(), danmaku_core::CoreError>(())
//! ```

pub mod header;
pub mod time;

use log::{debug, info};

use crate::{
    layout::{LayoutEngine, LayoutResult},
    model::{Comment, ConversionConfig},
    Result,
};

pub use header::{script_header, STYLE_NAME};
pub use time::format_seconds;

/// Make comment text safe for a single dialogue line
///
/// Line breaks become `\N`, carriage returns are dropped and braces are
/// replaced with full-width forms so the text cannot open an override block.
#[must_use]
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\r' => {}
            '\n' => escaped.push_str("\\N"),
            '{' => escaped.push('｛'),
            '}' => escaped.push('｝'),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Render one placement as a `Dialogue:` line
#[must_use]
pub fn format_dialogue(layout: &LayoutResult, text: &str) -> String {
    format!(
        "Dialogue: 3,{start},{end},{STYLE_NAME},,0000,0000,0000,,{markup}{text}",
        start = format_seconds(layout.start_time),
        end = format_seconds(layout.end_time),
        markup = layout.markup.to_override_block(),
        text = escape_text(text),
    )
}

/// Counters for one assembled track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrackStats {
    /// Dialogue lines emitted
    pub events: usize,
    /// Comments dropped for an unsupported motion type
    pub filtered: usize,
}

/// Incremental builder for one track
///
/// Comments must be pushed in arrival order. A layout failure is returned
/// to the caller and nothing is emitted for that comment.
#[derive(Debug)]
pub struct TrackAssembler<'a> {
    engine: LayoutEngine<'a>,
    events: Vec<String>,
    stats: TrackStats,
}

impl<'a> TrackAssembler<'a> {
    /// Create an assembler after validating `config`
    ///
    /// # Errors
    ///
    /// Returns [`crate::CoreError::Config`] if the configuration is unusable.
    pub fn new(config: &'a ConversionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            engine: LayoutEngine::new(config),
            events: Vec::new(),
            stats: TrackStats::default(),
        })
    }

    /// Lay out and format the next comment
    ///
    /// Returns `Ok(false)` when the comment's motion type is filtered out.
    ///
    /// # Errors
    ///
    /// Propagates layout errors unchanged.
    pub fn push(&mut self, comment: &Comment) -> Result<bool> {
        if !comment.motion.is_supported() {
            debug!(
                "skipping comment #{} with motion {}: {:?}",
                comment.index, comment.motion, comment.text
            );
            self.stats.filtered += 1;
            return Ok(false);
        }

        let layout = self.engine.layout(comment)?;
        self.events.push(format_dialogue(&layout, &comment.text));
        self.stats.events += 1;
        Ok(true)
    }

    /// Push every comment of an iterator in order
    ///
    /// # Errors
    ///
    /// Stops at and returns the first layout error.
    pub fn extend<'c, I>(&mut self, comments: I) -> Result<()>
    where
        I: IntoIterator<Item = &'c Comment>,
    {
        for comment in comments {
            self.push(comment)?;
        }
        Ok(())
    }

    /// Counters so far
    #[must_use]
    pub const fn stats(&self) -> TrackStats {
        self.stats
    }

    /// Dialogue lines emitted so far
    #[must_use]
    pub fn events(&self) -> &[String] {
        &self.events
    }

    /// Header followed by the dialogue lines, newline separated
    #[must_use]
    pub fn finish(self) -> String {
        info!(
            "assembled {} dialogue lines, filtered {} comments",
            self.stats.events, self.stats.filtered
        );
        let mut script = script_header(self.engine.config());
        script.push_str(&self.events.join("\n"));
        script
    }
}

/// Convert a complete comment list to ASS script text
///
/// Uses a fresh pair of slot registries, so converting the same list twice
/// produces identical output.
///
/// # Errors
///
/// Returns [`crate::CoreError::Config`] for an invalid configuration and
/// propagates the first layout error.
pub fn convert(comments: &[Comment], config: &ConversionConfig) -> Result<String> {
    let mut assembler = TrackAssembler::new(config)?;
    assembler.extend(comments)?;
    Ok(assembler.finish())
}
