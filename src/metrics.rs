//! Screen and font metrics supplied to the layout core each frame.
//!
//! The core never mutates these; the host hands in a fresh copy whenever the
//! window is resized.

use crate::error::{Error, Result};

/// Pixel geometry of the console screen and its fixed-width font.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenMetrics {
    /// Viewport width in pixels.
    pub width: u32,
    /// Viewport height in pixels.
    pub height: u32,
    /// Width of one font cell in pixels.
    pub font_width: u32,
    /// Nominal font size (glyph height) in pixels.
    pub font_size: u32,
    /// Extra pixels between rows.
    pub line_spacing: u32,
    /// Height of the navbar strip drawn above the editor.
    pub navbar_height: u32,
}

impl Default for ScreenMetrics {
    fn default() -> Self {
        Self {
            width: 128,
            height: 128,
            font_width: 4,
            font_size: 5,
            line_spacing: 1,
            navbar_height: 10,
        }
    }
}

impl ScreenMetrics {
    /// Create a metrics builder starting from the defaults.
    #[must_use]
    pub fn builder() -> ScreenMetricsBuilder {
        ScreenMetricsBuilder::default()
    }

    /// Copy of these metrics with a new viewport size.
    #[must_use]
    pub fn with_size(self, width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..self
        }
    }

    /// Height of one rendered row in pixels.
    #[must_use]
    pub fn line_height(&self) -> u32 {
        self.font_size.saturating_add(self.line_spacing).max(1)
    }

    /// Default number of console entries to retain.
    ///
    /// Twice the number of font-size strips that fit in the viewport, so a
    /// screenful of history survives even when every entry wraps.
    #[must_use]
    pub fn history_cap(&self) -> usize {
        (self.height / self.font_size.max(1)) as usize * 2
    }

    /// Pixel height available to the editor below the navbar.
    #[must_use]
    pub fn editor_height(&self) -> u32 {
        self.height.saturating_sub(self.navbar_height)
    }

    /// Number of editor rows that fit below the navbar.
    #[must_use]
    pub fn editor_rows(&self) -> usize {
        (self.editor_height() / self.line_height()) as usize
    }
}

/// Fluent builder for [`ScreenMetrics`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ScreenMetricsBuilder {
    metrics: ScreenMetrics,
}

impl ScreenMetricsBuilder {
    /// Set the viewport size in pixels.
    #[must_use]
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.metrics.width = width;
        self.metrics.height = height;
        self
    }

    /// Set the font cell width and size in pixels.
    #[must_use]
    pub fn font(mut self, font_width: u32, font_size: u32) -> Self {
        self.metrics.font_width = font_width;
        self.metrics.font_size = font_size;
        self
    }

    /// Set the extra spacing between rows.
    #[must_use]
    pub fn line_spacing(mut self, spacing: u32) -> Self {
        self.metrics.line_spacing = spacing;
        self
    }

    /// Set the navbar height.
    #[must_use]
    pub fn navbar_height(mut self, height: u32) -> Self {
        self.metrics.navbar_height = height;
        self
    }

    /// Validate and build the metrics.
    ///
    /// Zero viewport sizes are accepted (the layout degrades to "no room"),
    /// but zero font dimensions are rejected.
    pub fn build(self) -> Result<ScreenMetrics> {
        let m = self.metrics;
        if m.font_width == 0 || m.font_size == 0 {
            return Err(Error::InvalidMetrics {
                font_width: m.font_width,
                font_size: m.font_size,
            });
        }
        Ok(m)
    }
}
