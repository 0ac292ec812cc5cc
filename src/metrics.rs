//! Glyph metrics provider interface and a monospace implementation.
//!
//! The engine never shapes text itself. Every width and height comes from a
//! [`GlyphMetrics`] implementation that reads the current [`Paint`].
//! [`MonospaceMetrics`] is the built-in provider: it measures advances in
//! terminal columns via `unicode-width`, scaled by the text size, which keeps
//! headless layouts and tests deterministic.

use crate::env::Paint;
use unicode_width::UnicodeWidthStr;

/// Vertical font metrics relative to the baseline.
///
/// All values are distances (non-negative): `ascent` and `top` extend above
/// the baseline, `descent` and `bottom` below it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FontMetrics {
    pub ascent: f32,
    pub descent: f32,
    pub top: f32,
    pub bottom: f32,
}

impl FontMetrics {
    /// Height of a text run: ascent plus descent.
    #[must_use]
    pub fn line_height(&self) -> f32 {
        self.ascent + self.descent
    }
}

/// Supplies advance widths and font metrics for the current paint.
pub trait GlyphMetrics {
    /// Horizontal advance of `text` drawn with `paint`.
    fn advance(&self, text: &str, paint: &Paint) -> f32;

    /// Font metrics for `paint`.
    fn font_metrics(&self, paint: &Paint) -> FontMetrics;
}

/// How ambiguous-width characters are counted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WidthMethod {
    /// POSIX-like wcwidth: ambiguous width = 1.
    #[default]
    WcWidth,
    /// Unicode East Asian Width: ambiguous width = 2.
    Unicode,
}

fn columns(text: &str, method: WidthMethod) -> usize {
    match method {
        WidthMethod::WcWidth => UnicodeWidthStr::width(text),
        WidthMethod::Unicode => UnicodeWidthStr::width_cjk(text),
    }
}

/// Column-based metrics: one column is `text_size * column_ratio` wide.
///
/// Vertical metrics are a fixed split of the text size (80% ascent, 20%
/// descent), so a run's height equals its text size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceMetrics {
    pub column_ratio: f32,
    pub method: WidthMethod,
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self {
            column_ratio: 1.0,
            method: WidthMethod::WcWidth,
        }
    }
}

impl MonospaceMetrics {
    #[must_use]
    pub fn new(column_ratio: f32) -> Self {
        Self {
            column_ratio,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_method(mut self, method: WidthMethod) -> Self {
        self.method = method;
        self
    }
}

impl GlyphMetrics for MonospaceMetrics {
    fn advance(&self, text: &str, paint: &Paint) -> f32 {
        columns(text, self.method) as f32 * paint.text_size * self.column_ratio
    }

    fn font_metrics(&self, paint: &Paint) -> FontMetrics {
        let size = paint.text_size;
        FontMetrics {
            ascent: size * 0.8,
            descent: size * 0.2,
            top: size * 0.9,
            bottom: size * 0.25,
        }
    }
}
