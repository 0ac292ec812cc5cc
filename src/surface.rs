//! Drawing surface interface and a recording implementation.

use crate::color::Rgba;
use crate::env::Paint;

/// Axis-aligned rectangle in surface coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Check if a point is inside (left/top inclusive, right/bottom exclusive).
    #[must_use]
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && py >= self.y && px < self.right() && py < self.bottom()
    }
}

/// Target of the draw pass.
///
/// Coordinates passed to the primitives are relative to the current
/// transform, which `translate` shifts and `save`/`restore` scope.
pub trait Surface {
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, dx: f32, dy: f32);
    fn fill_rect(&mut self, rect: Rect, color: Rgba);
    /// Draw a run of text with its baseline at `baseline`.
    fn draw_text(&mut self, text: &str, x: f32, baseline: f32, paint: &Paint);
    /// Draw an inline glyph (emoji, icon) into `rect`.
    fn draw_glyph(&mut self, glyph: u32, rect: Rect);
}

/// One recorded primitive, in absolute coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    FillRect { rect: Rect, color: Rgba },
    Text { text: String, x: f32, baseline: f32, color: Rgba },
    Glyph { glyph: u32, rect: Rect },
}

/// A surface that records every primitive with the transform applied.
///
/// Used by tests and headless callers to inspect the draw pass.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    ops: Vec<DrawOp>,
    offset: (f32, f32),
    saved: Vec<(f32, f32)>,
}

impl RecordingSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Recorded background/underline fills.
    pub fn fills(&self) -> impl Iterator<Item = (&Rect, &Rgba)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::FillRect { rect, color } => Some((rect, color)),
            _ => None,
        })
    }

    /// Recorded text runs, in draw order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Depth of unmatched `save` calls.
    #[must_use]
    pub fn save_depth(&self) -> usize {
        self.saved.len()
    }

    pub fn clear(&mut self) {
        self.ops.clear();
        self.offset = (0.0, 0.0);
        self.saved.clear();
    }
}

impl Surface for RecordingSurface {
    fn save(&mut self) {
        self.saved.push(self.offset);
    }

    fn restore(&mut self) {
        if let Some(offset) = self.saved.pop() {
            self.offset = offset;
        }
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.offset.0 += dx;
        self.offset.1 += dy;
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        let rect = Rect::new(
            rect.x + self.offset.0,
            rect.y + self.offset.1,
            rect.width,
            rect.height,
        );
        self.ops.push(DrawOp::FillRect { rect, color });
    }

    fn draw_text(&mut self, text: &str, x: f32, baseline: f32, paint: &Paint) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            x: x + self.offset.0,
            baseline: baseline + self.offset.1,
            color: paint.color,
        });
    }

    fn draw_glyph(&mut self, glyph: u32, rect: Rect) {
        let rect = Rect::new(
            rect.x + self.offset.0,
            rect.y + self.offset.1,
            rect.width,
            rect.height,
        );
        self.ops.push(DrawOp::Glyph { glyph, rect });
    }
}
