//! Style environment: mutable paint/layout state with per-property undo stacks.
//!
//! Every unit is measured and drawn against one [`StyleEnv`]. Effects scope
//! their changes by saving a property on the unit where they begin and
//! restoring it on the unit where they end:
//!
//! ```
//! use textchain::{PropertyKey, Rgba, StyleEnv};
//!
//! let mut env = StyleEnv::new();
//! env.save(PropertyKey::BackgroundColor);
//! env.set_background(Some(Rgba::YELLOW));
//! assert_eq!(env.background(), Some(Rgba::YELLOW));
//! env.restore(PropertyKey::BackgroundColor);
//! assert_eq!(env.background(), None);
//! ```

mod paint;
mod property;

pub use paint::{Alignment, FontStyle, Paint, Typeface};
pub use property::PropertyKey;

use crate::color::Rgba;
use crate::event::warn_with;
use property::SavedValue;
use std::collections::HashMap;

/// Paint and layout state shared by every unit during a pass.
#[derive(Clone, Debug)]
pub struct StyleEnv {
    paint: Paint,
    background: Option<Rgba>,
    underline: Option<Rgba>,
    alignment: Alignment,
    line_spacing: f32,
    paragraph_spacing: f32,
    custom: HashMap<u32, i64>,
    stacks: [Vec<SavedValue>; PropertyKey::BUILTIN_COUNT],
    custom_stacks: HashMap<u32, Vec<SavedValue>>,
}

impl Default for StyleEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleEnv {
    /// Create an environment with the default paint, left alignment and no
    /// extra spacing.
    #[must_use]
    pub fn new() -> Self {
        Self {
            paint: Paint::default(),
            background: None,
            underline: None,
            alignment: Alignment::Left,
            line_spacing: 0.0,
            paragraph_spacing: 0.0,
            custom: HashMap::new(),
            stacks: Default::default(),
            custom_stacks: HashMap::new(),
        }
    }

    /// Independent copy of the current values, without any saved state.
    #[must_use]
    pub fn snapshot(&self) -> Self {
        Self {
            paint: self.paint,
            background: self.background,
            underline: self.underline,
            alignment: self.alignment,
            line_spacing: self.line_spacing,
            paragraph_spacing: self.paragraph_spacing,
            custom: self.custom.clone(),
            stacks: Default::default(),
            custom_stacks: HashMap::new(),
        }
    }

    // ------------------------------------------------------------------
    // Typed accessors
    // ------------------------------------------------------------------

    /// The mirrored low-level paint.
    #[must_use]
    pub fn paint(&self) -> &Paint {
        &self.paint
    }

    #[must_use]
    pub fn typeface(&self) -> Typeface {
        self.paint.typeface
    }

    pub fn set_typeface(&mut self, typeface: Typeface) {
        self.paint.typeface = typeface;
    }

    #[must_use]
    pub fn text_size(&self) -> f32 {
        self.paint.text_size
    }

    /// Set the text size. Negative sizes are clamped to zero.
    pub fn set_text_size(&mut self, size: f32) {
        self.paint.text_size = size.max(0.0);
    }

    #[must_use]
    pub fn text_color(&self) -> Rgba {
        self.paint.color
    }

    pub fn set_text_color(&mut self, color: Rgba) {
        self.paint.color = color;
    }

    /// Background tint painted behind each unit, if any.
    #[must_use]
    pub fn background(&self) -> Option<Rgba> {
        self.background
    }

    pub fn set_background(&mut self, color: Option<Rgba>) {
        self.background = color;
    }

    /// Underline color, if underlining is active.
    #[must_use]
    pub fn underline(&self) -> Option<Rgba> {
        self.underline
    }

    pub fn set_underline(&mut self, color: Option<Rgba>) {
        self.underline = color;
    }

    #[must_use]
    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.alignment = alignment;
    }

    /// Extra vertical space between wrapped lines of one paragraph.
    #[must_use]
    pub fn line_spacing(&self) -> f32 {
        self.line_spacing
    }

    pub fn set_line_spacing(&mut self, spacing: f32) {
        self.line_spacing = spacing;
    }

    /// Extra vertical space after a paragraph break.
    #[must_use]
    pub fn paragraph_spacing(&self) -> f32 {
        self.paragraph_spacing
    }

    pub fn set_paragraph_spacing(&mut self, spacing: f32) {
        self.paragraph_spacing = spacing;
    }

    /// Value of a caller-defined numeric property.
    #[must_use]
    pub fn custom(&self, key: u32) -> Option<i64> {
        self.custom.get(&key).copied()
    }

    /// Set or clear a caller-defined numeric property.
    pub fn set_custom(&mut self, key: u32, value: Option<i64>) {
        match value {
            Some(v) => {
                self.custom.insert(key, v);
            }
            None => {
                self.custom.remove(&key);
            }
        }
    }

    // ------------------------------------------------------------------
    // Scoping
    // ------------------------------------------------------------------

    /// Push the current value of `key` onto its undo stack.
    pub fn save(&mut self, key: PropertyKey) {
        let value = self.current(key);
        self.stack_mut(key).push(value);
    }

    /// Pop the last saved value of `key` and make it current.
    ///
    /// Restoring with nothing saved is logged and ignored; the property
    /// keeps whatever value it has now.
    pub fn restore(&mut self, key: PropertyKey) {
        match self.stack_mut(key).pop() {
            Some(value) => self.apply(key, value),
            None => warn_with(|| {
                format!("restore({key:?}) with an empty stack; effect ranges are unbalanced")
            }),
        }
    }

    /// Number of values saved for `key`.
    #[must_use]
    pub fn stack_depth(&self, key: PropertyKey) -> usize {
        match key.builtin_slot() {
            Some(slot) => self.stacks[slot].len(),
            None => match key {
                PropertyKey::Custom(raw) => self.custom_stacks.get(&raw).map_or(0, Vec::len),
                _ => 0,
            },
        }
    }

    fn stack_mut(&mut self, key: PropertyKey) -> &mut Vec<SavedValue> {
        match (key.builtin_slot(), key) {
            (Some(slot), _) => &mut self.stacks[slot],
            (None, PropertyKey::Custom(raw)) => self.custom_stacks.entry(raw).or_default(),
            // Every non-custom key has a builtin slot.
            (None, _) => &mut self.stacks[0],
        }
    }

    /// Total number of saved values across all keys.
    #[must_use]
    pub fn total_stack_depth(&self) -> usize {
        self.stacks.iter().map(Vec::len).sum::<usize>()
            + self.custom_stacks.values().map(Vec::len).sum::<usize>()
    }

    /// Drop every saved value, keeping current values.
    pub fn clear_stacks(&mut self) {
        for stack in &mut self.stacks {
            stack.clear();
        }
        self.custom_stacks.clear();
    }

    fn current(&self, key: PropertyKey) -> SavedValue {
        match key {
            PropertyKey::Typeface => SavedValue::Typeface(self.paint.typeface),
            PropertyKey::TextSize => SavedValue::Size(self.paint.text_size),
            PropertyKey::TextColor => SavedValue::Color(self.paint.color),
            PropertyKey::BackgroundColor => SavedValue::Tint(self.background),
            PropertyKey::Underline => SavedValue::Tint(self.underline),
            PropertyKey::Alignment => SavedValue::Alignment(self.alignment),
            PropertyKey::LineSpacing => SavedValue::Spacing(self.line_spacing),
            PropertyKey::ParagraphSpacing => SavedValue::Spacing(self.paragraph_spacing),
            PropertyKey::Custom(raw) => SavedValue::Custom(self.custom(raw)),
        }
    }

    fn apply(&mut self, key: PropertyKey, value: SavedValue) {
        match (key, value) {
            (PropertyKey::Typeface, SavedValue::Typeface(face)) => self.set_typeface(face),
            (PropertyKey::TextSize, SavedValue::Size(size)) => self.set_text_size(size),
            (PropertyKey::TextColor, SavedValue::Color(color)) => self.set_text_color(color),
            (PropertyKey::BackgroundColor, SavedValue::Tint(tint)) => self.set_background(tint),
            (PropertyKey::Underline, SavedValue::Tint(tint)) => self.set_underline(tint),
            (PropertyKey::Alignment, SavedValue::Alignment(alignment)) => {
                self.set_alignment(alignment);
            }
            (PropertyKey::LineSpacing, SavedValue::Spacing(spacing)) => {
                self.set_line_spacing(spacing);
            }
            (PropertyKey::ParagraphSpacing, SavedValue::Spacing(spacing)) => {
                self.set_paragraph_spacing(spacing);
            }
            (PropertyKey::Custom(raw), SavedValue::Custom(value)) => self.set_custom(raw, value),
            // Values are only ever pushed by `save` under their own key.
            _ => {}
        }
    }
}
