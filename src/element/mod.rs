//! Shapeable units: the nodes of the layout chain.
//!
//! An [`Element`] is one drawable unit: a character or phrase, an inline
//! glyph, a paragraph break, or a synthetic marker inserted by layout (the
//! hyphen of a broken word, an ellipsis). Elements live in the arena owned by
//! [`TypeModel`](crate::model::TypeModel) and refer to each other by
//! [`ElementId`].
//!
//! [`Element::measure`] and [`Element::draw`] share one template: enter every
//! effect binding (push its save-types, run its updater), do the variant's own
//! work, then pop every restore-type. An effect's change is therefore visible
//! exactly while the units of its range are processed.

pub mod effect;
mod tags;

pub use effect::{EffectBinding, EffectId, Updater};
pub use tags::{BreakAffinity, Visibility, WordPart, is_not_end, is_not_start};

use crate::env::{PropertyKey, StyleEnv};
use crate::metrics::GlyphMetrics;
use crate::surface::{Rect, Surface};

/// Stable handle of an element in its model's arena.
///
/// The arena is in document order, so the id doubles as the document index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub(crate) usize);

impl ElementId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Text drawn for a broken word.
pub const HYPHEN: &str = "-";
/// Text drawn for truncated content.
pub const ELLIPSIS: &str = "\u{2026}";

/// What a unit is, and therefore how it measures and draws.
#[derive(Clone, Debug, PartialEq)]
pub enum ElementKind {
    /// A single character or a fixed phrase.
    Text(String),
    /// An inline glyph substituted for a source token. `scale` is relative to
    /// the current line height; `alt` is the replaced source text.
    Glyph { glyph: u32, scale: f32, alt: String },
    /// End of a paragraph.
    ParagraphBreak,
    /// Synthetic unit inserted by layout; never part of the chain.
    Marker(String),
}

/// One shapeable unit.
#[derive(Debug)]
pub struct Element {
    kind: ElementKind,
    pub(crate) index: usize,
    source_index: usize,
    source_len: usize,
    word_part: WordPart,
    affinity: BreakAffinity,
    visibility: Visibility,
    /// Hidden by the current layout pass (e.g. a dropped trailing space).
    pub(crate) layout_hidden: bool,

    width: f32,
    height: f32,
    ascent: f32,

    pub(crate) x: f32,
    pub(crate) y: f32,
    pub(crate) baseline: f32,
    pub(crate) gap: f32,

    pub(crate) prev: Option<ElementId>,
    pub(crate) next: Option<ElementId>,
    pub(crate) prev_effect: Option<ElementId>,
    pub(crate) next_effect: Option<ElementId>,
    pub(crate) bindings: Vec<EffectBinding>,
}

impl Element {
    fn new(kind: ElementKind, source_index: usize, source_len: usize, word_part: WordPart) -> Self {
        let affinity = match &kind {
            ElementKind::Text(text) => BreakAffinity::for_text(text),
            _ => BreakAffinity::NORMAL,
        };
        Self {
            kind,
            index: 0,
            source_index,
            source_len,
            word_part,
            affinity,
            visibility: Visibility::Visible,
            layout_hidden: false,
            width: 0.0,
            height: 0.0,
            ascent: 0.0,
            x: 0.0,
            y: 0.0,
            baseline: 0.0,
            gap: 0.0,
            prev: None,
            next: None,
            prev_effect: None,
            next_effect: None,
            bindings: Vec::new(),
        }
    }

    /// A character or phrase starting at char offset `source_index`.
    #[must_use]
    pub fn text(source_index: usize, text: &str, word_part: WordPart) -> Self {
        let len = text.chars().count();
        Self::new(ElementKind::Text(text.to_string()), source_index, len, word_part)
    }

    /// An inline glyph replacing `alt` in the source.
    #[must_use]
    pub fn glyph(source_index: usize, alt: &str, glyph: u32, scale: f32) -> Self {
        let len = alt.chars().count();
        Self::new(
            ElementKind::Glyph {
                glyph,
                scale,
                alt: alt.to_string(),
            },
            source_index,
            len,
            WordPart::Whole,
        )
    }

    /// A paragraph break covering `source_len` chars (1 for `\n`, 2 for `\r\n`).
    #[must_use]
    pub fn paragraph_break(source_index: usize, source_len: usize) -> Self {
        Self::new(
            ElementKind::ParagraphBreak,
            source_index,
            source_len,
            WordPart::Whole,
        )
    }

    /// A layout-owned marker. Markers attach to the unit before them.
    #[must_use]
    pub fn marker(text: &str) -> Self {
        let mut el = Self::new(ElementKind::Marker(text.to_string()), 0, 0, WordPart::End);
        el.affinity = BreakAffinity::NOT_START;
        el
    }

    /// Allow the word to be hyphenated after this unit.
    #[must_use]
    pub fn with_break_allowed(mut self) -> Self {
        self.affinity |= BreakAffinity::WORD_BREAK_ALLOWED;
        self
    }

    #[must_use]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Place the unit at `source_index`, covering `source_len` chars.
    pub(crate) fn set_source(&mut self, source_index: usize, source_len: usize) {
        self.source_index = source_index;
        self.source_len = source_len;
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    #[must_use]
    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    /// Text of a text or marker unit, the replaced token of a glyph, empty
    /// for a paragraph break.
    #[must_use]
    pub fn text_content(&self) -> &str {
        match &self.kind {
            ElementKind::Text(text) | ElementKind::Marker(text) => text,
            ElementKind::Glyph { alt, .. } => alt,
            ElementKind::ParagraphBreak => "",
        }
    }

    /// Position in the chain.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Char offset of the unit in the source text.
    #[must_use]
    pub fn source_index(&self) -> usize {
        self.source_index
    }

    /// Number of source chars the unit covers.
    #[must_use]
    pub fn source_len(&self) -> usize {
        self.source_len
    }

    #[must_use]
    pub fn word_part(&self) -> WordPart {
        self.word_part
    }

    #[must_use]
    pub fn affinity(&self) -> BreakAffinity {
        self.affinity
    }

    /// Visibility as set by the caller.
    #[must_use]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn set_visibility(&mut self, visibility: Visibility) {
        self.visibility = visibility;
    }

    /// Visibility after layout overrides.
    #[must_use]
    pub fn effective_visibility(&self) -> Visibility {
        if self.layout_hidden {
            Visibility::Gone
        } else {
            self.visibility
        }
    }

    /// Whether the unit takes horizontal space in its line.
    #[must_use]
    pub fn occupies_space(&self) -> bool {
        self.effective_visibility() != Visibility::Gone
    }

    #[must_use]
    pub fn is_paragraph_break(&self) -> bool {
        matches!(self.kind, ElementKind::ParagraphBreak)
    }

    #[must_use]
    pub fn is_marker(&self) -> bool {
        matches!(self.kind, ElementKind::Marker(_))
    }

    /// A text unit made only of whitespace.
    #[must_use]
    pub fn is_whitespace(&self) -> bool {
        matches!(&self.kind, ElementKind::Text(t) if !t.is_empty() && t.chars().all(char::is_whitespace))
    }

    #[must_use]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Distance from the top of the unit to its baseline.
    #[must_use]
    pub fn ascent(&self) -> f32 {
        self.ascent
    }

    #[must_use]
    pub fn x(&self) -> f32 {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> f32 {
        self.y
    }

    #[must_use]
    pub fn baseline(&self) -> f32 {
        self.baseline
    }

    /// Extra justification space after this unit.
    #[must_use]
    pub fn gap(&self) -> f32 {
        self.gap
    }

    /// The laid-out box of the unit.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    #[must_use]
    pub fn prev(&self) -> Option<ElementId> {
        self.prev
    }

    #[must_use]
    pub fn next(&self) -> Option<ElementId> {
        self.next
    }

    #[must_use]
    pub fn prev_effect(&self) -> Option<ElementId> {
        self.prev_effect
    }

    #[must_use]
    pub fn next_effect(&self) -> Option<ElementId> {
        self.next_effect
    }

    #[must_use]
    pub fn bindings(&self) -> &[EffectBinding] {
        &self.bindings
    }

    /// Whether the unit carries any save or restore type.
    #[must_use]
    pub fn has_effects(&self) -> bool {
        self.bindings
            .iter()
            .any(|b| !b.save.is_empty() || !b.restore.is_empty())
    }

    /// Save-types of every binding, in application order.
    pub fn save_types(&self) -> impl Iterator<Item = PropertyKey> + '_ {
        self.bindings.iter().flat_map(|b| b.save.iter().copied())
    }

    /// Restore-types of every binding.
    pub fn restore_types(&self) -> impl Iterator<Item = PropertyKey> + '_ {
        self.bindings.iter().flat_map(|b| b.restore.iter().copied())
    }

    // ------------------------------------------------------------------
    // Template operations
    // ------------------------------------------------------------------

    fn enter_effects(&self, env: &mut StyleEnv) {
        for binding in &self.bindings {
            binding.enter(env);
        }
    }

    fn exit_effects(&self, env: &mut StyleEnv) {
        for binding in self.bindings.iter().rev() {
            binding.exit(env);
        }
    }

    /// Measure the unit under `env`, with its effects applied.
    pub fn measure(&mut self, env: &mut StyleEnv, metrics: &dyn GlyphMetrics) {
        self.enter_effects(env);
        self.on_measure(env, metrics);
        self.exit_effects(env);
    }

    /// Draw the unit at its laid-out position, with its effects applied.
    ///
    /// Units that are not visible still apply and undo their effects so the
    /// environment stays balanced for the units after them.
    pub fn draw(&self, env: &mut StyleEnv, surface: &mut dyn Surface) {
        self.enter_effects(env);
        if self.effective_visibility() == Visibility::Visible {
            self.on_draw(env, surface);
        }
        self.exit_effects(env);
    }

    fn on_measure(&mut self, env: &StyleEnv, metrics: &dyn GlyphMetrics) {
        let paint = env.paint();
        let fm = metrics.font_metrics(paint);
        match &self.kind {
            ElementKind::Text(text) | ElementKind::Marker(text) => {
                self.width = metrics.advance(text, paint);
                self.height = fm.line_height();
                self.ascent = fm.ascent;
            }
            ElementKind::Glyph { scale, .. } => {
                let size = fm.line_height() * scale;
                self.width = size;
                self.height = size;
                self.ascent = fm.ascent * scale;
            }
            ElementKind::ParagraphBreak => {
                self.width = 0.0;
                self.height = fm.line_height();
                self.ascent = fm.ascent;
            }
        }
    }

    fn on_draw(&self, env: &StyleEnv, surface: &mut dyn Surface) {
        if let Some(background) = env.background() {
            if self.width > 0.0 {
                surface.fill_rect(self.bounds(), background);
            }
        }
        match &self.kind {
            ElementKind::Text(text) | ElementKind::Marker(text) => {
                surface.draw_text(text, self.x, self.baseline, env.paint());
            }
            ElementKind::Glyph { glyph, .. } => surface.draw_glyph(*glyph, self.bounds()),
            ElementKind::ParagraphBreak => return,
        }
        if let Some(color) = env.underline() {
            let thickness = (env.text_size() / 12.0).max(1.0);
            let rect = Rect::new(self.x, self.baseline + thickness, self.width, thickness);
            surface.fill_rect(rect, color);
        }
    }
}
