//! Incremental construction of a [`TypeModel`].

use super::TypeModel;
use crate::element::{Element, ElementId, ElementKind, WordPart};

/// Appends units one after another, assigning each its source offset.
///
/// The builder keeps the source text in step with the units: every pushed
/// unit contributes the text it stands for, so the char offsets handed to
/// [`TypeModel::add_effect`] line up with what was pushed.
///
/// ```
/// use textchain::{ChainBuilder, WordPart};
///
/// let mut builder = ChainBuilder::new();
/// builder.push_text("un", WordPart::Start);
/// builder.push_text("do", WordPart::End);
/// builder.push_paragraph_break();
/// let model = builder.build();
/// assert_eq!(model.source(), "undo\n");
/// assert_eq!(model.len(), 3);
/// ```
#[derive(Debug, Default)]
pub struct ChainBuilder {
    source: String,
    elements: Vec<Element>,
    cursor: usize,
}

impl ChainBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of units pushed so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Append a text unit.
    pub fn push_text(&mut self, text: &str, word_part: WordPart) -> ElementId {
        self.push(Element::text(0, text, word_part))
    }

    /// Append an inline glyph standing for `alt` in the source.
    pub fn push_glyph(&mut self, alt: &str, glyph: u32, scale: f32) -> ElementId {
        self.push(Element::glyph(0, alt, glyph, scale))
    }

    /// Append a paragraph break (`\n` in the source).
    pub fn push_paragraph_break(&mut self) -> ElementId {
        self.push(Element::paragraph_break(0, 1))
    }

    /// Append a prepared unit, e.g. one built with
    /// [`Element::with_break_allowed`]. Its source offset is overwritten.
    pub fn push(&mut self, element: Element) -> ElementId {
        let fragment = match element.kind() {
            ElementKind::ParagraphBreak => "\n".repeat(element.source_len().max(1)),
            _ => element.text_content().to_string(),
        };
        self.source.push_str(&fragment);
        let len = fragment.chars().count();
        self.push_spanned(element, len)
    }

    /// Append a unit covering the next `source_len` chars of a source the
    /// caller supplies at [`build_with_source`](Self::build_with_source).
    pub(crate) fn push_spanned(&mut self, mut element: Element, source_len: usize) -> ElementId {
        element.set_source(self.cursor, source_len);
        self.cursor += source_len;
        let id = ElementId(self.elements.len());
        self.elements.push(element);
        id
    }

    /// Skip `chars` source chars that no unit covers.
    pub(crate) fn skip(&mut self, chars: usize) {
        self.cursor += chars;
    }

    /// Link the units into a chain.
    #[must_use]
    pub fn build(self) -> TypeModel {
        TypeModel::from_parts(self.source, self.elements)
    }

    pub(crate) fn build_with_source(self, source: String) -> TypeModel {
        TypeModel::from_parts(source, self.elements)
    }
}
