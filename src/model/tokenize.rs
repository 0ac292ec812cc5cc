//! Minimal tokenizer turning plain text into a unit chain.
//!
//! Text is split at Unicode word boundaries (UAX #29). Line terminators
//! become paragraph breaks, soft hyphens mark where a word may be broken with
//! a hyphen, and `[name]` tokens can be replaced by inline glyphs.

use super::{ChainBuilder, TypeModel};
use crate::element::{Element, WordPart};
use std::fmt;
use unicode_segmentation::UnicodeSegmentation;

/// Soft hyphen: not drawn, allows a hyphenated break at its position.
const SOFT_HYPHEN: char = '\u{00AD}';

/// Caller lookup from a bracketed token name to a glyph id.
pub type GlyphLookup<'a> = &'a dyn Fn(&str) -> Option<u32>;

/// Size of the units a word is split into.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Granularity {
    /// One unit per word (split further only at soft hyphens).
    #[default]
    Word,
    /// One unit per grapheme cluster, tagged with its place in the word.
    Grapheme,
}

/// One unit to be pushed, before word parts are assigned.
struct Fragment<'t> {
    text: &'t str,
    source_len: usize,
    break_after: bool,
}

/// Configurable text-to-chain splitter.
///
/// ```
/// use textchain::{Granularity, Tokenizer};
///
/// let glyphs = |name: &str| (name == "star").then_some(42);
/// let model = Tokenizer::new()
///     .granularity(Granularity::Word)
///     .glyphs(&glyphs)
///     .tokenize("a [star] b");
/// assert_eq!(model.len(), 5);
/// ```
#[derive(Clone, Copy)]
pub struct Tokenizer<'a> {
    granularity: Granularity,
    glyphs: Option<GlyphLookup<'a>>,
    glyph_scale: f32,
}

impl fmt::Debug for Tokenizer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tokenizer")
            .field("granularity", &self.granularity)
            .field("glyphs", &self.glyphs.is_some())
            .field("glyph_scale", &self.glyph_scale)
            .finish()
    }
}

impl Default for Tokenizer<'_> {
    fn default() -> Self {
        Self {
            granularity: Granularity::Word,
            glyphs: None,
            glyph_scale: 1.0,
        }
    }
}

impl<'a> Tokenizer<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    /// Replace `[name]` tokens for which `lookup` returns a glyph id.
    #[must_use]
    pub fn glyphs(mut self, lookup: GlyphLookup<'a>) -> Self {
        self.glyphs = Some(lookup);
        self
    }

    /// Glyph size relative to the line height (default 1.0).
    #[must_use]
    pub fn glyph_scale(mut self, scale: f32) -> Self {
        self.glyph_scale = scale;
        self
    }

    /// Build a model for `text`.
    #[must_use]
    pub fn tokenize(&self, text: &str) -> TypeModel {
        let mut builder = ChainBuilder::new();
        let mut rest = text;
        while let Some((before, token, glyph, after)) = self.next_glyph(rest) {
            self.push_run(&mut builder, before);
            let alt_len = token.chars().count();
            builder.push_spanned(Element::glyph(0, token, glyph, self.glyph_scale), alt_len);
            rest = after;
        }
        self.push_run(&mut builder, rest);
        builder.build_with_source(text.to_string())
    }

    /// Find the first `[name]` token the lookup knows, splitting `text`
    /// around it.
    fn next_glyph<'t>(&self, text: &'t str) -> Option<(&'t str, &'t str, u32, &'t str)> {
        let lookup = self.glyphs?;
        let mut from = 0;
        while let Some(rel) = text[from..].find('[') {
            let open = from + rel;
            let inner = &text[open + 1..];
            let end = inner.find(|c: char| c == ']' || c == '[' || c.is_whitespace())?;
            if inner[end..].starts_with(']') && end > 0 {
                if let Some(glyph) = lookup(&inner[..end]) {
                    let close = open + 1 + end;
                    return Some((&text[..open], &text[open..=close], glyph, &text[close + 1..]));
                }
            }
            from = open + 1;
        }
        None
    }

    fn push_run(&self, builder: &mut ChainBuilder, run: &str) {
        for bound in run.split_word_bounds() {
            if is_paragraph_break(bound) {
                let len = bound.chars().count();
                builder.push_spanned(Element::paragraph_break(0, len), len);
            } else if bound.chars().all(char::is_whitespace) {
                self.push_space(builder, bound);
            } else {
                self.push_word(builder, bound);
            }
        }
    }

    fn push_space(&self, builder: &mut ChainBuilder, bound: &str) {
        match self.granularity {
            Granularity::Word => {
                builder.push_spanned(Element::text(0, bound, WordPart::Whole), bound.chars().count());
            }
            Granularity::Grapheme => {
                for g in bound.graphemes(true) {
                    builder.push_spanned(Element::text(0, g, WordPart::Whole), g.chars().count());
                }
            }
        }
    }

    fn push_word(&self, builder: &mut ChainBuilder, bound: &str) {
        let mut fragments: Vec<Fragment<'_>> = Vec::new();
        let mut orphan_hyphens = 0;
        let mut pieces = bound.split(SOFT_HYPHEN).peekable();
        while let Some(piece) = pieces.next() {
            match self.granularity {
                Granularity::Word if !piece.is_empty() => fragments.push(Fragment {
                    text: piece,
                    source_len: piece.chars().count(),
                    break_after: false,
                }),
                Granularity::Word => {}
                Granularity::Grapheme => {
                    fragments.extend(piece.graphemes(true).map(|g| Fragment {
                        text: g,
                        source_len: g.chars().count(),
                        break_after: false,
                    }));
                }
            }
            if pieces.peek().is_some() {
                if let Some(last) = fragments.last_mut() {
                    last.source_len += 1;
                    last.break_after = true;
                } else {
                    orphan_hyphens += 1;
                }
            }
        }

        builder.skip(orphan_hyphens);
        let count = fragments.len();
        for (i, fragment) in fragments.into_iter().enumerate() {
            let part = match (i, count) {
                (_, 1) => WordPart::Whole,
                (0, _) => WordPart::Start,
                (i, n) if i + 1 == n => WordPart::End,
                _ => WordPart::Middle,
            };
            let mut element = Element::text(0, fragment.text, part);
            if fragment.break_after {
                element = element.with_break_allowed();
            }
            builder.push_spanned(element, fragment.source_len);
        }
    }
}

fn is_paragraph_break(bound: &str) -> bool {
    matches!(bound, "\n" | "\r" | "\r\n" | "\u{2029}")
}
