//! Word-part, line-break affinity and visibility tags.

use bitflags::bitflags;

/// How a unit relates to the word it belongs to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WordPart {
    /// A complete word, a space, punctuation, or a CJK character.
    #[default]
    Whole,
    /// First fragment of a multi-unit word.
    Start,
    /// Interior fragment of a multi-unit word.
    Middle,
    /// Last fragment of a multi-unit word.
    End,
}

impl WordPart {
    /// A line may be cut right after a unit with this tag.
    #[must_use]
    pub const fn ends_word(self) -> bool {
        matches!(self, Self::Whole | Self::End)
    }

    /// A unit with this tag opens a word, so justification may put space
    /// before it.
    #[must_use]
    pub const fn starts_word(self) -> bool {
        matches!(self, Self::Whole | Self::Start)
    }
}

bitflags! {
    /// Line-break affinity. The empty set is the normal case.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
    pub struct BreakAffinity: u8 {
        /// Must not begin a line (closing punctuation).
        const NOT_START          = 0x01;
        /// Must not end a line (opening punctuation).
        const NOT_END            = 0x02;
        /// A word may be broken after this unit with a hyphen marker.
        const WORD_BREAK_ALLOWED = 0x04;
    }
}

impl BreakAffinity {
    pub const NORMAL: Self = Self::empty();

    /// Affinity derived from the leading and trailing characters of `text`.
    #[must_use]
    pub fn for_text(text: &str) -> Self {
        let mut affinity = Self::NORMAL;
        if text.chars().next().is_some_and(is_not_start) {
            affinity |= Self::NOT_START;
        }
        if text.chars().next_back().is_some_and(is_not_end) {
            affinity |= Self::NOT_END;
        }
        affinity
    }
}

/// Characters that must not begin a line.
const NOT_START_CHARS: &[char] = &[
    '!', ')', ',', '.', ':', ';', '?', ']', '}', '%', '\u{2019}', '\u{201D}', '\u{2026}',
    '\u{3001}', '\u{3002}', '\u{3009}', '\u{300B}', '\u{300D}', '\u{300F}', '\u{3011}',
    '\u{3015}', '\u{3017}', '\u{FF01}', '\u{FF09}', '\u{FF0C}', '\u{FF0E}', '\u{FF1A}',
    '\u{FF1B}', '\u{FF1F}', '\u{FF3D}', '\u{FF5D}', '\u{30FC}', '\u{3005}',
];

/// Characters that must not end a line.
const NOT_END_CHARS: &[char] = &[
    '(', '[', '{', '$', '\u{2018}', '\u{201C}', '\u{3008}', '\u{300A}', '\u{300C}',
    '\u{300E}', '\u{3010}', '\u{3014}', '\u{3016}', '\u{FF08}', '\u{FF3B}', '\u{FF5B}',
    '\u{FFE5}',
];

#[must_use]
pub fn is_not_start(c: char) -> bool {
    NOT_START_CHARS.contains(&c)
}

#[must_use]
pub fn is_not_end(c: char) -> bool {
    NOT_END_CHARS.contains(&c)
}

/// Caller-controlled visibility of a unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// Measured, laid out and drawn.
    #[default]
    Visible,
    /// Takes space but is not drawn.
    Invisible,
    /// Takes no space and is not drawn.
    Gone,
}
