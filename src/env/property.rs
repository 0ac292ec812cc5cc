//! Property keys addressed by `save`/`restore` and effect bindings.

use super::paint::{Alignment, Typeface};
use crate::color::Rgba;

/// A property of the [`StyleEnv`](super::StyleEnv) that can be saved and
/// restored.
///
/// The built-in keys are backed by a fixed array of undo stacks; `Custom`
/// keys are an open namespace backed by a map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PropertyKey {
    Typeface,
    TextSize,
    TextColor,
    BackgroundColor,
    Underline,
    Alignment,
    LineSpacing,
    ParagraphSpacing,
    Custom(u32),
}

impl PropertyKey {
    /// Number of built-in keys.
    pub const BUILTIN_COUNT: usize = 8;

    /// Slot of a built-in key in the fixed stack array.
    #[must_use]
    pub(crate) const fn builtin_slot(self) -> Option<usize> {
        match self {
            Self::Typeface => Some(0),
            Self::TextSize => Some(1),
            Self::TextColor => Some(2),
            Self::BackgroundColor => Some(3),
            Self::Underline => Some(4),
            Self::Alignment => Some(5),
            Self::LineSpacing => Some(6),
            Self::ParagraphSpacing => Some(7),
            Self::Custom(_) => None,
        }
    }

    #[must_use]
    pub const fn is_custom(self) -> bool {
        matches!(self, Self::Custom(_))
    }
}

/// A saved built-in value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum SavedValue {
    Typeface(Typeface),
    Size(f32),
    Color(Rgba),
    Tint(Option<Rgba>),
    Alignment(Alignment),
    Spacing(f32),
    Custom(Option<i64>),
}
