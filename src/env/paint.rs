//! Low-level paint state handed to metrics providers and surfaces.

use crate::color::Rgba;
use bitflags::bitflags;

bitflags! {
    /// Synthetic font style flags carried by a [`Typeface`].
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
    pub struct FontStyle: u8 {
        const BOLD   = 0x01;
        const ITALIC = 0x02;
    }
}

/// A typeface handle. The family id is opaque to the engine and is resolved
/// by the [`GlyphMetrics`](crate::metrics::GlyphMetrics) provider.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Typeface {
    pub family: u16,
    pub style: FontStyle,
}

impl Typeface {
    /// Family 0, regular.
    pub const DEFAULT: Self = Self {
        family: 0,
        style: FontStyle::empty(),
    };

    #[must_use]
    pub const fn new(family: u16, style: FontStyle) -> Self {
        Self { family, style }
    }

    #[must_use]
    pub const fn bold(self) -> Self {
        Self {
            family: self.family,
            style: self.style.union(FontStyle::BOLD),
        }
    }

    #[must_use]
    pub const fn italic(self) -> Self {
        Self {
            family: self.family,
            style: self.style.union(FontStyle::ITALIC),
        }
    }
}

/// Horizontal alignment of a line within its width limit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

/// What the metrics provider and surface need to shape and draw text.
///
/// [`StyleEnv`](super::StyleEnv) mirrors its typed setters into this value, so
/// collaborators never see layout-only properties such as spacing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Paint {
    pub typeface: Typeface,
    pub text_size: f32,
    pub color: Rgba,
}

impl Default for Paint {
    fn default() -> Self {
        Self {
            typeface: Typeface::DEFAULT,
            text_size: 16.0,
            color: Rgba::BLACK,
        }
    }
}
