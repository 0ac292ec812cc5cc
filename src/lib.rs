//! `textchain` - Linked-chain text layout engine
//!
//! Text is a chain of shapeable units (characters, words, inline glyphs,
//! paragraph breaks). A layout pass measures each unit under a mutable style
//! environment, breaks the chain into lines with word-aware salvage, aligns
//! or justifies each line and positions every unit. Style effects
//! (background, text color, underline, or any property set) are scoped to
//! source ranges by saving properties on the unit where they start and
//! restoring them on the unit where they end.
//!
//! ```
//! use textchain::{LayoutOptions, LineLayout, MonospaceMetrics, RecordingSurface, Rgba, StyleEnv, TypeModel};
//!
//! let mut model = TypeModel::from_text("Hello World");
//! let _highlight = model.add_bg_effect(6, 11, Rgba::YELLOW).unwrap();
//!
//! let mut layout = LineLayout::new(StyleEnv::new(), LayoutOptions::new(200.0));
//! layout.layout(&mut model, &MonospaceMetrics::default());
//!
//! let mut surface = RecordingSurface::new();
//! layout.draw(&model, &mut surface);
//! assert_eq!(surface.fills().count(), 1);
//! ```

// Crate-level lint configuration
#![allow(clippy::cast_possible_truncation)] // Intentional coordinate casts
#![allow(clippy::cast_sign_loss)] // Intentional coordinate conversions
#![allow(clippy::cast_precision_loss)] // Gap counts and columns as f32
#![allow(clippy::module_name_repetitions)] // Allow layout::LineLayout etc
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::suboptimal_flops)] // Standard math notation is clearer than mul_add
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer
#![allow(clippy::cast_lossless)] // as casts are fine for primitive widening
#![allow(clippy::float_cmp)] // Exact comparisons on values set, not computed
#![allow(clippy::redundant_clone)] // Clones in tests for clarity are fine
#![allow(clippy::semicolon_if_nothing_returned)] // Style preference

pub mod color;
pub mod element;
pub mod env;
pub mod error;
pub mod event;
pub mod layout;
pub mod metrics;
pub mod model;
pub mod surface;

// Re-export core types at crate root
pub use color::Rgba;
pub use error::{Error, Result};
pub use event::{
    LogLevel, clear_event_callback, clear_log_callback, emit_event, emit_log, set_event_callback,
    set_log_callback,
};

// Re-export chain types
pub use element::{
    BreakAffinity, EffectId, Element, ElementId, ElementKind, Visibility, WordPart,
};
pub use env::{Alignment, FontStyle, Paint, PropertyKey, StyleEnv, Typeface};
pub use model::{ChainBuilder, EffectRemover, Granularity, Tokenizer, TypeModel};

// Re-export layout types
pub use layout::{Ellipsize, LayoutOptions, LayoutStatus, Line, LineItem, LineLayout};

// Re-export collaborators
pub use metrics::{FontMetrics, GlyphMetrics, MonospaceMetrics, WidthMethod};
pub use surface::{DrawOp, RecordingSurface, Rect, Surface};
