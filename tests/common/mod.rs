//! Shared fixtures for the integration tests.

#![allow(clippy::nursery)] // Test infra prioritizes clarity over pedantry
#![allow(clippy::pedantic)] // Test infra prioritizes clarity over pedantry
#![allow(dead_code)] // Not every test binary uses every helper

use std::sync::Once;

use textchain::{
    LayoutOptions, LayoutStatus, Line, LineLayout, MonospaceMetrics, StyleEnv, TypeModel,
};
use tracing::Level;

static INIT: Once = Once::new();

pub fn init_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_test_writer()
            .try_init();
    });
}

/// Default environment with a 10-unit text size, so one column is 10 wide
/// and one line is 10 tall under [`MonospaceMetrics`].
pub fn env10() -> StyleEnv {
    let mut env = StyleEnv::new();
    env.set_text_size(10.0);
    env
}

/// Tokenize `text` and lay it out under [`env10`].
pub fn lay_out(text: &str, options: LayoutOptions) -> (TypeModel, LineLayout, LayoutStatus) {
    let mut model = TypeModel::from_text(text);
    let mut layout = LineLayout::new(env10(), options);
    let status = layout.layout(&mut model, &MonospaceMetrics::default());
    (model, layout, status)
}

/// Text of the units of `line` that take space, concatenated.
pub fn line_text(layout: &LineLayout, model: &TypeModel, line: &Line) -> String {
    line.items()
        .iter()
        .filter_map(|item| layout.resolve(model, *item))
        .filter(|el| el.occupies_space() && !el.is_paragraph_break())
        .map(|el| el.text_content())
        .collect()
}

/// [`line_text`] of every line.
pub fn all_line_texts(layout: &LineLayout, model: &TypeModel) -> Vec<String> {
    layout
        .lines()
        .iter()
        .map(|line| line_text(layout, model, line))
        .collect()
}

/// One `y=.. w=.. |text|` row per line.
pub fn dump(layout: &LineLayout, model: &TypeModel) -> String {
    layout
        .lines()
        .iter()
        .map(|line| {
            format!(
                "y={} w={} |{}|",
                line.y(),
                line.layout_width(),
                line_text(layout, model, line)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
