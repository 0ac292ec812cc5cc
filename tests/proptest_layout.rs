//! Property-based tests for line breaking, justification and effect
//! bookkeeping.

#![allow(clippy::float_cmp)] // Exact float comparison is intentional in tests

mod common;

use common::{env10, line_text};
use proptest::prelude::*;
use textchain::{
    Alignment, BreakAffinity, Element, Granularity, LayoutOptions, LayoutStatus, Line, LineLayout,
    MonospaceMetrics, Rgba, Tokenizer, TypeModel,
};

const EPS: f32 = 1e-2;

// ============================================================================
// Strategies
// ============================================================================

/// Lowercase words of 1..=8 letters.
fn word_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,8}"
}

/// Single-space separated sentence.
fn sentence_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(word_strategy(), 1..30).prop_map(|words| words.join(" "))
}

/// Words of 1..=4 syllables joined by soft hyphens.
fn hyphenated_sentence_strategy() -> impl Strategy<Value = String> {
    let word = prop::collection::vec("[a-z]{1,4}", 1..5).prop_map(|parts| parts.join("\u{AD}"));
    prop::collection::vec(word, 1..20).prop_map(|words| words.join(" "))
}

fn granularity_strategy() -> impl Strategy<Value = Granularity> {
    prop_oneof![Just(Granularity::Word), Just(Granularity::Grapheme)]
}

/// Ideographs mixed with opening and closing punctuation.
fn cjk_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec!['你', '好', '世', '界', '，', '。', '「', '」']),
        1..40,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

fn lay_out(text: &str, width: f32, alignment: Alignment) -> (TypeModel, LineLayout, LayoutStatus) {
    let mut model = TypeModel::from_text(text);
    let mut env = env10();
    env.set_alignment(alignment);
    let mut layout = LineLayout::new(env, LayoutOptions::new(width));
    let status = layout.layout(&mut model, &MonospaceMetrics::default());
    (model, layout, status)
}

/// Units of `line` that take space, in order.
fn occupied<'m>(layout: &'m LineLayout, model: &'m TypeModel, line: &Line) -> Vec<&'m Element> {
    line.items()
        .iter()
        .filter_map(|item| layout.resolve(model, *item))
        .filter(|el| el.occupies_space())
        .collect()
}

// ============================================================================
// Line breaking
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn lines_fit_unless_single_unit(text in sentence_strategy(), width in 30.0f32..200.0) {
        let (model, layout, _) = lay_out(&text, width, Alignment::Left);
        for line in layout.lines() {
            let occupied = line
                .items()
                .iter()
                .filter_map(|item| layout.resolve(&model, *item))
                .filter(|el| el.occupies_space())
                .count();
            prop_assert!(
                line.layout_width() <= width + EPS || occupied == 1,
                "line {:?} is {} wide, limit {}",
                line_text(&layout, &model, line),
                line.layout_width(),
                width
            );
        }
    }

    #[test]
    fn broken_words_fit_unless_single_unit(
        text in hyphenated_sentence_strategy(),
        granularity in granularity_strategy(),
        width in 30.0f32..200.0,
    ) {
        let mut model = Tokenizer::new().granularity(granularity).tokenize(&text);
        let mut layout = LineLayout::new(env10(), LayoutOptions::new(width));
        layout.layout(&mut model, &MonospaceMetrics::default());
        for line in layout.lines() {
            let count = occupied(&layout, &model, line).len();
            prop_assert!(
                line.layout_width() <= width + EPS || count == 1,
                "line {:?} is {} wide, limit {}",
                line_text(&layout, &model, line),
                line.layout_width(),
                width
            );
        }
    }

    #[test]
    fn punctuation_clings_across_line_ends(text in cjk_strategy(), width in 40.0f32..200.0) {
        let (model, layout, status) = lay_out(&text, width, Alignment::Left);
        prop_assert_eq!(status, LayoutStatus::Complete);
        let lines: Vec<Vec<&Element>> = layout
            .lines()
            .iter()
            .map(|line| occupied(&layout, &model, line))
            .collect();
        for (i, line) in lines.iter().enumerate() {
            let Some(last) = line.last() else { continue };
            if i + 1 < lines.len() && last.affinity().contains(BreakAffinity::NOT_END) {
                prop_assert_eq!(line.len(), 1, "line {} ends with {:?}", i, last.text_content());
            }
            if i == 0 {
                continue;
            }
            if line[0].affinity().contains(BreakAffinity::NOT_START) {
                prop_assert_eq!(
                    lines[i - 1].len(),
                    1,
                    "line {} starts with {:?}",
                    i,
                    line[0].text_content()
                );
            }
        }
    }

    #[test]
    fn complete_pass_keeps_every_word_in_order(text in sentence_strategy(), width in 80.0f32..200.0) {
        let (model, layout, status) = lay_out(&text, width, Alignment::Left);
        // words are at most 8 columns, so every word fits a line
        prop_assert_eq!(status, LayoutStatus::Complete);
        let rebuilt: Vec<String> = layout
            .lines()
            .iter()
            .map(|line| line_text(&layout, &model, line))
            .collect();
        prop_assert_eq!(rebuilt.join(" "), text);
    }

    #[test]
    fn lines_stack_without_overlap(text in sentence_strategy(), width in 80.0f32..200.0) {
        let (_model, layout, _) = lay_out(&text, width, Alignment::Center);
        let mut bottom = 0.0f32;
        for line in layout.lines() {
            prop_assert!(line.y() + EPS >= bottom);
            bottom = line.y() + line.height();
        }
        prop_assert!((layout.height() - bottom).abs() < EPS);
    }

    #[test]
    fn relayout_is_stable(text in sentence_strategy(), width in 30.0f32..200.0) {
        let (mut model, mut layout, _) = lay_out(&text, width, Alignment::Right);
        let first: Vec<(f32, f32)> = model.iter().map(|el| (el.x(), el.y())).collect();
        let lines = layout.line_count();
        layout.layout(&mut model, &MonospaceMetrics::default());
        let second: Vec<(f32, f32)> = model.iter().map(|el| (el.x(), el.y())).collect();
        prop_assert_eq!(lines, layout.line_count());
        prop_assert_eq!(first, second);
    }
}

// ============================================================================
// Justification
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn justified_lines_fill_the_width(text in sentence_strategy(), width in 80.0f32..200.0) {
        let (model, layout, _) = lay_out(&text, width, Alignment::Justify);
        for line in layout.lines().iter().filter(|l| l.is_justified()) {
            let filled: f32 = line
                .items()
                .iter()
                .filter_map(|item| layout.resolve(&model, *item))
                .filter(|el| el.occupies_space())
                .map(|el| el.width() + el.gap())
                .sum();
            prop_assert!((filled - width).abs() < EPS, "filled {} of {}", filled, width);
            prop_assert!(!line.is_paragraph_end());
        }
    }
}

// ============================================================================
// Effects
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn add_remove_round_trip(
        text in sentence_strategy(),
        ranges in prop::collection::vec((0usize..200, 1usize..40), 1..8),
    ) {
        let mut model = TypeModel::from_text(&text);
        let len = text.chars().count();
        let mut removers = Vec::new();
        for (start, span) in ranges {
            let start = start % len;
            let end = (start + span).min(len);
            if let Ok(Some(remover)) = model.add_bg_effect(start, end, Rgba::YELLOW) {
                removers.push(remover);
            }
        }
        prop_assert_eq!(model.effect_count(), removers.len());

        // layout and draw leave the environment balanced
        let mut layout = LineLayout::new(env10(), LayoutOptions::new(100.0));
        layout.layout(&mut model, &MonospaceMetrics::default());

        for remover in &mut removers {
            prop_assert!(remover.remove(&mut model));
            prop_assert!(!remover.remove(&mut model));
        }
        prop_assert_eq!(model.effect_head(), None);
        prop_assert!(model.iter().all(|el| el.bindings().is_empty()));
    }
}
