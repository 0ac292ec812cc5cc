//! One visual row of units.

use super::{LineItem, Units};
use crate::element::{BreakAffinity, ELLIPSIS, Element, HYPHEN, WordPart};
use crate::env::{Alignment, StyleEnv};
use crate::event::warn_with;
use crate::metrics::GlyphMetrics;

/// How far back word-break salvage looks for a break point.
pub const WORD_BREAK_LOOKBACK: usize = 30;

/// Tolerance for width comparisons, so a run that fits exactly is not
/// pushed to the next line by float rounding.
const WIDTH_EPSILON: f32 = 1e-3;

/// A row of units with its geometry.
///
/// Lines are built by [`LineLayout`](super::LineLayout): units are added until
/// one overflows, then [`Line::layout`] assigns every unit its position.
#[derive(Clone, Debug, Default)]
pub struct Line {
    x: f32,
    y: f32,
    width_limit: f32,
    justify_max_width: f32,
    content_width: f32,
    height: f32,
    layout_width: f32,
    justified: bool,
    paragraph_end: bool,
    items: Vec<LineItem>,
    /// Units this line hid during layout; undone by `reset`.
    hidden: Vec<LineItem>,
}

impl Line {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepare an empty line at `(x, y)`.
    pub(crate) fn begin(&mut self, x: f32, y: f32, width_limit: f32, justify_max_width: f32) {
        self.x = x;
        self.y = y;
        self.width_limit = width_limit;
        self.justify_max_width = justify_max_width;
    }

    /// Clear every field and undo the visibility overrides this line made.
    pub(crate) fn reset(&mut self, units: &mut Units<'_>) {
        for item in self.hidden.drain(..) {
            units.get_mut(item).layout_hidden = false;
        }
        self.items.clear();
        self.x = 0.0;
        self.y = 0.0;
        self.width_limit = 0.0;
        self.justify_max_width = 0.0;
        self.content_width = 0.0;
        self.height = 0.0;
        self.layout_width = 0.0;
        self.justified = false;
        self.paragraph_end = false;
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
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
    pub fn width_limit(&self) -> f32 {
        self.width_limit
    }

    /// Sum of the widths of the units that take space.
    #[must_use]
    pub fn content_width(&self) -> f32 {
        self.content_width
    }

    /// Tallest member.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Content width, or the width limit when the line was justified.
    #[must_use]
    pub fn layout_width(&self) -> f32 {
        self.layout_width
    }

    #[must_use]
    pub fn is_justified(&self) -> bool {
        self.justified
    }

    #[must_use]
    pub fn is_paragraph_end(&self) -> bool {
        self.paragraph_end
    }

    /// Whether a unit of `width` would push the line past its limit.
    #[must_use]
    pub fn would_overflow(&self, width: f32) -> bool {
        self.content_width + width > self.width_limit + WIDTH_EPSILON
    }

    // ------------------------------------------------------------------
    // Building
    // ------------------------------------------------------------------

    pub(crate) fn add(&mut self, units: &Units<'_>, item: LineItem) {
        self.account(units.get(item));
        self.items.push(item);
    }

    pub(crate) fn add_first(&mut self, units: &Units<'_>, item: LineItem) {
        self.account(units.get(item));
        self.items.insert(0, item);
    }

    fn account(&mut self, el: &Element) {
        if el.occupies_space() {
            self.content_width += el.width();
        }
        self.height = self.height.max(el.height());
    }

    /// Remove and return the members from `pos` on.
    fn split_off(&mut self, units: &Units<'_>, pos: usize) -> Vec<LineItem> {
        let tail = self.items.split_off(pos);
        for item in &tail {
            let el = units.get(*item);
            if el.occupies_space() {
                self.content_width -= el.width();
            }
        }
        self.recompute_height(units);
        tail
    }

    fn recompute_height(&mut self, units: &Units<'_>) {
        self.height = self
            .items
            .iter()
            .map(|item| units.get(*item).height())
            .fold(0.0, f32::max);
    }

    fn width_of(&self, units: &Units<'_>, items: &[LineItem]) -> f32 {
        items
            .iter()
            .map(|item| units.get(*item))
            .filter(|el| el.occupies_space())
            .map(Element::width)
            .sum()
    }

    /// Choose where to cut this line when a unit with `next_affinity` does
    /// not fit, removing and returning the members that must move to the
    /// next line.
    ///
    /// Punctuation stays with its neighbour: a unit that must not start a
    /// line takes the member before it along, and a member that must not end
    /// a line moves down as well. The rest of the line is then cut after a
    /// whole word, before a pushed-back word start, or at a clean or
    /// hyphenated break found within [`WORD_BREAK_LOOKBACK`] units. When no
    /// break point exists the line keeps all its members and the overflowing
    /// unit starts the next line.
    pub(crate) fn handle_word_break(
        &mut self,
        units: &mut Units<'_>,
        env: &mut StyleEnv,
        metrics: &dyn GlyphMetrics,
        next_affinity: BreakAffinity,
    ) -> Vec<LineItem> {
        let mut carried: Vec<LineItem> = Vec::new();
        let mut next = next_affinity;
        while self.items.len() > 1 {
            let Some(&last) = self.items.last() else {
                break;
            };
            let el = units.get(last);
            let clings = (next.contains(BreakAffinity::NOT_START) && !el.is_whitespace())
                || el.affinity().contains(BreakAffinity::NOT_END);
            if !clings {
                break;
            }
            next = el.affinity();
            let tail = self.split_off(units, self.items.len() - 1);
            carried.splice(0..0, tail);
        }

        match self.salvage(units, env, metrics, next) {
            Some(mut salvaged) => {
                salvaged.append(&mut carried);
                salvaged
            }
            None => {
                for item in carried {
                    self.add(units, item);
                }
                warn_with(|| {
                    format!(
                        "no break point within {WORD_BREAK_LOOKBACK} units of line at y={}; cutting mid-word",
                        self.y
                    )
                });
                Vec::new()
            }
        }
    }

    /// Cut the line in front of a unit with `next` affinity. `None` when no
    /// break point is found.
    fn salvage(
        &mut self,
        units: &mut Units<'_>,
        env: &mut StyleEnv,
        metrics: &dyn GlyphMetrics,
        next: BreakAffinity,
    ) -> Option<Vec<LineItem>> {
        let Some(&last) = self.items.last() else {
            return Some(Vec::new());
        };
        let last_part = units.get(last).word_part();
        if last_part == WordPart::Whole {
            return Some(Vec::new());
        }
        if last_part == WordPart::Start && self.items.len() > 1 {
            return Some(self.split_off(units, self.items.len() - 1));
        }

        let len = self.items.len();
        let lower = len.saturating_sub(WORD_BREAK_LOOKBACK);
        let mut hyphen: Option<LineItem> = None;
        for pos in (lower..len).rev() {
            let el = units.get(self.items[pos]);
            let follows = self
                .items
                .get(pos + 1)
                .map_or(next, |item| units.get(*item).affinity());
            if el.word_part().ends_word()
                && !el.affinity().contains(BreakAffinity::NOT_END)
                && !follows.contains(BreakAffinity::NOT_START)
            {
                if hyphen.is_some() {
                    units.pop_marker();
                }
                return Some(self.split_off(units, pos + 1));
            }
            if el.affinity().contains(BreakAffinity::WORD_BREAK_ALLOWED) {
                let marker = *hyphen.get_or_insert_with(|| {
                    let mut marker = Element::marker(HYPHEN);
                    marker.measure(env, metrics);
                    units.push_marker(marker)
                });
                let kept = self.content_width - self.width_of(units, &self.items[pos + 1..]);
                if kept + units.get(marker).width() <= self.width_limit + WIDTH_EPSILON {
                    let tail = self.split_off(units, pos + 1);
                    self.add(units, marker);
                    return Some(tail);
                }
            }
        }
        if hyphen.is_some() {
            units.pop_marker();
        }
        None
    }

    /// Trim trailing members until an ellipsis marker fits, then append it.
    pub(crate) fn ellipsize_end(
        &mut self,
        units: &mut Units<'_>,
        env: &mut StyleEnv,
        metrics: &dyn GlyphMetrics,
    ) {
        let mut marker = Element::marker(ELLIPSIS);
        marker.measure(env, metrics);
        let marker_width = marker.width();
        while let Some(&last) = self.items.last() {
            let el = units.get(last);
            let trailing_space = el.is_whitespace() || el.is_paragraph_break();
            if !trailing_space && !self.would_overflow(marker_width) {
                break;
            }
            self.split_off(units, self.items.len() - 1);
        }
        let item = units.push_marker(marker);
        self.add(units, item);
    }

    // ------------------------------------------------------------------
    // Finalizing
    // ------------------------------------------------------------------

    /// Hide trailing whitespace if asked, align the line and assign every
    /// member its position and trailing gap.
    pub(crate) fn layout(
        &mut self,
        units: &mut Units<'_>,
        env: &StyleEnv,
        drop_trailing_space: bool,
        is_paragraph_end: bool,
    ) {
        self.paragraph_end = is_paragraph_end;
        if drop_trailing_space {
            self.hide_trailing_space(units);
        }

        // an unbounded line has nothing to align against
        let slack = if self.width_limit.is_finite() {
            self.width_limit - self.content_width
        } else {
            0.0
        };
        let mut start_x = 0.0;
        let mut add_space = 0.0;
        self.justified = false;
        match env.alignment() {
            Alignment::Left => {}
            Alignment::Right => start_x = slack.max(0.0),
            Alignment::Center => start_x = (slack / 2.0).max(0.0),
            Alignment::Justify => {
                let gaps = self.gap_count(units);
                let justify_last = slack < self.justify_max_width;
                if gaps > 0 && slack > 0.0 && (!is_paragraph_end || justify_last) {
                    add_space = slack / gaps as f32;
                    self.justified = true;
                }
            }
        }
        self.layout_width = if self.justified {
            self.width_limit
        } else {
            self.content_width
        };

        let mut x = self.x + start_x;
        let mut prev: Option<LineItem> = None;
        for &item in &self.items {
            let el = units.get(item);
            if !el.occupies_space() {
                let el = units.get_mut(item);
                el.x = x;
                el.y = self.y;
                el.baseline = self.y + el.ascent();
                el.gap = 0.0;
                continue;
            }
            if add_space > 0.0 && Self::is_gap_unit(el) {
                if let Some(prev) = prev {
                    units.get_mut(prev).gap = add_space;
                    x += add_space;
                }
            }
            let el = units.get_mut(item);
            el.x = x;
            el.y = self.y + (self.height - el.height()) / 2.0;
            el.baseline = el.y + el.ascent();
            el.gap = 0.0;
            x += el.width();
            prev = Some(item);
        }
    }

    fn is_gap_unit(el: &Element) -> bool {
        el.word_part().starts_word() && !el.is_paragraph_break() && !el.is_marker()
    }

    /// Word-start and whole units after the first unit that takes space.
    fn gap_count(&self, units: &Units<'_>) -> usize {
        self.items
            .iter()
            .map(|item| units.get(*item))
            .filter(|el| el.occupies_space())
            .skip(1)
            .filter(|el| Self::is_gap_unit(el))
            .count()
    }

    fn hide_trailing_space(&mut self, units: &mut Units<'_>) {
        for pos in (0..self.items.len()).rev() {
            let item = self.items[pos];
            let el = units.get(item);
            if el.is_paragraph_break() || !el.occupies_space() {
                continue;
            }
            if !el.is_whitespace() {
                break;
            }
            self.content_width -= el.width();
            units.get_mut(item).layout_hidden = true;
            self.hidden.push(item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementId;
    use crate::metrics::MonospaceMetrics;

    fn env10() -> StyleEnv {
        let mut env = StyleEnv::new();
        env.set_text_size(10.0);
        env
    }

    fn measured(parts: &[(&str, WordPart)]) -> Vec<Element> {
        let mut env = env10();
        let metrics = MonospaceMetrics::default();
        parts
            .iter()
            .enumerate()
            .map(|(i, (text, part))| {
                let mut el = Element::text(i, text, *part);
                el.index = i;
                el.measure(&mut env, &metrics);
                el
            })
            .collect()
    }

    fn fill(line: &mut Line, units: &Units<'_>, n: usize) {
        for i in 0..n {
            line.add(units, LineItem::Element(ElementId(i)));
        }
    }

    #[test]
    fn test_add_tracks_width_and_height() {
        let mut chain = measured(&[("ab", WordPart::Whole), (" ", WordPart::Whole)]);
        let mut markers = Vec::new();
        let units = Units::new(&mut chain, &mut markers);
        let mut line = Line::new();
        line.begin(0.0, 0.0, 100.0, 0.0);
        line.add(&units, LineItem::Element(ElementId(1)));
        line.add_first(&units, LineItem::Element(ElementId(0)));
        assert!((line.content_width() - 30.0).abs() < 1e-4);
        assert!((line.height() - 10.0).abs() < 1e-4);
        assert_eq!(line.items()[0], LineItem::Element(ElementId(0)));
        assert!(line.would_overflow(71.0));
        assert!(!line.would_overflow(70.0));
    }

    #[test]
    fn test_word_break_after_whole_word_salvages_nothing() {
        let mut chain = measured(&[("one", WordPart::Whole), (" ", WordPart::Whole), ("two", WordPart::Whole)]);
        let mut markers = Vec::new();
        let mut units = Units::new(&mut chain, &mut markers);
        let mut line = Line::new();
        line.begin(0.0, 0.0, 70.0, 0.0);
        fill(&mut line, &units, 3);
        let carried = line.handle_word_break(&mut units, &mut env10(), &MonospaceMetrics::default(), BreakAffinity::NORMAL);
        assert!(carried.is_empty());
        assert_eq!(line.len(), 3);
    }

    #[test]
    fn test_word_break_pushes_back_word_start() {
        let mut chain = measured(&[("go", WordPart::Whole), (" ", WordPart::Whole), ("ex", WordPart::Start)]);
        let mut markers = Vec::new();
        let mut units = Units::new(&mut chain, &mut markers);
        let mut line = Line::new();
        line.begin(0.0, 0.0, 50.0, 0.0);
        fill(&mut line, &units, 3);
        let carried = line.handle_word_break(&mut units, &mut env10(), &MonospaceMetrics::default(), BreakAffinity::NORMAL);
        assert_eq!(carried, vec![LineItem::Element(ElementId(2))]);
        assert!((line.content_width() - 30.0).abs() < 1e-4);
    }

    #[test]
    fn test_word_break_scans_back_to_clean_cut() {
        let mut chain = measured(&[
            ("a", WordPart::Whole),
            (" ", WordPart::Whole),
            ("b", WordPart::Start),
            ("c", WordPart::Middle),
            ("d", WordPart::Middle),
        ]);
        let mut markers = Vec::new();
        let mut units = Units::new(&mut chain, &mut markers);
        let mut line = Line::new();
        line.begin(0.0, 0.0, 50.0, 0.0);
        fill(&mut line, &units, 5);
        let carried = line.handle_word_break(&mut units, &mut env10(), &MonospaceMetrics::default(), BreakAffinity::NORMAL);
        assert_eq!(
            carried,
            vec![
                LineItem::Element(ElementId(2)),
                LineItem::Element(ElementId(3)),
                LineItem::Element(ElementId(4)),
            ]
        );
        assert_eq!(line.len(), 2);
    }

    #[test]
    fn test_closing_punctuation_takes_previous_unit_along() {
        let mut chain = measured(&[("ab", WordPart::Whole), (" ", WordPart::Whole), ("cd", WordPart::Whole)]);
        let mut markers = Vec::new();
        let mut units = Units::new(&mut chain, &mut markers);
        let mut line = Line::new();
        line.begin(0.0, 0.0, 50.0, 0.0);
        fill(&mut line, &units, 3);
        let carried = line.handle_word_break(&mut units, &mut env10(), &MonospaceMetrics::default(), BreakAffinity::NOT_START);
        assert_eq!(carried, vec![LineItem::Element(ElementId(2))]);
        assert_eq!(line.len(), 2);
        assert!((line.content_width() - 30.0).abs() < 1e-4);
    }

    #[test]
    fn test_closing_punctuation_after_space_cuts_exactly() {
        let mut chain = measured(&[("ab", WordPart::Whole), (" ", WordPart::Whole)]);
        let mut markers = Vec::new();
        let mut units = Units::new(&mut chain, &mut markers);
        let mut line = Line::new();
        line.begin(0.0, 0.0, 30.0, 0.0);
        fill(&mut line, &units, 2);
        let carried = line.handle_word_break(&mut units, &mut env10(), &MonospaceMetrics::default(), BreakAffinity::NOT_START);
        assert!(carried.is_empty());
        assert_eq!(line.len(), 2);
    }

    #[test]
    fn test_opening_punctuation_moves_down() {
        let mut chain = measured(&[("ab", WordPart::Whole), (" ", WordPart::Whole), ("(", WordPart::Whole)]);
        let mut markers = Vec::new();
        let mut units = Units::new(&mut chain, &mut markers);
        let mut line = Line::new();
        line.begin(0.0, 0.0, 40.0, 0.0);
        fill(&mut line, &units, 3);
        let carried = line.handle_word_break(&mut units, &mut env10(), &MonospaceMetrics::default(), BreakAffinity::NORMAL);
        assert_eq!(carried, vec![LineItem::Element(ElementId(2))]);
        assert_eq!(line.len(), 2);
    }

    #[test]
    fn test_punctuation_inside_unbreakable_run_stays_put() {
        let mut chain = measured(&[("a", WordPart::Start), ("b", WordPart::Middle)]);
        let mut markers = Vec::new();
        let mut units = Units::new(&mut chain, &mut markers);
        let mut line = Line::new();
        line.begin(0.0, 0.0, 20.0, 0.0);
        fill(&mut line, &units, 2);
        let carried = line.handle_word_break(&mut units, &mut env10(), &MonospaceMetrics::default(), BreakAffinity::NOT_START);
        assert!(carried.is_empty());
        assert_eq!(
            line.items(),
            &[LineItem::Element(ElementId(0)), LineItem::Element(ElementId(1))]
        );
        assert!((line.content_width() - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_fragment_before_punctuation_moves_with_its_word() {
        let mut chain = measured(&[
            ("x", WordPart::Whole),
            (" ", WordPart::Whole),
            ("a", WordPart::Start),
            ("b", WordPart::Middle),
            ("c", WordPart::End),
        ]);
        let mut markers = Vec::new();
        let mut units = Units::new(&mut chain, &mut markers);
        let mut line = Line::new();
        line.begin(0.0, 0.0, 50.0, 0.0);
        fill(&mut line, &units, 5);
        let carried = line.handle_word_break(&mut units, &mut env10(), &MonospaceMetrics::default(), BreakAffinity::NOT_START);
        assert_eq!(
            carried,
            vec![
                LineItem::Element(ElementId(2)),
                LineItem::Element(ElementId(3)),
                LineItem::Element(ElementId(4)),
            ]
        );
        assert_eq!(line.len(), 2);
    }

    #[test]
    fn test_word_break_inserts_hyphen_marker() {
        let mut chain = measured(&[("hy", WordPart::Start), ("phen", WordPart::Middle)]);
        chain[0] = {
            let mut el = Element::text(0, "hy", WordPart::Start).with_break_allowed();
            el.measure(&mut env10(), &MonospaceMetrics::default());
            el
        };
        chain[1].index = 1;
        let mut markers = Vec::new();
        let mut units = Units::new(&mut chain, &mut markers);
        let mut line = Line::new();
        line.begin(0.0, 0.0, 60.0, 0.0);
        fill(&mut line, &units, 2);
        let carried = line.handle_word_break(&mut units, &mut env10(), &MonospaceMetrics::default(), BreakAffinity::NORMAL);
        assert_eq!(carried, vec![LineItem::Element(ElementId(1))]);
        assert_eq!(line.items(), &[LineItem::Element(ElementId(0)), LineItem::Marker(0)]);
        assert!((line.content_width() - 30.0).abs() < 1e-4);
    }

    #[test]
    fn test_word_break_gives_up_beyond_lookback() {
        let mut parts = vec![("w", WordPart::Whole), ("s", WordPart::Start)];
        parts.extend(std::iter::repeat_n(("m", WordPart::Middle), WORD_BREAK_LOOKBACK));
        let mut chain = measured(&parts);
        let n = chain.len();
        let mut markers = Vec::new();
        let mut units = Units::new(&mut chain, &mut markers);
        let mut line = Line::new();
        line.begin(0.0, 0.0, 1000.0, 0.0);
        fill(&mut line, &units, n);
        let carried = line.handle_word_break(&mut units, &mut env10(), &MonospaceMetrics::default(), BreakAffinity::NORMAL);
        assert!(carried.is_empty());
        assert_eq!(line.len(), n);
        assert!(units.markers.is_empty());
    }

    #[test]
    fn test_layout_alignments() {
        for (alignment, expected_x) in [
            (Alignment::Left, 0.0),
            (Alignment::Right, 50.0),
            (Alignment::Center, 25.0),
        ] {
            let mut chain = measured(&[("abc", WordPart::Whole), (" ", WordPart::Whole), ("de", WordPart::Whole)]);
            let mut markers = Vec::new();
            let mut units = Units::new(&mut chain, &mut markers);
            let mut env = env10();
            env.set_alignment(alignment);
            let mut line = Line::new();
            line.begin(0.0, 0.0, 110.0, 0.0);
            fill(&mut line, &units, 3);
            line.layout(&mut units, &env, true, true);
            assert!((units.chain[0].x() - expected_x).abs() < 1e-4, "{alignment:?}");
            assert!((line.layout_width() - 60.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_justify_distributes_slack() {
        let mut chain = measured(&[
            ("ab", WordPart::Whole),
            (" ", WordPart::Whole),
            ("cd", WordPart::Whole),
            (" ", WordPart::Whole),
        ]);
        let mut markers = Vec::new();
        let mut units = Units::new(&mut chain, &mut markers);
        let mut env = env10();
        env.set_alignment(Alignment::Justify);
        let mut line = Line::new();
        line.begin(0.0, 0.0, 80.0, 0.0);
        fill(&mut line, &units, 4);
        line.layout(&mut units, &env, true, false);

        assert!(line.is_justified());
        assert!((line.layout_width() - 80.0).abs() < 1e-4);
        // trailing space dropped: 50 content, 30 slack over 2 gaps
        assert!((units.chain[0].gap() - 15.0).abs() < 1e-4);
        assert!((units.chain[1].gap() - 15.0).abs() < 1e-4);
        assert!((units.chain[2].x() - 60.0).abs() < 1e-4);
        assert!(!units.chain[3].occupies_space());
    }

    #[test]
    fn test_justify_skips_paragraph_end_unless_short() {
        let mut chain = measured(&[("ab", WordPart::Whole), (" ", WordPart::Whole), ("cd", WordPart::Whole)]);
        let mut markers = Vec::new();
        let mut units = Units::new(&mut chain, &mut markers);
        let mut env = env10();
        env.set_alignment(Alignment::Justify);

        let mut line = Line::new();
        line.begin(0.0, 0.0, 80.0, 0.0);
        fill(&mut line, &units, 3);
        line.layout(&mut units, &env, true, true);
        assert!(!line.is_justified());

        line.reset(&mut units);
        line.begin(0.0, 0.0, 80.0, 40.0);
        fill(&mut line, &units, 3);
        line.layout(&mut units, &env, true, true);
        assert!(line.is_justified());
    }

    #[test]
    fn test_reset_restores_hidden_space() {
        let mut chain = measured(&[("ab", WordPart::Whole), (" ", WordPart::Whole)]);
        let mut markers = Vec::new();
        let mut units = Units::new(&mut chain, &mut markers);
        let mut line = Line::new();
        line.begin(0.0, 5.0, 100.0, 0.0);
        fill(&mut line, &units, 2);
        line.layout(&mut units, &env10(), true, true);
        assert!(!units.chain[1].occupies_space());
        assert!((line.content_width() - 20.0).abs() < 1e-4);

        line.reset(&mut units);
        assert!(units.chain[1].occupies_space());
        assert!(line.is_empty());
        assert!(line.y().abs() < f32::EPSILON);
        assert!(line.content_width().abs() < f32::EPSILON);
    }

    #[test]
    fn test_ellipsize_end_trims_to_fit() {
        let mut chain = measured(&[("abc", WordPart::Whole), (" ", WordPart::Whole), ("de", WordPart::Whole)]);
        let mut markers = Vec::new();
        let mut units = Units::new(&mut chain, &mut markers);
        let mut line = Line::new();
        line.begin(0.0, 0.0, 60.0, 0.0);
        fill(&mut line, &units, 3);
        line.ellipsize_end(&mut units, &mut env10(), &MonospaceMetrics::default());
        assert_eq!(line.items(), &[LineItem::Element(ElementId(0)), LineItem::Marker(0)]);
        assert!((line.content_width() - 40.0).abs() < 1e-4);
    }
}
