//! Paragraph layout: breaking a unit chain into positioned lines.
//!
//! [`LineLayout::layout`] makes one pass over a [`TypeModel`]: every unit is
//! measured under the style environment (with its effects applied), added to
//! the current [`Line`] until one does not fit, and the line is then salvaged
//! (a broken word moves to the next line, or gets a hyphen), aligned and
//! positioned. [`LineLayout::draw`] replays the visible lines onto a
//! [`Surface`].
//!
//! # Example
//!
//! ```
//! use textchain::{LayoutOptions, LayoutStatus, LineLayout, MonospaceMetrics, StyleEnv, TypeModel};
//!
//! let mut model = TypeModel::from_text("Hello World");
//! let mut env = StyleEnv::new();
//! env.set_text_size(10.0);
//!
//! // "Hello " fits, "World" does not
//! let mut layout = LineLayout::new(env, LayoutOptions::new(60.0));
//! let status = layout.layout(&mut model, &MonospaceMetrics::default());
//!
//! assert_eq!(status, LayoutStatus::Complete);
//! assert_eq!(layout.line_count(), 2);
//! assert_eq!(layout.width(), 50.0);
//! ```

mod line;
mod pool;

pub use line::{Line, WORD_BREAK_LOOKBACK};
pub use pool::{LinePool, PoolStats};

use crate::element::{Element, ElementId};
use crate::env::StyleEnv;
use crate::event::{emit_event, warn_with};
use crate::metrics::GlyphMetrics;
use crate::model::TypeModel;
use crate::surface::Surface;

/// Tolerance for the width-too-small check.
const WIDTH_EPSILON: f32 = 1e-3;

/// A member of a line: a chain unit, or a marker owned by the layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LineItem {
    Element(ElementId),
    /// Index into the layout's marker list.
    Marker(usize),
}

/// The units a pass works on: the model's chain plus the markers the pass
/// has created.
pub(crate) struct Units<'a> {
    pub(crate) chain: &'a mut [Element],
    pub(crate) markers: &'a mut Vec<Element>,
}

impl<'a> Units<'a> {
    pub(crate) fn new(chain: &'a mut [Element], markers: &'a mut Vec<Element>) -> Self {
        Self { chain, markers }
    }

    pub(crate) fn get(&self, item: LineItem) -> &Element {
        match item {
            LineItem::Element(id) => &self.chain[id.0],
            LineItem::Marker(i) => &self.markers[i],
        }
    }

    pub(crate) fn get_mut(&mut self, item: LineItem) -> &mut Element {
        match item {
            LineItem::Element(id) => &mut self.chain[id.0],
            LineItem::Marker(i) => &mut self.markers[i],
        }
    }

    pub(crate) fn push_marker(&mut self, marker: Element) -> LineItem {
        self.markers.push(marker);
        LineItem::Marker(self.markers.len() - 1)
    }

    pub(crate) fn pop_marker(&mut self) {
        self.markers.pop();
    }
}

/// Where to elide content that does not fit in `max_lines`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Ellipsize {
    Start,
    Middle,
    /// Trim the last visible line and end it with "…".
    End,
}

/// Layout configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutOptions {
    /// Maximum line width. Unbounded by default.
    pub width_limit: f32,
    /// Number of lines shown by [`LineLayout::draw`].
    pub max_lines: usize,
    /// Lay out every line even past `max_lines`, so the full height is known.
    pub calculate_whole_lines: bool,
    pub ellipsize: Option<Ellipsize>,
    /// Hide whitespace at the end of a line.
    pub drop_trailing_space: bool,
    /// A paragraph's last line is justified only when its slack is below
    /// this width.
    pub last_line_justify_max_width: f32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            width_limit: f32::INFINITY,
            max_lines: usize::MAX,
            calculate_whole_lines: false,
            ellipsize: None,
            drop_trailing_space: true,
            last_line_justify_max_width: 0.0,
        }
    }
}

impl LayoutOptions {
    /// Options for lines at most `width_limit` wide.
    #[must_use]
    pub fn new(width_limit: f32) -> Self {
        Self {
            width_limit,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_width_limit(mut self, width_limit: f32) -> Self {
        self.width_limit = width_limit;
        self
    }

    #[must_use]
    pub fn with_max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = max_lines;
        self
    }

    #[must_use]
    pub fn with_calculate_whole_lines(mut self, enabled: bool) -> Self {
        self.calculate_whole_lines = enabled;
        self
    }

    #[must_use]
    pub fn with_ellipsize(mut self, ellipsize: Option<Ellipsize>) -> Self {
        self.ellipsize = ellipsize;
        self
    }

    #[must_use]
    pub fn with_drop_trailing_space(mut self, enabled: bool) -> Self {
        self.drop_trailing_space = enabled;
        self
    }

    #[must_use]
    pub fn with_last_line_justify_max_width(mut self, width: f32) -> Self {
        self.last_line_justify_max_width = width;
        self
    }

    /// Whether a pass may stop once `max_lines` lines exist.
    fn stops_early(&self) -> bool {
        !self.calculate_whole_lines && matches!(self.ellipsize, None | Some(Ellipsize::End))
    }
}

/// Outcome of a layout pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LayoutStatus {
    /// Every unit was laid out.
    #[default]
    Complete,
    /// The pass stopped at `max_lines` with content left over.
    Truncated,
    /// A single unit was wider than the width limit; the pass stopped before
    /// it, keeping the lines already produced.
    WidthTooSmall,
}

/// Lays out a [`TypeModel`] into lines and draws them.
#[derive(Debug)]
pub struct LineLayout {
    env: StyleEnv,
    options: LayoutOptions,
    lines: Vec<Line>,
    markers: Vec<Element>,
    pool: LinePool,
    status: LayoutStatus,
    width: f32,
    height: f32,
}

impl LineLayout {
    /// A layout starting each pass from `env`.
    #[must_use]
    pub fn new(env: StyleEnv, options: LayoutOptions) -> Self {
        Self {
            env,
            options,
            lines: Vec::new(),
            markers: Vec::new(),
            pool: LinePool::new(),
            status: LayoutStatus::Complete,
            width: 0.0,
            height: 0.0,
        }
    }

    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------

    #[must_use]
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Replace the options; takes effect on the next pass.
    pub fn set_options(&mut self, options: LayoutOptions) {
        self.options = options;
    }

    /// The environment every pass and draw starts from.
    #[must_use]
    pub fn env(&self) -> &StyleEnv {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut StyleEnv {
        &mut self.env
    }

    // ------------------------------------------------------------------
    // Results
    // ------------------------------------------------------------------

    /// Every line produced by the last pass.
    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// The lines [`draw`](Self::draw) renders: the first `max_lines`.
    #[must_use]
    pub fn visible_lines(&self) -> &[Line] {
        let count = self.lines.len().min(self.options.max_lines);
        &self.lines[..count]
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Widest line's layout width.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Bottom of the last line.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Bottom of the last visible line.
    #[must_use]
    pub fn visible_height(&self) -> f32 {
        self.visible_lines()
            .last()
            .map_or(0.0, |line| line.y() + line.height())
    }

    #[must_use]
    pub fn status(&self) -> LayoutStatus {
        self.status
    }

    #[must_use]
    pub fn pool_stats(&self) -> PoolStats {
        self.pool.stats()
    }

    /// The unit a line member stands for: a chain unit of `model`, or one of
    /// this layout's markers.
    #[must_use]
    pub fn resolve<'m>(&'m self, model: &'m TypeModel, item: LineItem) -> Option<&'m Element> {
        match item {
            LineItem::Element(id) => model.get(id),
            LineItem::Marker(i) => self.markers.get(i),
        }
    }

    /// The unit of `model` laid out under the point `(x, y)`.
    #[must_use]
    pub fn hit_test(&self, model: &TypeModel, x: f32, y: f32) -> Option<ElementId> {
        let line = self
            .visible_lines()
            .iter()
            .find(|line| y >= line.y() && y < line.y() + line.height())?;
        line.items().iter().find_map(|item| match *item {
            LineItem::Element(id) => model
                .get(id)
                .filter(|el| el.occupies_space() && x >= el.x() && x < el.x() + el.width() + el.gap())
                .map(|_| id),
            LineItem::Marker(_) => None,
        })
    }

    /// Source char offset of the unit under `(x, y)`.
    #[must_use]
    pub fn element_at(&self, model: &TypeModel, x: f32, y: f32) -> Option<usize> {
        self.hit_test(model, x, y)
            .and_then(|id| model.get(id))
            .map(Element::source_index)
    }

    // ------------------------------------------------------------------
    // Pass
    // ------------------------------------------------------------------

    /// Lay out `model`, replacing the lines of any previous pass.
    pub fn layout(&mut self, model: &mut TypeModel, metrics: &dyn GlyphMetrics) -> LayoutStatus {
        let first = model.first();
        let width_limit = self.options.width_limit;
        let justify_max = self.options.last_line_justify_max_width;
        let drop_space = self.options.drop_trailing_space;
        let max_lines = self.options.max_lines;
        let stops_early = self.options.stops_early();
        let ellipsize_end = self.options.ellipsize == Some(Ellipsize::End);

        let mut units = Units::new(model.elements_mut(), &mut self.markers);
        for line in self.lines.drain(..) {
            self.pool.release(line, &mut units);
        }
        units.markers.clear();

        let mut env = self.env.snapshot();
        let mut status = LayoutStatus::Complete;
        let mut y = 0.0_f32;
        let mut line = self.pool.acquire();
        line.begin(0.0, y, width_limit, justify_max);

        let mut cursor = first;
        'units: while let Some(id) = cursor {
            if stops_early && self.lines.len() >= max_lines {
                status = LayoutStatus::Truncated;
                break;
            }
            let item = LineItem::Element(id);
            let el = &mut units.chain[id.0];
            // lines finished in front of this unit must not see its effects
            let mut before = el.has_effects().then(|| env.snapshot());
            el.layout_hidden = false;
            el.measure(&mut env, metrics);
            cursor = el.next();
            let is_break = el.is_paragraph_break();
            let is_space = el.is_whitespace();
            let affinity = el.affinity();
            let width = if el.occupies_space() { el.width() } else { 0.0 };

            if is_break {
                line.add(&units, item);
                line.layout(&mut units, &env, drop_space, true);
                y += line.height() + env.paragraph_spacing();
                self.lines.push(line);
                line = self.pool.acquire();
                line.begin(0.0, y, width_limit, justify_max);
                continue;
            }

            // carried-over units may leave too little room, so break again
            let hangs = drop_space && is_space;
            while !line.is_empty() && !hangs && line.would_overflow(width) {
                let line_env = before.as_mut().unwrap_or(&mut env);
                let salvaged = line.handle_word_break(&mut units, line_env, metrics, affinity);
                line.layout(&mut units, line_env, drop_space, false);
                y += line.height() + line_env.line_spacing();
                self.lines.push(line);
                line = self.pool.acquire();
                line.begin(0.0, y, width_limit, justify_max);
                for carried in salvaged {
                    line.add(&units, carried);
                }
                if stops_early && self.lines.len() >= max_lines {
                    if let Some(saved) = before.take() {
                        env = saved;
                    }
                    status = LayoutStatus::Truncated;
                    break 'units;
                }
            }

            if line.is_empty() && width > width_limit + WIDTH_EPSILON {
                warn_with(|| {
                    format!(
                        "unit {} is {width} wide, more than the width limit {width_limit}; stopping layout",
                        id.0
                    )
                });
                status = LayoutStatus::WidthTooSmall;
                break;
            }
            line.add(&units, item);
        }

        let trailing = status == LayoutStatus::Complete && !line.is_empty();
        if trailing && stops_early && self.lines.len() >= max_lines {
            status = LayoutStatus::Truncated;
        }
        if trailing && status == LayoutStatus::Complete {
            line.layout(&mut units, &env, drop_space, true);
            self.lines.push(line);
        } else {
            self.pool.release(line, &mut units);
        }

        if status == LayoutStatus::Truncated && ellipsize_end {
            if let Some(last) = self.lines.last_mut() {
                last.ellipsize_end(&mut units, &mut env, metrics);
                last.layout(&mut units, &env, drop_space, true);
            }
        }

        self.width = self.lines.iter().map(Line::layout_width).fold(0.0, f32::max);
        self.height = self.lines.last().map_or(0.0, |line| line.y() + line.height());
        self.status = status;
        emit_event(
            "layout",
            &format!(
                "lines={} width={} height={} status={status:?}",
                self.lines.len(),
                self.width,
                self.height
            ),
        );
        status
    }

    /// Hand the lines of the last pass to the caller, leaving the layout
    /// empty. Give them back with [`recycle`](Self::recycle) to undo their
    /// visibility overrides and reuse their storage.
    pub fn pop_all(&mut self) -> Vec<Line> {
        self.width = 0.0;
        self.height = 0.0;
        std::mem::take(&mut self.lines)
    }

    /// Return lines taken with [`pop_all`](Self::pop_all) to the pool.
    pub fn recycle(&mut self, model: &mut TypeModel, lines: Vec<Line>) {
        let mut units = Units::new(model.elements_mut(), &mut self.markers);
        for line in lines {
            self.pool.release(line, &mut units);
        }
    }

    // ------------------------------------------------------------------
    // Drawing
    // ------------------------------------------------------------------

    /// Draw the visible lines with their effects applied.
    ///
    /// Every unit of a drawn line applies and undoes its effects, hidden or
    /// not, so the environment is balanced at each unit.
    pub fn draw(&self, model: &TypeModel, surface: &mut dyn Surface) {
        let mut env = self.env.snapshot();
        for line in self.visible_lines() {
            for item in line.items() {
                if let Some(el) = self.resolve(model, *item) {
                    el.draw(&mut env, surface);
                }
            }
        }
    }

    /// Draw with the origin moved to `(x, y)`.
    pub fn draw_at(&self, model: &TypeModel, surface: &mut dyn Surface, x: f32, y: f32) {
        surface.save();
        surface.translate(x, y);
        self.draw(model, surface);
        surface.restore();
    }
}
