//! The document model: the unit chain, its source text and the effects
//! attached to it.
//!
//! A [`TypeModel`] owns the arena of [`Element`]s, the map from source char
//! offsets to units, and the head of the sparse effect list. Its structure is
//! fixed once built; afterwards only effect bindings (through
//! [`TypeModel::add_effect`] and [`EffectRemover`]) and the geometry written
//! by a layout pass change.
//!
//! # Example
//!
//! ```
//! use textchain::{LayoutOptions, LineLayout, MonospaceMetrics, Rgba, StyleEnv, TypeModel};
//!
//! let mut model = TypeModel::from_text("Hello World");
//! let mut remover = model.add_bg_effect(6, 11, Rgba::YELLOW).unwrap().unwrap();
//!
//! let mut layout = LineLayout::new(StyleEnv::new(), LayoutOptions::new(1000.0));
//! layout.layout(&mut model, &MonospaceMetrics::default());
//! assert_eq!(layout.line_count(), 1);
//!
//! assert!(remover.remove(&mut model));
//! assert!(!remover.remove(&mut model));
//! ```

mod builder;
mod tokenize;

pub use builder::ChainBuilder;
pub use tokenize::{Granularity, GlyphLookup, Tokenizer};

use crate::color::Rgba;
use crate::element::effect::{inset_effect, remove_from_effect_list_if_needed};
use crate::element::{EffectBinding, EffectId, Element, ElementId};
use crate::env::{PropertyKey, StyleEnv};
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Source of [`TypeModel`] identities, so a remover only acts on its own model.
static NEXT_MODEL_ID: AtomicU64 = AtomicU64::new(1);

/// One live effect: its unit span and the keys it scopes.
#[derive(Clone, Debug)]
struct EffectRecord {
    id: EffectId,
    first: usize,
    last: usize,
    keys: Vec<PropertyKey>,
}

impl EffectRecord {
    /// Partial overlap: neither span contains the other.
    fn crosses(&self, first: usize, last: usize) -> bool {
        (self.first < first && first <= self.last && self.last < last)
            || (first < self.first && self.first <= last && last < self.last)
    }
}

/// The unit chain of one document.
#[derive(Debug)]
pub struct TypeModel {
    id: u64,
    source: String,
    elements: Vec<Element>,
    index_map: HashMap<usize, ElementId>,
    effect_head: Option<ElementId>,
    effects: Vec<EffectRecord>,
    next_effect: u64,
}

impl TypeModel {
    fn from_parts(source: String, mut elements: Vec<Element>) -> Self {
        let len = elements.len();
        let mut index_map = HashMap::new();
        for (i, el) in elements.iter_mut().enumerate() {
            el.index = i;
            el.prev = i.checked_sub(1).map(ElementId);
            el.next = (i + 1 < len).then_some(ElementId(i + 1));
            for offset in el.source_index()..el.source_index() + el.source_len() {
                index_map.insert(offset, ElementId(i));
            }
        }
        Self {
            id: NEXT_MODEL_ID.fetch_add(1, Ordering::Relaxed),
            source,
            elements,
            index_map,
            effect_head: None,
            effects: Vec::new(),
            next_effect: 1,
        }
    }

    /// Split `text` into one unit per word boundary, with paragraph breaks at
    /// line terminators.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Tokenizer::new().tokenize(text)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Number of units in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn first(&self) -> Option<ElementId> {
        (!self.elements.is_empty()).then_some(ElementId(0))
    }

    #[must_use]
    pub fn last(&self) -> Option<ElementId> {
        self.elements.len().checked_sub(1).map(ElementId)
    }

    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    /// Mutable access to a unit, e.g. to change its visibility between
    /// passes.
    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id.0)
    }

    pub(crate) fn elements_mut(&mut self) -> &mut [Element] {
        &mut self.elements
    }

    /// Units in chain order.
    pub fn iter(&self) -> impl Iterator<Item = &Element> + '_ {
        std::iter::successors(self.first(), |id| self.elements[id.0].next())
            .map(|id| &self.elements[id.0])
    }

    /// The unit covering source char offset `index`.
    #[must_use]
    pub fn element_at_source(&self, index: usize) -> Option<ElementId> {
        self.index_map.get(&index).copied()
    }

    /// First unit that carries an effect binding.
    #[must_use]
    pub fn effect_head(&self) -> Option<ElementId> {
        self.effect_head
    }

    /// Units linked into the effect list, in chain order.
    #[must_use]
    pub fn effect_list(&self) -> Vec<ElementId> {
        std::iter::successors(self.effect_head, |id| self.elements[id.0].next_effect()).collect()
    }

    /// Number of effects currently attached.
    #[must_use]
    pub fn effect_count(&self) -> usize {
        self.effects.len()
    }

    // ------------------------------------------------------------------
    // Effects
    // ------------------------------------------------------------------

    /// Scope `keys` to the source char range `[start, end)`, running
    /// `updater` on entry.
    ///
    /// The range resolves to the unit containing `start` and the unit
    /// containing `end - 1`. Those keys are saved before the first unit is
    /// processed and restored after the last one, so the change is visible
    /// exactly while the units of the range are measured and drawn.
    ///
    /// Returns `Ok(None)` when either end of the range is not covered by a
    /// unit, or when `keys` is empty.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyRange`] when `start >= end`;
    /// [`Error::CrossingEffect`] when the resolved unit span partially
    /// overlaps an existing effect on one of the same keys.
    pub fn add_effect<F>(
        &mut self,
        start: usize,
        end: usize,
        keys: &[PropertyKey],
        updater: F,
    ) -> Result<Option<EffectRemover>>
    where
        F: Fn(&mut StyleEnv) + 'static,
    {
        if start >= end {
            return Err(Error::EmptyRange { start, end });
        }
        let (Some(first), Some(last)) = (
            self.element_at_source(start),
            self.element_at_source(end - 1),
        ) else {
            return Ok(None);
        };
        let mut scoped: Vec<PropertyKey> = Vec::with_capacity(keys.len());
        for key in keys {
            if !scoped.contains(key) {
                scoped.push(*key);
            }
        }
        if scoped.is_empty() {
            return Ok(None);
        }
        let (first, last) = (first.0, last.0);
        for record in &self.effects {
            if !record.crosses(first, last) {
                continue;
            }
            if let Some(key) = scoped.iter().find(|k| record.keys.contains(k)) {
                return Err(Error::CrossingEffect {
                    key: *key,
                    existing: (record.first, record.last),
                    requested: (first, last),
                });
            }
        }

        let id = EffectId(self.next_effect);
        self.next_effect += 1;
        if first == last {
            self.elements[first].attach_binding(EffectBinding {
                effect: id,
                save: scoped.clone(),
                restore: scoped.clone(),
                updater: Some(Box::new(updater)),
                span_start: first,
                span_end: last,
            });
        } else {
            self.elements[first].attach_binding(EffectBinding {
                effect: id,
                save: scoped.clone(),
                restore: Vec::new(),
                updater: Some(Box::new(updater)),
                span_start: first,
                span_end: last,
            });
            self.elements[last].attach_binding(EffectBinding {
                effect: id,
                save: Vec::new(),
                restore: scoped.clone(),
                updater: None,
                span_start: first,
                span_end: last,
            });
        }
        self.link_effect(ElementId(first));
        self.link_effect(ElementId(last));
        self.effects.push(EffectRecord {
            id,
            first,
            last,
            keys: scoped,
        });
        Ok(Some(EffectRemover::new(self.id, id)))
    }

    /// Fill the background of the units in `[start, end)`.
    pub fn add_bg_effect(&mut self, start: usize, end: usize, color: Rgba) -> Result<Option<EffectRemover>> {
        self.add_effect(start, end, &[PropertyKey::BackgroundColor], move |env| {
            env.set_background(Some(color));
        })
    }

    /// Draw the text of the units in `[start, end)` in `color`.
    pub fn add_text_color_effect(&mut self, start: usize, end: usize, color: Rgba) -> Result<Option<EffectRemover>> {
        self.add_effect(start, end, &[PropertyKey::TextColor], move |env| {
            env.set_text_color(color);
        })
    }

    /// Underline the units in `[start, end)` in `color`.
    pub fn add_underline_effect(&mut self, start: usize, end: usize, color: Rgba) -> Result<Option<EffectRemover>> {
        self.add_effect(start, end, &[PropertyKey::Underline], move |env| {
            env.set_underline(Some(color));
        })
    }

    /// Detach every binding of `id`. Returns `false` if the effect is not
    /// attached to this model.
    pub fn remove_effect(&mut self, id: EffectId) -> bool {
        let Some(pos) = self.effects.iter().position(|r| r.id == id) else {
            return false;
        };
        let record = self.effects.remove(pos);
        for index in [record.first, record.last] {
            let unit = ElementId(index);
            self.elements[index].detach_effect(id);
            self.effect_head =
                remove_from_effect_list_if_needed(&mut self.elements, unit, self.effect_head);
        }
        true
    }

    /// Put `unit` into the effect list and move the head back if it now
    /// starts earlier.
    fn link_effect(&mut self, unit: ElementId) {
        let Some(head) = self.effect_head else {
            self.effect_head = Some(unit);
            return;
        };
        inset_effect(&mut self.elements, head, unit);
        let mut head = head;
        while let Some(prev) = self.elements[head.0].prev_effect() {
            head = prev;
        }
        self.effect_head = Some(head);
    }
}

/// Handle returned by [`TypeModel::add_effect`] that undoes exactly that
/// effect.
///
/// A remover belongs to the model that issued it; passed any other model it
/// does nothing. [`remove`](Self::remove) is idempotent: the first call
/// detaches the effect's bindings, later calls do nothing and return `false`.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "dropping the remover leaves the effect attached with no way to remove it"]
pub struct EffectRemover {
    model: u64,
    id: EffectId,
    removed: bool,
}

impl EffectRemover {
    fn new(model: u64, id: EffectId) -> Self {
        Self {
            model,
            id,
            removed: false,
        }
    }

    #[must_use]
    pub fn id(&self) -> EffectId {
        self.id
    }

    #[must_use]
    pub fn is_removed(&self) -> bool {
        self.removed
    }

    /// Whether this remover was issued by `model`.
    #[must_use]
    pub fn belongs_to(&self, model: &TypeModel) -> bool {
        self.model == model.id
    }

    /// Detach the effect from `model`. Returns whether anything was removed.
    pub fn remove(&mut self, model: &mut TypeModel) -> bool {
        if self.removed || !self.belongs_to(model) {
            return false;
        }
        self.removed = true;
        model.remove_effect(self.id)
    }
}
