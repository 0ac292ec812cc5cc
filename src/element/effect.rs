//! Effect bindings and the sparse effect list threaded through the chain.
//!
//! Only units that begin or end an effect carry bindings, and only those
//! units are linked into the effect list through `prev_effect`/`next_effect`.
//! The list is ordered by element index; its head is owned by the model.

use super::{Element, ElementId};
use crate::env::{PropertyKey, StyleEnv};
use std::fmt;

/// Closure that mutates the environment while an effect is active.
pub type Updater = Box<dyn Fn(&mut StyleEnv)>;

/// Identity of one added effect within a model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EffectId(pub(crate) u64);

/// The part of one effect attached to one unit.
///
/// The start unit holds the save-types and the updater, the end unit holds
/// the restore-types; a single-unit effect holds all three in one binding.
pub struct EffectBinding {
    pub(crate) effect: EffectId,
    pub(crate) save: Vec<PropertyKey>,
    pub(crate) restore: Vec<PropertyKey>,
    pub(crate) updater: Option<Updater>,
    /// Index of the effect's start unit.
    pub(crate) span_start: usize,
    /// Index of the effect's end unit.
    pub(crate) span_end: usize,
}

impl EffectBinding {
    #[must_use]
    pub fn effect(&self) -> EffectId {
        self.effect
    }

    #[must_use]
    pub fn save_types(&self) -> &[PropertyKey] {
        &self.save
    }

    #[must_use]
    pub fn restore_types(&self) -> &[PropertyKey] {
        &self.restore
    }

    /// First and last unit index of the effect, inclusive.
    #[must_use]
    pub fn span(&self) -> (usize, usize) {
        (self.span_start, self.span_end)
    }

    /// Bindings sort outer-first: later end, then earlier start.
    fn nesting_key(&self) -> (usize, std::cmp::Reverse<usize>) {
        (self.span_end, std::cmp::Reverse(self.span_start))
    }

    #[must_use]
    pub fn has_updater(&self) -> bool {
        self.updater.is_some()
    }

    /// Push this binding's save-types, then run its updater.
    pub(crate) fn enter(&self, env: &mut StyleEnv) {
        for key in &self.save {
            env.save(*key);
        }
        if let Some(updater) = &self.updater {
            updater(env);
        }
    }

    /// Pop this binding's restore-types, innermost first.
    pub(crate) fn exit(&self, env: &mut StyleEnv) {
        for key in self.restore.iter().rev() {
            env.restore(*key);
        }
    }
}

impl fmt::Debug for EffectBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EffectBinding")
            .field("effect", &self.effect)
            .field("save", &self.save)
            .field("restore", &self.restore)
            .field("updater", &self.updater.is_some())
            .field("span_start", &self.span_start)
            .field("span_end", &self.span_end)
            .finish()
    }
}

impl Element {
    /// Attach a binding, keeping enclosing effects ahead of the effects they
    /// enclose so nested effects sharing this unit pop in order. Equal spans
    /// keep insertion order.
    pub(crate) fn attach_binding(&mut self, binding: EffectBinding) {
        let key = binding.nesting_key();
        let pos = self
            .bindings
            .iter()
            .position(|b| b.nesting_key() < key)
            .unwrap_or(self.bindings.len());
        self.bindings.insert(pos, binding);
    }

    /// Detach every binding of `effect`. Returns whether any was removed.
    pub(crate) fn detach_effect(&mut self, effect: EffectId) -> bool {
        let before = self.bindings.len();
        self.bindings.retain(|b| b.effect != effect);
        self.bindings.len() != before
    }

    pub(crate) fn is_effect_linked(&self) -> bool {
        self.prev_effect.is_some() || self.next_effect.is_some()
    }
}

/// Insert `other` into the effect list that `from` already belongs to,
/// walking from `from` towards `other`'s index.
///
/// A node that is already linked is left where it is.
pub(crate) fn inset_effect(elements: &mut [Element], from: ElementId, other: ElementId) {
    if from == other || elements[other.0].is_effect_linked() {
        return;
    }
    let target = elements[other.0].index;
    if target > elements[from.0].index {
        let mut cur = from;
        while let Some(next) = elements[cur.0].next_effect {
            if elements[next.0].index >= target {
                break;
            }
            cur = next;
        }
        let after = elements[cur.0].next_effect;
        elements[other.0].prev_effect = Some(cur);
        elements[other.0].next_effect = after;
        elements[cur.0].next_effect = Some(other);
        if let Some(after) = after {
            elements[after.0].prev_effect = Some(other);
        }
    } else {
        let mut cur = from;
        while let Some(prev) = elements[cur.0].prev_effect {
            if elements[prev.0].index <= target {
                break;
            }
            cur = prev;
        }
        let before = elements[cur.0].prev_effect;
        elements[other.0].next_effect = Some(cur);
        elements[other.0].prev_effect = before;
        elements[cur.0].prev_effect = Some(other);
        if let Some(before) = before {
            elements[before.0].next_effect = Some(other);
        }
    }
}

/// Unlink `id` from the effect list once it carries no bindings.
///
/// Returns the head of the list after the removal.
pub(crate) fn remove_from_effect_list_if_needed(
    elements: &mut [Element],
    id: ElementId,
    head: Option<ElementId>,
) -> Option<ElementId> {
    if elements[id.0].has_effects() {
        return head;
    }
    let prev = elements[id.0].prev_effect.take();
    let next = elements[id.0].next_effect.take();
    if let Some(prev) = prev {
        elements[prev.0].next_effect = next;
    }
    if let Some(next) = next {
        elements[next.0].prev_effect = prev;
    }
    if head == Some(id) { next } else { head }
}
