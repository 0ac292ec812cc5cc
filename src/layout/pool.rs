//! Free list of [`Line`]s reused across layout passes.

use super::{Line, Units};

/// Pool counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Lines allocated because the free list was empty.
    pub created: usize,
    /// Lines handed out from the free list.
    pub reused: usize,
    /// Lines currently waiting in the free list.
    pub free: usize,
}

/// Free list of lines.
///
/// A released line is reset before it goes back on the list, so nothing a
/// previous pass left behind (members, geometry, hidden trailing spaces) can
/// leak into the next one.
#[derive(Debug, Default)]
pub struct LinePool {
    free: Vec<Line>,
    created: usize,
    reused: usize,
}

impl LinePool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a clean line from the free list, or allocate one.
    pub fn acquire(&mut self) -> Line {
        if let Some(line) = self.free.pop() {
            self.reused += 1;
            line
        } else {
            self.created += 1;
            Line::new()
        }
    }

    /// Reset `line` and return it to the free list.
    pub(crate) fn release(&mut self, mut line: Line, units: &mut Units<'_>) {
        line.reset(units);
        self.free.push(line);
    }

    #[must_use]
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            created: self.created,
            reused: self.reused,
            free: self.free.len(),
        }
    }
}
