//! Bounded linear undo/redo over whole-document snapshots.
//!
//! The history is a list of CurveSet snapshots plus a cursor at the entry that
//! matches the live document. Undo/redo only move the cursor; commit truncates
//! any redo tail, appends, and evicts the oldest entry past capacity.

use crate::data::CurveSet;

#[derive(Clone, Debug)]
pub struct History {
    entries: Vec<CurveSet>,
    cursor: usize,
    capacity: usize,
}

impl History {
    /// History holding a single entry for `initial`. Capacity is at least 1.
    pub fn new(initial: CurveSet, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut entries = Vec::with_capacity(capacity);
        entries.push(initial);
        Self {
            entries,
            cursor: 0,
            capacity,
        }
    }

    /// Drop everything and start over from `snapshot`.
    pub fn reset(&mut self, snapshot: CurveSet) {
        self.entries.clear();
        self.entries.push(snapshot);
        self.cursor = 0;
    }

    pub fn commit(&mut self, snapshot: CurveSet) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(snapshot);
        if self.entries.len() > self.capacity {
            self.entries.remove(0);
        }
        self.cursor = self.entries.len() - 1;
    }

    /// Step back one entry. `None` at the oldest entry.
    pub fn undo(&mut self) -> Option<&CurveSet> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor)
    }

    /// Step forward one entry. `None` at the newest entry.
    pub fn redo(&mut self) -> Option<&CurveSet> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Snapshot at the cursor.
    pub fn current(&self) -> &CurveSet {
        &self.entries[self.cursor]
    }
}
