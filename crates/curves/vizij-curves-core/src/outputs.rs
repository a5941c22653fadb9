//! Output contracts from the editor session.
//!
//! Every session operation returns the list of effects it produced so hosts can
//! redraw, republish the share token, or refresh panels without diffing state.

use serde::{Deserialize, Serialize};

/// Discrete effects of one session operation.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SessionEvent {
    /// The CurveSet changed (live drag update, edit, undo/redo, load).
    DocumentChanged,
    /// A snapshot was appended to the history.
    HistoryCommitted { len: usize, cursor: usize },
    /// The history cursor moved.
    HistoryMoved { cursor: usize },
    SelectionChanged,
    ViewChanged,
    /// The active gesture ended without committing (cancel or sub-threshold release).
    GestureDiscarded,
}

/// Small helper for accumulating events without duplicates.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Events(Vec<SessionEvent>);

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, e: SessionEvent) {
        if !self.0.contains(&e) {
            self.0.push(e);
        }
    }

    pub fn into_vec(self) -> Vec<SessionEvent> {
        self.0
    }
}
