//! Single-slot gesture state for the interaction controller.
//!
//! A gesture records where it started and a deep copy of everything it will
//! mutate. Every pointer move recomputes the result from that copy plus the
//! total pixel delta, so long drags never accumulate rounding drift.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::data::{HandleSide, Point, Vec2};
use crate::ids::PointRef;
use crate::viewport::{Bounds, ViewState};

#[derive(Clone, Debug)]
pub enum GestureKind {
    /// View offsets follow the pointer 1:1 from `start_view`.
    Panning { start_view: ViewState },
    /// Rubber band from the gesture start to `current` (screen space).
    BoxSelecting { current: Vec2 },
    /// Every selected point, keyed by reference, as it was at press time.
    MovingPoints { originals: HashMap<PointRef, Point> },
    /// One tangent handle of one point.
    MovingHandle {
        target: PointRef,
        side: HandleSide,
        original: Point,
    },
}

/// Coarse gesture phase for hosts (cursor shape, overlay drawing).
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GesturePhase {
    #[default]
    Idle,
    Panning,
    BoxSelecting,
    MovingPoints,
    MovingHandle,
}

#[derive(Clone, Debug)]
pub struct Gesture {
    pub kind: GestureKind,
    /// Screen position of the press.
    pub start: Vec2,
    /// Latched once the pointer travels past the drag threshold on either axis.
    pub has_moved: bool,
}

impl Gesture {
    pub fn new(kind: GestureKind, start: Vec2) -> Self {
        Self {
            kind,
            start,
            has_moved: false,
        }
    }

    /// Total pixel delta from the press position.
    #[inline]
    pub fn delta(&self, pos: Vec2) -> Vec2 {
        pos - self.start
    }

    /// Latch `has_moved` when `pos` is farther than `threshold` px on either axis.
    pub fn track_movement(&mut self, pos: Vec2, threshold: f64) {
        if self.has_moved {
            return;
        }
        let d = self.delta(pos);
        if d.x.abs() > threshold || d.y.abs() > threshold {
            self.has_moved = true;
        }
    }

    pub fn phase(&self) -> GesturePhase {
        match self.kind {
            GestureKind::Panning { .. } => GesturePhase::Panning,
            GestureKind::BoxSelecting { .. } => GesturePhase::BoxSelecting,
            GestureKind::MovingPoints { .. } => GesturePhase::MovingPoints,
            GestureKind::MovingHandle { .. } => GesturePhase::MovingHandle,
        }
    }

    /// Current rubber band rectangle (screen space) while box selecting.
    pub fn selection_rect(&self) -> Option<Bounds> {
        match self.kind {
            GestureKind::BoxSelecting { current } => Some(Bounds::from_corners(self.start, current)),
            _ => None,
        }
    }

    /// Whether a release should commit the document to history.
    pub fn commits_on_release(&self) -> bool {
        self.has_moved
            && matches!(
                self.kind,
                GestureKind::MovingPoints { .. } | GestureKind::MovingHandle { .. }
            )
    }
}
