//! Point selection owned by the editor session.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::data::CurveSet;
use crate::ids::{CurveId, PointRef};
use crate::viewport::{Bounds, ViewState};

/// Set of selected `(curve, point)` pairs. References may go stale after
/// document edits; consumers resolve them against the current CurveSet.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Selection {
    points: HashSet<PointRef>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn contains(&self, r: &PointRef) -> bool {
        self.points.contains(r)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PointRef> {
        self.points.iter()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn insert(&mut self, r: PointRef) -> bool {
        self.points.insert(r)
    }

    /// Replace the whole selection with one point.
    pub fn select_only(&mut self, r: PointRef) {
        self.points.clear();
        self.points.insert(r);
    }

    pub fn replace(&mut self, refs: impl IntoIterator<Item = PointRef>) {
        self.points.clear();
        self.points.extend(refs);
    }

    /// Drop every reference into `curve`.
    pub fn remove_curve(&mut self, curve: CurveId) {
        self.points.retain(|r| r.curve != curve);
    }

    /// Graph-space bounds of the resolvable selected points.
    pub fn bounds(&self, set: &CurveSet) -> Option<Bounds> {
        Bounds::from_points(
            self.points
                .iter()
                .filter_map(|r| set.point(*r))
                .map(|p| p.position()),
        )
    }
}

/// Every point on a visible curve whose screen position lies inside `rect`
/// (screen space, inclusive).
pub fn points_in_screen_rect(set: &CurveSet, view: &ViewState, rect: Bounds) -> Vec<PointRef> {
    set.visible_points()
        .filter(|(_, p)| rect.contains(view.to_screen(p.position())))
        .map(|(r, _)| r)
        .collect()
}
