//! Input contracts for the editor session.
//!
//! Hosts translate their native pointer events into these types and pass the
//! resolved [`PointerTarget`] with each press, either from their own picking
//! or from [`crate::hit::hit_test`].

use serde::{Deserialize, Serialize};

use crate::data::HandleSide;
use crate::ids::{CurveId, PointId, PointRef};

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
    Middle,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// A primary press with any of these held pans instead of editing.
    #[inline]
    pub fn requests_pan(&self) -> bool {
        self.alt || self.ctrl || self.meta
    }
}

/// What lies under the pointer at press time.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PointerTarget {
    #[default]
    Background,
    Point {
        curve: CurveId,
        point: PointId,
    },
    Handle {
        curve: CurveId,
        point: PointId,
        side: HandleSide,
    },
}

impl PointerTarget {
    pub fn point(r: PointRef) -> Self {
        PointerTarget::Point {
            curve: r.curve,
            point: r.point,
        }
    }

    pub fn handle(r: PointRef, side: HandleSide) -> Self {
        PointerTarget::Handle {
            curve: r.curve,
            point: r.point,
            side,
        }
    }

    /// The point this target refers to, if any.
    pub fn point_ref(&self) -> Option<PointRef> {
        match *self {
            PointerTarget::Background => None,
            PointerTarget::Point { curve, point } | PointerTarget::Handle { curve, point, .. } => {
                Some(PointRef::new(curve, point))
            }
        }
    }
}
