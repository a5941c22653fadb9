//! Curve sampling for the CurveSet model.
//!
//! Model:
//! - Keys are sorted by time at every query; storage order is irrelevant.
//! - Outside the keyed range the curve holds the boundary key's value.
//! - Segment [Pi -> P(i+1)] is chosen by Pi.mode:
//!   constant holds Pi.y, linear blends by time fraction, auto/break evaluate the
//!   cubic with controls Pi + Pi.right_tangent and P(i+1) + P(i+1).left_tangent.
//!
//! API:
//! - value_at(&Curve, x) -> Option<f64>

use crate::data::{sort_by_time, Curve, CurveSet, HandleSide, Point, TangentMode};
use crate::ids::CurveId;
use crate::interp::functions::{evaluate_cubic, invert_cubic_time, lerp};

/// Sample a curve at time `x`. `None` only when the curve has no points.
pub fn value_at(curve: &Curve, x: f64) -> Option<f64> {
    value_at_points(&curve.points, x)
}

/// Same as [`value_at`] over a bare point slice. A NaN `x` reads the first key.
pub fn value_at_points(points: &[Point], x: f64) -> Option<f64> {
    let sorted = sort_by_time(points);
    let first = *sorted.first()?;
    let last = *sorted.last()?;
    if x.is_nan() || x <= first.x {
        return Some(first.y);
    }
    if x >= last.x {
        return Some(last.y);
    }

    // first.x < x < last.x, so a window with start.x <= x < end.x exists.
    let (start, end) = sorted
        .windows(2)
        .map(|w| (w[0], w[1]))
        .find(|(a, b)| x >= a.x && x < b.x)?;
    Some(segment_value(start, end, x))
}

/// Evaluate the segment starting at `start` at time `x` (start.x <= x < end.x).
pub fn segment_value(start: &Point, end: &Point, x: f64) -> f64 {
    match start.mode {
        TangentMode::Constant => start.y,
        TangentMode::Linear => {
            let span = end.x - start.x;
            if span <= 0.0 {
                return start.y;
            }
            lerp(start.y, end.y, (x - start.x) / span)
        }
        TangentMode::Auto | TangentMode::Break => {
            let c1 = start.handle_position(HandleSide::Right);
            let c2 = end.handle_position(HandleSide::Left);
            let t = invert_cubic_time(start.x, c1.x, c2.x, end.x, x);
            evaluate_cubic(start.y, c1.y, c2.y, end.y, t)
        }
    }
}

/// Values of every visible, non-empty curve at time `x`.
pub fn value_preview(set: &CurveSet, x: f64) -> Vec<(CurveId, f64)> {
    set.curves
        .iter()
        .filter(|c| c.is_visible)
        .filter_map(|c| value_at(c, x).map(|v| (c.id, v)))
        .collect()
}
