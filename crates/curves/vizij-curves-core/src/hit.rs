//! Hit testing: screen position -> pointer target.
//!
//! Hosts that draw the standard glyphs (a dot per point, a dot per tangent
//! handle of selected Bezier points) can use this instead of their own
//! picking. Later curves are drawn on top, so they are tested first.

use crate::data::{CurveSet, HandleSide, Vec2};
use crate::ids::PointRef;
use crate::inputs::PointerTarget;
use crate::selection::Selection;
use crate::viewport::ViewState;

/// Find the topmost target within `radius` pixels of `screen`.
/// Handles win over points; invisible curves are skipped.
pub fn hit_test(
    set: &CurveSet,
    selection: &Selection,
    view: &ViewState,
    screen: Vec2,
    radius: f64,
) -> PointerTarget {
    let r2 = radius * radius;
    let near = |p: Vec2| {
        let d = view.to_screen(p) - screen;
        d.x * d.x + d.y * d.y <= r2
    };

    let visible = || set.curves.iter().rev().filter(|c| c.is_visible);

    // Handles are only drawn for selected points with Bezier modes.
    for curve in visible() {
        for point in curve.points.iter().rev() {
            let r = PointRef::new(curve.id, point.id);
            if !selection.contains(&r) || !point.mode.is_bezier() {
                continue;
            }
            for side in [HandleSide::Right, HandleSide::Left] {
                if near(point.handle_position(side)) {
                    return PointerTarget::handle(r, side);
                }
            }
        }
    }

    for curve in visible() {
        for point in curve.points.iter().rev() {
            if near(point.position()) {
                return PointerTarget::point(PointRef::new(curve.id, point.id));
            }
        }
    }

    PointerTarget::Background
}
