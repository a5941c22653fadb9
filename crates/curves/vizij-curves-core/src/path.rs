//! Path geometry for drawing a curve.
//!
//! The engine does not rasterize; it emits a list of segment descriptors that
//! an external renderer (canvas, SVG, GPU) replays.

use serde::{Deserialize, Serialize};

use crate::data::{sort_by_time, HandleSide, Point, TangentMode, Vec2};
use crate::viewport::ViewState;

/// One draw command. Coordinates are in graph space unless mapped with
/// [`PathCommand::to_screen`].
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "cmd", rename_all = "camelCase")]
pub enum PathCommand {
    MoveTo { to: Vec2 },
    LineTo { to: Vec2 },
    CubicTo { c1: Vec2, c2: Vec2, to: Vec2 },
}

impl PathCommand {
    /// Map every coordinate through the view transform. Affine maps preserve
    /// Bezier control polygons, so the mapped path is exact.
    pub fn to_screen(&self, view: &ViewState) -> PathCommand {
        match *self {
            PathCommand::MoveTo { to } => PathCommand::MoveTo {
                to: view.to_screen(to),
            },
            PathCommand::LineTo { to } => PathCommand::LineTo {
                to: view.to_screen(to),
            },
            PathCommand::CubicTo { c1, c2, to } => PathCommand::CubicTo {
                c1: view.to_screen(c1),
                c2: view.to_screen(c2),
                to: view.to_screen(to),
            },
        }
    }
}

/// Build the draw commands for a set of points (sorted by time internally).
///
/// Zero points yield an empty path and one point yields a lone `MoveTo`.
/// Each following segment is shaped by its start point's mode:
/// linear -> `LineTo`, constant -> horizontal then vertical `LineTo`,
/// auto/break -> `CubicTo` with the same controls the evaluator uses.
pub fn path_segments(points: &[Point]) -> Vec<PathCommand> {
    let sorted = sort_by_time(points);
    let Some(first) = sorted.first() else {
        return Vec::new();
    };

    let mut out = Vec::with_capacity(1 + 2 * (sorted.len() - 1));
    out.push(PathCommand::MoveTo {
        to: first.position(),
    });

    for w in sorted.windows(2) {
        let (start, end) = (w[0], w[1]);
        match start.mode {
            TangentMode::Linear => out.push(PathCommand::LineTo {
                to: end.position(),
            }),
            TangentMode::Constant => {
                out.push(PathCommand::LineTo {
                    to: Vec2::new(end.x, start.y),
                });
                out.push(PathCommand::LineTo {
                    to: end.position(),
                });
            }
            TangentMode::Auto | TangentMode::Break => out.push(PathCommand::CubicTo {
                c1: start.handle_position(HandleSide::Right),
                c2: end.handle_position(HandleSide::Left),
                to: end.position(),
            }),
        }
    }
    out
}

/// Convenience: path in display space.
pub fn screen_path(points: &[Point], view: &ViewState) -> Vec<PathCommand> {
    path_segments(points)
        .iter()
        .map(|c| c.to_screen(view))
        .collect()
}
