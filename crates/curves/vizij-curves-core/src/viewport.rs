//! View transform between graph space (time, value) and display space (pixels).
//!
//! `screen = graph * scale + offset`, independently per axis. `scale_y` is
//! normally negative because values grow upward while pixels grow downward.

use serde::{Deserialize, Serialize};

use crate::data::Vec2;

/// Smallest bounding-box span per axis used by fit-to-bounds.
pub const MIN_FIT_SPAN: f64 = 0.1;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub offset_x: f64,
    pub offset_y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl Default for ViewState {
    /// Origin near the left-center of a typical panel, 100 px per unit.
    fn default() -> Self {
        Self {
            offset_x: 60.0,
            offset_y: 300.0,
            scale_x: 100.0,
            scale_y: -100.0,
        }
    }
}

/// Axis excluded from a zoom gesture.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

/// Axis-aligned bounds in graph space.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    /// Bounds of an iterator of positions, `None` when empty.
    pub fn from_points(mut points: impl Iterator<Item = Vec2>) -> Option<Self> {
        let first = points.next()?;
        let mut b = Bounds {
            min: first,
            max: first,
        };
        for p in points {
            b.min.x = b.min.x.min(p.x);
            b.min.y = b.min.y.min(p.y);
            b.max.x = b.max.x.max(p.x);
            b.max.y = b.max.y.max(p.y);
        }
        Some(b)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            0.5 * (self.min.x + self.max.x),
            0.5 * (self.min.y + self.max.y),
        )
    }

    /// Inclusive containment test.
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Normalized rectangle spanned by two corners.
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        Bounds {
            min: Vec2::new(a.x.min(b.x), a.y.min(b.y)),
            max: Vec2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }
}

impl ViewState {
    #[inline]
    pub fn to_screen(&self, graph: Vec2) -> Vec2 {
        Vec2::new(
            graph.x * self.scale_x + self.offset_x,
            graph.y * self.scale_y + self.offset_y,
        )
    }

    /// Inverse of [`to_screen`](Self::to_screen). Scales are never zero: zoom
    /// clamps them and fit-to-bounds enforces a minimum span.
    #[inline]
    pub fn to_graph(&self, screen: Vec2) -> Vec2 {
        Vec2::new(
            (screen.x - self.offset_x) / self.scale_x,
            (screen.y - self.offset_y) / self.scale_y,
        )
    }

    /// Convert a pixel delta into graph units at the current scale.
    #[inline]
    pub fn delta_to_graph(&self, delta: Vec2) -> Vec2 {
        Vec2::new(delta.x / self.scale_x, delta.y / self.scale_y)
    }

    /// Zoom by `factor` anchored at `pivot` (screen space). The graph point under
    /// the pivot stays under the pivot. `locked` keeps that axis unscaled.
    /// Resulting scale magnitudes are clamped to `[min_scale, max_scale]`.
    pub fn zoom(
        &mut self,
        pivot: Vec2,
        factor: f64,
        locked: Option<Axis>,
        min_scale: f64,
        max_scale: f64,
    ) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let anchor = self.to_graph(pivot);
        let fx = if locked == Some(Axis::X) { 1.0 } else { factor };
        let fy = if locked == Some(Axis::Y) { 1.0 } else { factor };
        self.scale_x = clamp_scale(self.scale_x * fx, min_scale, max_scale);
        self.scale_y = clamp_scale(self.scale_y * fy, min_scale, max_scale);
        self.offset_x = pivot.x - anchor.x * self.scale_x;
        self.offset_y = pivot.y - anchor.y * self.scale_y;
    }

    /// Shift the view by a pixel delta.
    #[inline]
    pub fn pan(&mut self, delta: Vec2) {
        self.offset_x += delta.x;
        self.offset_y += delta.y;
    }

    /// Fit `bounds` (plus `padding` pixels per side) into a viewport of
    /// `viewport` pixels, centered. `None` resets to `fallback`.
    pub fn fit_to_bounds(
        &mut self,
        bounds: Option<Bounds>,
        viewport: Vec2,
        padding: f64,
        fallback: ViewState,
    ) {
        let Some(b) = bounds else {
            *self = fallback;
            return;
        };
        let span_x = (b.max.x - b.min.x).max(MIN_FIT_SPAN);
        let span_y = (b.max.y - b.min.y).max(MIN_FIT_SPAN);
        let usable_w = (viewport.x - 2.0 * padding).max(1.0);
        let usable_h = (viewport.y - 2.0 * padding).max(1.0);

        self.scale_x = usable_w / span_x;
        self.scale_y = -(usable_h / span_y);

        let c = b.center();
        self.offset_x = 0.5 * viewport.x - c.x * self.scale_x;
        self.offset_y = 0.5 * viewport.y - c.y * self.scale_y;
    }
}

fn clamp_scale(s: f64, min_scale: f64, max_scale: f64) -> f64 {
    let sign = if s < 0.0 { -1.0 } else { 1.0 };
    sign * s.abs().clamp(min_scale, max_scale)
}
