//! Canonical curve document model (CurveSet).
//!
//! Points are stored unordered; every consumer (evaluation, path generation,
//! bounds) sorts by `x` on demand. Tangents are offsets relative to their point.

use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::config::EditorConfig;
use crate::ids::{CurveId, PointId, PointRef};

/// 2D vector used for positions, tangent offsets and screen deltas.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    #[inline]
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// Tangent/segment mode of a point. Governs handle editing and how the
/// segment starting at the point is evaluated.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TangentMode {
    /// Bezier with point-symmetric handles (`left == -right`).
    #[default]
    Auto,
    Linear,
    /// Bezier with independent handles.
    Break,
    /// Step hold of the start value.
    Constant,
}

impl TangentMode {
    /// Fixed ordering used by the compact codec's mode index.
    pub const ALL: [TangentMode; 4] = [
        TangentMode::Auto,
        TangentMode::Linear,
        TangentMode::Break,
        TangentMode::Constant,
    ];

    #[inline]
    pub fn index(self) -> u8 {
        match self {
            TangentMode::Auto => 0,
            TangentMode::Linear => 1,
            TangentMode::Break => 2,
            TangentMode::Constant => 3,
        }
    }

    #[inline]
    pub fn from_index(index: u64) -> Option<Self> {
        Self::ALL.get(usize::try_from(index).ok()?).copied()
    }

    /// Auto and break evaluate their outgoing segment as a cubic.
    #[inline]
    pub fn is_bezier(self) -> bool {
        matches!(self, TangentMode::Auto | TangentMode::Break)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TangentMode::Auto => "auto",
            TangentMode::Linear => "linear",
            TangentMode::Break => "break",
            TangentMode::Constant => "constant",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == s)
    }
}

/// Which tangent handle of a point.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleSide {
    Left,
    Right,
}

impl HandleSide {
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            HandleSide::Left => HandleSide::Right,
            HandleSide::Right => HandleSide::Left,
        }
    }

    /// Sign of the x-offset a default handle on this side points to.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            HandleSide::Left => -1.0,
            HandleSide::Right => 1.0,
        }
    }
}

/// A keyframe on one curve.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Point {
    pub id: PointId,
    /// Time.
    pub x: f64,
    /// Value.
    pub y: f64,
    pub left_tangent: Vec2,
    pub right_tangent: Vec2,
    pub mode: TangentMode,
}

impl Point {
    /// New point with symmetric horizontal handles of the given length.
    pub fn new(x: f64, y: f64, tangent_length: f64, mode: TangentMode) -> Self {
        Self {
            id: PointId::new(),
            x,
            y,
            left_tangent: Vec2::new(-tangent_length, 0.0),
            right_tangent: Vec2::new(tangent_length, 0.0),
            mode,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn set_position(&mut self, p: Vec2) {
        self.x = p.x;
        self.y = p.y;
    }

    #[inline]
    pub fn tangent(&self, side: HandleSide) -> Vec2 {
        match side {
            HandleSide::Left => self.left_tangent,
            HandleSide::Right => self.right_tangent,
        }
    }

    #[inline]
    pub fn tangent_mut(&mut self, side: HandleSide) -> &mut Vec2 {
        match side {
            HandleSide::Left => &mut self.left_tangent,
            HandleSide::Right => &mut self.right_tangent,
        }
    }

    /// Absolute position of the control point on `side`.
    #[inline]
    pub fn handle_position(&self, side: HandleSide) -> Vec2 {
        self.position() + self.tangent(side)
    }

    /// Re-establish `left == -right` for auto points.
    #[inline]
    pub fn enforce_symmetry(&mut self) {
        if self.mode == TangentMode::Auto {
            self.left_tangent = -self.right_tangent;
        }
    }
}

/// A named sequence of points plus presentation metadata.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Curve {
    pub id: CurveId,
    pub name: String,
    pub color: String,
    pub is_visible: bool,
    pub points: Vec<Point>,
}

impl Curve {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: CurveId::new(),
            name: name.into(),
            color: color.into(),
            is_visible: true,
            points: Vec::new(),
        }
    }

    pub fn with_points(mut self, points: Vec<Point>) -> Self {
        self.points = points;
        self
    }

    pub fn point(&self, id: PointId) -> Option<&Point> {
        self.points.iter().find(|p| p.id == id)
    }

    pub fn point_mut(&mut self, id: PointId) -> Option<&mut Point> {
        self.points.iter_mut().find(|p| p.id == id)
    }
}

/// Sort point references by `x` (stable, NaN-tolerant).
pub fn sort_by_time(points: &[Point]) -> Vec<&Point> {
    let mut sorted: Vec<&Point> = points.iter().collect();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x));
    sorted
}

/// The ordered collection of curves forming one editable document.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct CurveSet {
    pub curves: Vec<Curve>,
}

impl CurveSet {
    pub fn new(curves: Vec<Curve>) -> Self {
        Self { curves }
    }

    /// Starter document: one curve with two auto keys at (0,0) and (1,1).
    pub fn default_document(cfg: &EditorConfig) -> Self {
        let len = cfg.default_tangent_length;
        let curve = Curve::new(curve_name_for_index(0), cfg.color_for_index(0)).with_points(vec![
            Point::new(0.0, 0.0, len, TangentMode::Auto),
            Point::new(1.0, 1.0, len, TangentMode::Auto),
        ]);
        Self::new(vec![curve])
    }

    pub fn curve(&self, id: CurveId) -> Option<&Curve> {
        self.curves.iter().find(|c| c.id == id)
    }

    pub fn curve_mut(&mut self, id: CurveId) -> Option<&mut Curve> {
        self.curves.iter_mut().find(|c| c.id == id)
    }

    pub fn curve_index(&self, id: CurveId) -> Option<usize> {
        self.curves.iter().position(|c| c.id == id)
    }

    pub fn point(&self, r: PointRef) -> Option<&Point> {
        self.curve(r.curve)?.point(r.point)
    }

    pub fn point_mut(&mut self, r: PointRef) -> Option<&mut Point> {
        self.curve_mut(r.curve)?.point_mut(r.point)
    }

    /// `(ref, point)` for every point of every visible curve.
    pub fn visible_points(&self) -> impl Iterator<Item = (PointRef, &Point)> {
        self.curves
            .iter()
            .filter(|c| c.is_visible)
            .flat_map(|c| c.points.iter().map(move |p| (PointRef::new(c.id, p.id), p)))
    }

    pub fn point_count(&self) -> usize {
        self.curves.iter().map(|c| c.points.len()).sum()
    }
}

/// Display name given to the curve created at `index`.
pub fn curve_name_for_index(index: usize) -> String {
    format!("Curve {}", index + 1)
}
