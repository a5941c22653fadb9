//! Expanded object encoding for file import/export and the clipboard.
//!
//! Export writes `{ name, color, points }` per curve with points sorted by time
//! at full precision. Import requires only the point coordinates; missing
//! names, colors, visibility, tangents and modes fall back to defaults.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::codec::{as_curve_list, json_kind};
use crate::config::palette_color;
use crate::data::{curve_name_for_index, sort_by_time, Curve, CurveSet, Point, TangentMode, Vec2};
use crate::error::CodecError;
use crate::ids::{CurveId, PointId};

const IMPORT_TANGENT_LENGTH: f64 = 0.25;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExpandedPoint {
    x: f64,
    y: f64,
    #[serde(default = "default_left")]
    left_tangent: Vec2,
    #[serde(default = "default_right")]
    right_tangent: Vec2,
    #[serde(default)]
    mode: TangentMode,
}

fn default_left() -> Vec2 {
    Vec2::new(-IMPORT_TANGENT_LENGTH, 0.0)
}

fn default_right() -> Vec2 {
    Vec2::new(IMPORT_TANGENT_LENGTH, 0.0)
}

#[derive(Debug, Serialize)]
struct ExpandedCurveOut<'a> {
    name: &'a str,
    color: &'a str,
    points: Vec<ExpandedPoint>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExpandedCurveIn {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    is_visible: Option<bool>,
    #[serde(default)]
    points: Vec<ExpandedPoint>,
}

impl From<&Point> for ExpandedPoint {
    fn from(p: &Point) -> Self {
        Self {
            x: p.x,
            y: p.y,
            left_tangent: p.left_tangent,
            right_tangent: p.right_tangent,
            mode: p.mode,
        }
    }
}

pub fn encode(set: &CurveSet) -> JsonValue {
    let curves: Vec<ExpandedCurveOut<'_>> = set
        .curves
        .iter()
        .map(|c| ExpandedCurveOut {
            name: &c.name,
            color: &c.color,
            points: sort_by_time(&c.points)
                .into_iter()
                .map(ExpandedPoint::from)
                .collect(),
        })
        .collect();
    // Only strings and f64 fields; serialization to a Value cannot fail for finite data.
    serde_json::to_value(curves).unwrap_or(JsonValue::Array(Vec::new()))
}

/// Pretty-printed export text.
pub fn encode_string(set: &CurveSet) -> Result<String, CodecError> {
    Ok(serde_json::to_string_pretty(&encode(set))?)
}

pub fn decode(value: &JsonValue, palette: &[String]) -> Result<CurveSet, CodecError> {
    let list = as_curve_list(value)?;
    let mut curves = Vec::with_capacity(list.len());
    for (index, raw) in list.iter().enumerate() {
        if !raw.is_object() {
            return Err(CodecError::curve(
                index,
                format!("expected an object, found {}", json_kind(raw)),
            ));
        }
        let parsed: ExpandedCurveIn = serde_json::from_value(raw.clone())
            .map_err(|e| CodecError::curve(index, e.to_string()))?;
        curves.push(into_curve(index, parsed, palette)?);
    }
    Ok(CurveSet::new(curves))
}

pub fn decode_str(text: &str, palette: &[String]) -> Result<CurveSet, CodecError> {
    let value: JsonValue = serde_json::from_str(text)?;
    decode(&value, palette)
}

fn into_curve(
    index: usize,
    raw: ExpandedCurveIn,
    palette: &[String],
) -> Result<Curve, CodecError> {
    let mut points = Vec::with_capacity(raw.points.len());
    for (j, p) in raw.points.into_iter().enumerate() {
        let finite = p.x.is_finite()
            && p.y.is_finite()
            && p.left_tangent.is_finite()
            && p.right_tangent.is_finite();
        if !finite {
            return Err(CodecError::point(index, j, "coordinates must be finite"));
        }
        points.push(Point {
            id: PointId::new(),
            x: p.x,
            y: p.y,
            left_tangent: p.left_tangent,
            right_tangent: p.right_tangent,
            mode: p.mode,
        });
    }
    Ok(Curve {
        id: CurveId::new(),
        name: raw.name.unwrap_or_else(|| curve_name_for_index(index)),
        color: raw.color.unwrap_or_else(|| palette_color(palette, index)),
        is_visible: raw.is_visible.unwrap_or(true),
        points,
    })
}
