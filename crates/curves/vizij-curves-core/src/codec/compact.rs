//! Compact tuple encoding.
//!
//! Curve: `[name, color, visible, points]` with `visible` as `1`/`0`.
//! Point: `[x, y, leftX, leftY, rightX, rightY, modeIndex]`, numbers rounded to
//! 4 decimals, mode index into `[auto, linear, break, constant]`.

use serde_json::{json, Value as JsonValue};

use crate::codec::{as_curve_list, json_kind, round_compact};
use crate::data::{Curve, CurveSet, Point, TangentMode, Vec2};
use crate::error::CodecError;
use crate::ids::{CurveId, PointId};

const POINT_ARITY: usize = 7;
const CURVE_ARITY: usize = 4;

pub fn encode(set: &CurveSet) -> JsonValue {
    JsonValue::Array(set.curves.iter().map(encode_curve).collect())
}

fn encode_curve(curve: &Curve) -> JsonValue {
    let points: Vec<JsonValue> = curve.points.iter().map(encode_point).collect();
    json!([
        curve.name,
        curve.color,
        if curve.is_visible { 1 } else { 0 },
        points
    ])
}

fn encode_point(p: &Point) -> JsonValue {
    json!([
        number(p.x),
        number(p.y),
        number(p.left_tangent.x),
        number(p.left_tangent.y),
        number(p.right_tangent.x),
        number(p.right_tangent.y),
        p.mode.index()
    ])
}

/// Rounded number, written as an integer when it has no fractional part.
fn number(v: f64) -> JsonValue {
    let v = if v.is_finite() {
        round_compact(v)
    } else {
        log::warn!("compact encode: non-finite coordinate {v} written as 0");
        0.0
    };
    if v.fract() == 0.0 && v.abs() < 1e15 {
        json!(v as i64)
    } else {
        json!(v)
    }
}

pub fn decode(value: &JsonValue) -> Result<CurveSet, CodecError> {
    let list = as_curve_list(value)?;
    let curves = list
        .iter()
        .enumerate()
        .map(|(i, c)| decode_curve(i, c))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(CurveSet::new(curves))
}

pub fn decode_str(text: &str) -> Result<CurveSet, CodecError> {
    let value: JsonValue = serde_json::from_str(text)?;
    decode(&value)
}

fn decode_curve(index: usize, value: &JsonValue) -> Result<Curve, CodecError> {
    let fields = value.as_array().ok_or_else(|| {
        CodecError::curve(index, format!("expected a tuple, found {}", json_kind(value)))
    })?;
    if fields.len() != CURVE_ARITY {
        return Err(CodecError::curve(
            index,
            format!("expected {CURVE_ARITY} fields, found {}", fields.len()),
        ));
    }
    let name = fields[0]
        .as_str()
        .ok_or_else(|| CodecError::curve(index, "name must be a string"))?;
    let color = fields[1]
        .as_str()
        .ok_or_else(|| CodecError::curve(index, "color must be a string"))?;
    let is_visible = match &fields[2] {
        JsonValue::Bool(b) => *b,
        JsonValue::Number(n) => match n.as_u64() {
            Some(0) => false,
            Some(1) => true,
            _ => return Err(CodecError::curve(index, "visible flag must be 0 or 1")),
        },
        _ => return Err(CodecError::curve(index, "visible flag must be 0, 1 or a boolean")),
    };
    let raw_points = fields[3]
        .as_array()
        .ok_or_else(|| CodecError::curve(index, "points must be a list"))?;
    let points = raw_points
        .iter()
        .enumerate()
        .map(|(j, p)| decode_point(index, j, p))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Curve {
        id: CurveId::new(),
        name: name.to_string(),
        color: color.to_string(),
        is_visible,
        points,
    })
}

fn decode_point(curve: usize, index: usize, value: &JsonValue) -> Result<Point, CodecError> {
    let fields = value
        .as_array()
        .ok_or_else(|| CodecError::point(curve, index, "expected a 7-tuple"))?;
    if fields.len() != POINT_ARITY {
        return Err(CodecError::point(
            curve,
            index,
            format!("expected {POINT_ARITY} fields, found {}", fields.len()),
        ));
    }
    let mut n = [0.0f64; POINT_ARITY - 1];
    for (slot, field) in n.iter_mut().zip(fields.iter()) {
        *slot = field
            .as_f64()
            .filter(|v| v.is_finite())
            .ok_or_else(|| CodecError::point(curve, index, "coordinates must be numbers"))?;
    }
    let mode = fields[POINT_ARITY - 1]
        .as_u64()
        .and_then(TangentMode::from_index)
        .ok_or_else(|| {
            CodecError::point(
                curve,
                index,
                format!("invalid mode index {}", fields[POINT_ARITY - 1]),
            )
        })?;

    Ok(Point {
        id: PointId::new(),
        x: n[0],
        y: n[1],
        left_tangent: Vec2::new(n[2], n[3]),
        right_tangent: Vec2::new(n[4], n[5]),
        mode,
    })
}
