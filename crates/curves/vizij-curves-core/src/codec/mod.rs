//! Document codecs.
//!
//! - [`compact`]: lossy tuple encoding (4 decimals, mode index) used for share tokens.
//! - [`expanded`]: readable object encoding used for file and clipboard exchange.
//! - [`token`]: base64 wrapper around the compact JSON text.
//!
//! Decoders validate the payload shape before reading any field and never
//! return a partially decoded document. Identifiers are regenerated on decode.

pub mod compact;
pub mod expanded;
pub mod token;

use serde_json::Value as JsonValue;

use crate::data::CurveSet;
use crate::error::CodecError;

/// Decimal places kept by the compact encoding.
pub const COMPACT_DECIMALS: i32 = 4;

/// The two accepted payload shapes, told apart by their first element.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PayloadKind {
    /// `[[name, color, visible, [[x, y, lx, ly, rx, ry, mode], ...]], ...]`
    Compact,
    /// `[{ "name": .., "color": .., "points": [{ "x": .., ... }] }, ...]`
    Expanded,
}

/// Classify a decoded JSON payload. An empty list is treated as expanded.
pub fn classify(value: &JsonValue) -> Result<PayloadKind, CodecError> {
    let list = as_curve_list(value)?;
    match list.first() {
        None | Some(JsonValue::Object(_)) => Ok(PayloadKind::Expanded),
        Some(JsonValue::Array(_)) => Ok(PayloadKind::Compact),
        Some(other) => Err(CodecError::curve(
            0,
            format!("expected an object or a tuple, found {}", json_kind(other)),
        )),
    }
}

/// Decode either payload shape.
pub fn decode_any(value: &JsonValue, palette: &[String]) -> Result<CurveSet, CodecError> {
    match classify(value)? {
        PayloadKind::Compact => compact::decode(value),
        PayloadKind::Expanded => expanded::decode(value, palette),
    }
}

/// Parse text and decode either payload shape.
pub fn decode_any_str(text: &str, palette: &[String]) -> Result<CurveSet, CodecError> {
    let value: JsonValue = serde_json::from_str(text)?;
    decode_any(&value, palette)
}

pub(crate) fn as_curve_list(value: &JsonValue) -> Result<&Vec<JsonValue>, CodecError> {
    value
        .as_array()
        .ok_or_else(|| CodecError::NotASequence(json_kind(value)))
}

pub(crate) fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "a list",
        JsonValue::Object(_) => "an object",
    }
}

/// Round to [`COMPACT_DECIMALS`] places. Magnitudes too large to scale have
/// no fractional digits and come back unchanged.
#[inline]
pub fn round_compact(v: f64) -> f64 {
    let scale = 10f64.powi(COMPACT_DECIMALS);
    let scaled = v * scale;
    if !scaled.is_finite() {
        return v;
    }
    scaled.round() / scale
}
