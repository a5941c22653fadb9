//! Share token: base64 of the compact JSON text.

use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use base64::Engine as _;

use crate::codec::compact;
use crate::data::CurveSet;
use crate::error::CodecError;

pub fn encode(set: &CurveSet) -> String {
    STANDARD.encode(compact::encode(set).to_string())
}

/// Decode a token. Accepts standard base64 with or without padding and
/// unpadded URL-safe base64.
pub fn decode(token: &str) -> Result<CurveSet, CodecError> {
    let token = token.trim();
    let bytes = match STANDARD.decode(token) {
        Ok(bytes) => bytes,
        Err(err) => STANDARD_NO_PAD
            .decode(token)
            .or_else(|_| URL_SAFE_NO_PAD.decode(token))
            .map_err(|_| err)?,
    };
    let text = String::from_utf8(bytes)?;
    compact::decode_str(&text)
}
