//! Error types for decoding external payloads and addressing document parts.

use thiserror::Error;

use crate::ids::CurveId;

/// Malformed external data: token, file import or pasted text.
/// A decode that fails leaves the session document untouched.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("token is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("token payload is not utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("json parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a list of curves, found {0}")]
    NotASequence(&'static str),
    #[error("curve {index}: {message}")]
    Curve { index: usize, message: String },
    #[error("curve {curve}, point {point}: {message}")]
    Point {
        curve: usize,
        point: usize,
        message: String,
    },
}

impl CodecError {
    pub(crate) fn curve(index: usize, message: impl Into<String>) -> Self {
        CodecError::Curve {
            index,
            message: message.into(),
        }
    }

    pub(crate) fn point(curve: usize, point: usize, message: impl Into<String>) -> Self {
        CodecError::Point {
            curve,
            point,
            message: message.into(),
        }
    }
}

/// Operation addressed something that is not in the document.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("unknown curve {0}")]
    UnknownCurve(CurveId),
}
