//! Interpolation helpers for curve segments.
//!
//! Segments between keys are cubic Beziers in (time, value) space. Time is
//! inverted with a fixed-budget bisection so every query costs the same.

pub mod functions;

pub use functions::{evaluate_cubic, invert_cubic_time, lerp, INVERT_ITERATIONS};
