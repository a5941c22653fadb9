//! Interpolation helpers:
//! - lerp (linear blend)
//! - evaluate_cubic (Bernstein form cubic Bezier)
//! - invert_cubic_time (time -> parameter via bisection)

/// Fixed bisection budget for [`invert_cubic_time`]. Resolution is 2^-15 of the
/// parameter interval; there is no early exit.
pub const INVERT_ITERATIONS: usize = 15;

/// Linear interpolation of scalars.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Cubic Bezier basis blend of four scalar control values at `t` in [0,1].
#[inline]
pub fn evaluate_cubic(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
    let u = 1.0 - t;
    u * u * u * p0 + 3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t * p3
}

/// Find `t` such that the cubic with x-controls `p0..p3` evaluates to `x`.
///
/// Assumes the cubic is non-decreasing on [0,1] (the caller's keys are sorted
/// and tangents keep the segment monotonic). When that does not hold the
/// result is one of the crossings, not necessarily the first.
#[inline]
pub fn invert_cubic_time(p0: f64, p1: f64, p2: f64, p3: f64, x: f64) -> f64 {
    let mut lo = 0.0f64;
    let mut hi = 1.0f64;
    for _ in 0..INVERT_ITERATIONS {
        let mid = 0.5 * (lo + hi);
        if evaluate_cubic(p0, p1, p2, p3, mid) < x {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    0.5 * (lo + hi)
}
