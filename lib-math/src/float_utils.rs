
/// Approximate equality check with a given tolerance.
/// 
#[inline]
pub fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    libm::fabs(a - b) <= tol
}

/// Limits the magnitude of `value` to `limit` while keeping its sign. `limit` is expected to be
/// positive.
/// 
#[inline]
pub fn clamp_abs(value: f64, limit: f64) -> f64 {
    libm::fmin(libm::fmax(value, -limit), limit)
}

/// Returns true for values that are neither NaN nor infinite and strictly larger than zero.
/// 
#[inline]
pub fn is_positive_finite(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
