/// Clamp to `[0, 1]`; NaN collapses to `0`.
pub(crate) fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Position of `v` between `a` and `b`, unclamped. A zero-width span is a step at `a`.
pub(crate) fn inverse_lerp(a: f64, b: f64, v: f64) -> f64 {
    let span = b - a;
    if span == 0.0 {
        return if v >= a { 1.0 } else { 0.0 };
    }
    (v - a) / span
}

pub(crate) fn is_finite_all(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite())
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
