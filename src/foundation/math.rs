use std::f64::consts::TAU;

/// Wrap `value` into the half-open range `[min, max)`.
///
/// A zero-width range collapses to `min`.
pub fn normalize_cyclic(value: f64, min: f64, max: f64) -> f64 {
    let span = max - min;
    if span == 0.0 {
        return min;
    }
    let wrapped = (value - min).rem_euclid(span) + min;
    // rem_euclid can round up to exactly `span` for tiny negative inputs.
    if wrapped >= max { min } else { wrapped }
}

/// Radians wrapped into `[0, 2π)`.
pub fn normalize_radians(angle: f64) -> f64 {
    normalize_cyclic(angle, 0.0, TAU)
}

/// Degrees wrapped into `[0, 360)`.
pub fn normalize_degrees(angle: f64) -> f64 {
    normalize_cyclic(angle, 0.0, 360.0)
}

/// Shortest signed difference `to - from` in degrees, in `(-180, 180]`.
pub fn degrees_delta(from: f64, to: f64) -> f64 {
    let d = normalize_degrees(to - from);
    if d > 180.0 { d - 360.0 } else { d }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
