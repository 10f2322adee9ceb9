//! Arity and finiteness checks for geometry and keyframe values that arrive
//! as dynamic sequences (records, CLI arguments) rather than typed tuples.

use crate::foundation::error::{PanError, PanResult};

/// Require exactly `N` finite numbers.
pub fn fixed_finite<const N: usize>(values: &[f64], what: &str) -> PanResult<[f64; N]> {
    let arr: [f64; N] = values.try_into().map_err(|_| {
        PanError::validation(format!(
            "{what} must have exactly {N} values, got {}",
            values.len()
        ))
    })?;
    for (idx, v) in arr.iter().enumerate() {
        finite(*v, &format!("{what}[{idx}]"))?;
    }
    Ok(arr)
}

/// Require exactly `N` entries, each either unset or finite.
pub fn fixed_optional<const N: usize>(
    values: &[Option<f64>],
    what: &str,
) -> PanResult<[Option<f64>; N]> {
    let arr: [Option<f64>; N] = values.try_into().map_err(|_| {
        PanError::validation(format!(
            "{what} must have exactly {N} entries, got {}",
            values.len()
        ))
    })?;
    for (idx, v) in arr.iter().enumerate() {
        if let Some(v) = v {
            finite(*v, &format!("{what}[{idx}]"))?;
        }
    }
    Ok(arr)
}

pub fn finite(value: f64, what: &str) -> PanResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PanError::validation(format!(
            "{what} must be a finite number, got {value}"
        )))
    }
}
