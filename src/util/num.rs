/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_U64_INT: u64 = 9_007_199_254_740_991;

/// Converts a `usize` to `f64` if and only if it is exactly representable.
///
/// ## Returns
/// - `Some(f64)`: The converted value if it is safe.
/// - `None`: If the value exceeds `MAX_SAFE_U64_INT`.
///
/// ## Example
/// ```
/// use solidscript::util::num::{MAX_SAFE_U64_INT, usize_to_f64_checked};
///
/// assert_eq!(usize_to_f64_checked(3), Some(3.0));
/// assert_eq!(usize_to_f64_checked((MAX_SAFE_U64_INT + 1) as usize), None);
/// ```
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub const fn usize_to_f64_checked(value: usize) -> Option<f64> {
    if value as u64 > MAX_SAFE_U64_INT {
        return None;
    }
    Some(value as f64)
}

/// Converts an `f64` to a list index.
///
/// The value must be finite and non-negative. Fractional indices are
/// truncated toward zero, matching how the language indexes vectors.
///
/// ## Returns
/// - `Some(usize)`: The index.
/// - `None`: For negative, non-finite or oversized values.
///
/// ## Example
/// ```
/// use solidscript::util::num::f64_to_index;
///
/// assert_eq!(f64_to_index(2.0), Some(2));
/// assert_eq!(f64_to_index(1.7), Some(1));
/// assert_eq!(f64_to_index(-1.0), None);
/// assert_eq!(f64_to_index(f64::NAN), None);
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
#[allow(clippy::cast_sign_loss)]
#[must_use]
pub fn f64_to_index(value: f64) -> Option<usize> {
    if !value.is_finite() || value < 0.0 || value > MAX_SAFE_U64_INT as f64 {
        return None;
    }
    usize::try_from(value.trunc() as u64).ok()
}
