/// Numeric conversion helpers.
///
/// This module provides checked conversions between `usize` and `f64` for
/// list lengths, child counts and indices. Conversions return `None` instead
/// of silently losing precision; callers map that to the Undefined value.
pub mod num;
