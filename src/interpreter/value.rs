/// Runtime values.
///
/// Defines the `Value` enum produced by expression evaluation, its truthiness,
/// conversions used by the built-ins, and its textual form.
pub mod core;
