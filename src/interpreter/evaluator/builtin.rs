/// Built-in function table and dispatch.
pub mod function;

/// Numeric built-in functions.
///
/// Trigonometry works in degrees.
pub mod math;

/// `min` and `max` over numbers or a list of numbers.
pub mod min_max;

/// Built-in functions on lists and text.
pub mod list;

/// Built-in module table and dispatch.
pub mod module;

/// Geometry constructors behind the built-in modules.
pub mod geometry;
