/// Core evaluation logic.
///
/// Contains the evaluator, statement execution and the binding of block
/// declarations.
pub mod core;

/// Call frames and block frames.
///
/// Implements the two-level frame model and the hybrid name lookup.
pub mod frame;

/// Expression evaluation, ranges and loop iteration values.
pub mod expr;

/// Binary operator evaluation logic.
///
/// Handles arithmetic, element-wise list arithmetic, comparisons and
/// indexing.
pub mod binary;

/// Unary operator evaluation logic.
pub mod unary;

/// Module instantiation, function calls and argument binding.
pub mod call;

/// `if` chains and loops.
pub mod control;

/// Combining sibling geometry into CSG nodes.
pub mod assembly;

/// Built-in modules and functions.
pub mod builtin;
