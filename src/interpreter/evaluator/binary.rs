/// Operator dispatch by operand types.
pub mod core;

/// Element-wise list arithmetic and the dot product.
pub mod array;

/// Relational and equality comparisons.
pub mod comparison;
