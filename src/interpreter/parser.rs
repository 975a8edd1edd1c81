/// Parser state, entry points and top-level parsing.
///
/// Defines the [`ParseSession`](core::ParseSession) threaded through every
/// recursive parse, the [`Parser`](core::Parser) cursor, and `include`/`use`
/// resolution.
pub mod core;

/// Expression parsing.
///
/// Implements the precedence cascade from the conditional operator down to
/// unary prefixes.
pub mod expr;

/// Primary expressions.
///
/// Literals, identifiers, function calls, parenthesized expressions, vectors,
/// ranges and index suffixes.
pub mod primary;

/// Statement parsing.
///
/// Definitions, declarations, module instantiations, conditionals and loops.
pub mod statement;

/// Utility functions for the parser.
///
/// Token expectations, error construction and argument/parameter lists.
pub mod utils;

pub use core::{ParseResult, ParseSession, Parser, parse_file, parse_source};
