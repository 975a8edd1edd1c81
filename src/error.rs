/// Parsing errors.
///
/// Defines the fatal error raised when a source file cannot be tokenized or
/// parsed, and the non-fatal [`Diagnostic`] that is logged and collected while
/// parsing continues.
pub mod parse_error;
/// Scope construction errors.
///
/// Raised while building the symbol scopes: forward or self references in
/// variable declarations, and calls to modules or functions that no scope
/// defines.
pub mod scope_error;
/// Runtime errors.
///
/// Raised during evaluation. These are invariant violations; the earlier
/// phases guarantee they cannot occur for input that parsed and scope-checked.
pub mod runtime_error;

pub use parse_error::{Diagnostic, ParseError};
pub use runtime_error::RuntimeError;
pub use scope_error::ScopeError;

/// Any fatal error raised while turning source text into a CSG tree.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The source could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The parsed program violates scoping rules.
    #[error(transparent)]
    Scope(#[from] ScopeError),
    /// Evaluation hit an internal invariant violation.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}
