use crate::ast::Position;

/// Represents all errors raised while building symbol scopes.
///
/// Any of these aborts scope construction for the whole compilation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScopeError {
    /// A declaration refers to a variable that is not declared before it.
    ///
    /// Covers self references (`declare a = a;`) as well as forward
    /// references to later declarations.
    #[error("Error at {position}: Declaration of '{declared}' refers to '{missing}' before it is declared.")]
    ForwardReference {
        /// The variable being declared.
        declared: String,
        /// The identifier that did not resolve.
        missing:  String,
        /// Position of the unresolved identifier.
        position: Position,
    },
    /// A module instantiation names a module no enclosing scope defines.
    #[error("Error at {position}: Unknown module '{name}'.")]
    UnknownModule {
        /// The module name.
        name:     String,
        /// Position of the instantiation.
        position: Position,
    },
    /// A call names a function no enclosing scope defines.
    #[error("Error at {position}: Unknown function '{name}'.")]
    UnknownFunction {
        /// The function name.
        name:     String,
        /// Position of the call.
        position: Position,
    },
}
