use crate::ast::Position;

/// Represents all errors that can occur during evaluation.
///
/// Evaluation is total for well-formed input: Undefined values flow through
/// arithmetic and argument binding instead of failing. The variants below are
/// internal invariant violations that parsing and scope construction are
/// expected to rule out.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    /// A node kind appeared where the evaluator cannot handle it.
    #[error("Internal error at {position}: Unexpected {kind} node.")]
    UnexpectedNode {
        /// Label of the node kind.
        kind:     &'static str,
        /// Position of the node.
        position: Position,
    },
    /// A call reached the evaluator without a resolvable definition.
    #[error("Internal error at {position}: No definition for '{name}'.")]
    UnknownCallee {
        /// Name of the module or function.
        name:     String,
        /// Position of the call.
        position: Position,
    },
    /// A built-in name without an implementation was dispatched.
    #[error("Internal error: Unsupported built-in '{name}'.")]
    UnsupportedBuiltin {
        /// The built-in name.
        name: String,
    },
    /// A block-opening node has no scope attached.
    #[error("Internal error at {position}: No scope attached to {kind} node.")]
    MissingScope {
        /// Label of the node kind.
        kind:     &'static str,
        /// Position of the node.
        position: Position,
    },
}
