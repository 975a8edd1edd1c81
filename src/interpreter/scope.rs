/// Scope tree and symbol types.
///
/// Defines [`ScopeTree`](core::ScopeTree), an arena of per-block scopes linked
/// to their parents and attached to AST nodes by id, and the lookups over it.
pub mod core;

/// Scope construction.
///
/// Walks the AST once, opening scopes, entering names, checking that every
/// declaration only refers to names declared before it, and resolving every
/// module and function call.
pub mod builder;

pub use builder::build_scopes;
pub use core::{Scope, ScopeId, ScopeKind, ScopeTree, Symbol};
