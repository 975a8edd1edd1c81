use std::collections::HashMap;

use indexmap::IndexMap;

use crate::ast::{Node, NodeId};

/// Index of a scope within its [`ScopeTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(usize);

/// What kind of construct opened a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    /// Built-in modules, functions and constants.
    Prelude,
    /// The compilation unit.
    Root,
    /// A module definition body.
    Module,
    /// A function definition.
    Function,
    /// A module instantiation body, conditional branch or loop body.
    Block,
}

impl ScopeKind {
    /// Returns `true` for kinds that hold call-level rather than block-level
    /// bindings at run time.
    #[must_use]
    pub const fn is_boundary(self) -> bool {
        !matches!(self, Self::Block)
    }
}

/// What a name in a scope is bound to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Symbol<'ast> {
    /// A user-defined module; the `ModuleDef` node.
    Module(&'ast Node),
    /// A user-defined function; the `FunctionDef` node.
    Function(&'ast Node),
    /// A built-in module.
    BuiltinModule(&'static str),
    /// A built-in function.
    BuiltinFunction(&'static str),
    /// A declared variable; the defining expression.
    Declared(&'ast Node),
    /// A parameter of the enclosing definition.
    Parameter,
    /// The variable of the enclosing loop.
    LoopVariable,
    /// A built-in constant.
    Constant(f64),
}

/// The names declared by one lexical block.
#[derive(Debug)]
pub struct Scope<'ast> {
    /// Enclosing scope; `None` only for the prelude.
    pub parent:    Option<ScopeId>,
    /// What opened this scope.
    pub kind:      ScopeKind,
    /// Module names.
    pub modules:   HashMap<String, Symbol<'ast>>,
    /// Function names.
    pub functions: HashMap<String, Symbol<'ast>>,
    /// Variable names in declaration order.
    pub variables: IndexMap<String, Symbol<'ast>>,
}

impl Scope<'_> {
    fn new(parent: Option<ScopeId>, kind: ScopeKind) -> Self {
        Self { parent,
               kind,
               modules: HashMap::new(),
               functions: HashMap::new(),
               variables: IndexMap::new() }
    }

    /// Declared variables and their defining expressions, in declaration
    /// order.
    pub fn declarations(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.variables.iter().filter_map(|(name, symbol)| match symbol {
                                 Symbol::Declared(expr) => Some((name.as_str(), *expr)),
                                 _ => None,
                             })
    }
}

/// All scopes of one compilation, with their attachment to AST nodes.
///
/// Scopes live in an arena and refer to their parent by [`ScopeId`]. The
/// tree is built once by [`build_scopes`](super::build_scopes) and only read
/// afterwards.
#[derive(Debug)]
pub struct ScopeTree<'ast> {
    scopes:     Vec<Scope<'ast>>,
    opened:     HashMap<NodeId, ScopeId>,
    defined_in: HashMap<NodeId, ScopeId>,
    callees:    HashMap<NodeId, Symbol<'ast>>,
    prelude:    ScopeId,
    root:       ScopeId,
}

impl<'ast> ScopeTree<'ast> {
    /// Creates a tree holding an empty prelude and an empty root scope.
    pub(in crate::interpreter::scope) fn new() -> Self {
        let mut tree = Self { scopes:     Vec::new(),
                              opened:     HashMap::new(),
                              defined_in: HashMap::new(),
                              callees:    HashMap::new(),
                              prelude:    ScopeId(0),
                              root:       ScopeId(0), };
        tree.prelude = tree.push(None, ScopeKind::Prelude);
        tree.root = tree.push(Some(tree.prelude), ScopeKind::Root);
        tree
    }

    pub(in crate::interpreter::scope) fn push(&mut self,
                                              parent: Option<ScopeId>,
                                              kind: ScopeKind)
                                              -> ScopeId {
        let id = ScopeId(self.scopes.len());
        self.scopes.push(Scope::new(parent, kind));
        id
    }

    pub(in crate::interpreter::scope) fn scope_mut(&mut self, id: ScopeId) -> &mut Scope<'ast> {
        &mut self.scopes[id.0]
    }

    pub(in crate::interpreter::scope) fn attach(&mut self, node: &Node, scope: ScopeId) {
        self.opened.insert(node.id, scope);
    }

    pub(in crate::interpreter::scope) fn record_definition(&mut self,
                                                           node: &Node,
                                                           scope: ScopeId) {
        self.defined_in.insert(node.id, scope);
    }

    pub(in crate::interpreter::scope) fn record_callee(&mut self,
                                                       call: &Node,
                                                       symbol: Symbol<'ast>) {
        self.callees.insert(call.id, symbol);
    }

    /// The scope holding built-ins.
    #[must_use]
    pub const fn prelude(&self) -> ScopeId {
        self.prelude
    }

    /// The scope of the compilation unit.
    #[must_use]
    pub const fn root(&self) -> ScopeId {
        self.root
    }

    /// Returns the scope with the given id.
    #[must_use]
    pub fn scope(&self, id: ScopeId) -> &Scope<'ast> {
        &self.scopes[id.0]
    }

    /// The scope opened by `node`, if it opens one.
    #[must_use]
    pub fn opened_by(&self, node: &Node) -> Option<ScopeId> {
        self.opened.get(&node.id).copied()
    }

    /// The scope a module or function definition was declared in.
    #[must_use]
    pub fn defined_in(&self, definition: &Node) -> Option<ScopeId> {
        self.defined_in.get(&definition.id).copied()
    }

    /// The definition a module or function call resolved to.
    #[must_use]
    pub fn callee(&self, call: &Node) -> Option<Symbol<'ast>> {
        self.callees.get(&call.id).copied()
    }

    /// `from` and each of its ancestors, innermost first.
    pub fn ancestors(&self, from: ScopeId) -> impl Iterator<Item = (ScopeId, &Scope<'ast>)> {
        std::iter::successors(Some(from), |id| self.scope(*id).parent).map(|id| (id, self.scope(id)))
    }

    /// Resolves a variable by walking from `from` up the parent chain.
    #[must_use]
    pub fn lookup_variable(&self, from: ScopeId, name: &str) -> Option<Symbol<'ast>> {
        self.ancestors(from)
            .find_map(|(_, scope)| scope.variables.get(name).copied())
    }

    /// Resolves a module name by walking from `from` up the parent chain.
    #[must_use]
    pub fn lookup_module(&self, from: ScopeId, name: &str) -> Option<Symbol<'ast>> {
        self.ancestors(from)
            .find_map(|(_, scope)| scope.modules.get(name).copied())
    }

    /// Resolves a function name by walking from `from` up the parent chain.
    #[must_use]
    pub fn lookup_function(&self, from: ScopeId, name: &str) -> Option<Symbol<'ast>> {
        self.ancestors(from)
            .find_map(|(_, scope)| scope.functions.get(name).copied())
    }

    /// Block scopes lexically enclosing a definition, innermost first.
    ///
    /// The walk stops at the first module, function or root scope, so it only
    /// covers blocks inside the same enclosing call.
    pub fn enclosing_blocks(&self, definition: &Node) -> impl Iterator<Item = &Scope<'ast>> {
        self.defined_in(definition)
            .into_iter()
            .flat_map(|start| self.ancestors(start))
            .map(|(_, scope)| scope)
            .take_while(|scope| !scope.kind.is_boundary())
    }
}
