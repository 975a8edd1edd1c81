use std::{collections::HashSet, f64::consts::PI};

use crate::{
    ast::{Node, NodeKind},
    error::ScopeError,
    interpreter::{
        evaluator::builtin::{function::BUILTIN_FUNCTIONS, module::BUILTIN_MODULES},
        scope::core::{ScopeId, ScopeKind, ScopeTree, Symbol},
    },
};

/// Constants available to every program.
const PRELUDE_CONSTANTS: &[(&str, f64)] = &[("PI", PI),
                                            ("$fn", 0.0),
                                            ("$fa", 12.0),
                                            ("$fs", 2.0),
                                            ("$t", 0.0),
                                            ("$children", 0.0)];

type BuildResult<T> = Result<T, ScopeError>;

/// Builds the scope tree for a parsed program.
///
/// Every declaration is checked against the names visible at the point it is
/// declared: an identifier in its value must already resolve, so neither
/// self references nor forward references are accepted. Names starting with
/// `$` resolve dynamically at run time; they only need to be bound somewhere
/// in the program (declared, a parameter, a loop variable or a named
/// argument) or be a built-in constant. Module and function names are registered for a whole
/// block before its statements are walked, so they may be used before they
/// are defined and may refer to each other.
///
/// Once the walk is complete every module instantiation and function call is
/// resolved to its definition.
///
/// # Errors
/// - `ScopeError::ForwardReference` for a declaration that uses a variable
///   not yet declared.
/// - `ScopeError::UnknownModule` / `ScopeError::UnknownFunction` for calls
///   nothing defines.
///
/// # Example
/// ```
/// use std::path::Path;
///
/// use solidscript::interpreter::{
///     parser::{ParseSession, parse_source},
///     scope::build_scopes,
/// };
///
/// let mut session = ParseSession::new();
/// let ok = parse_source("declare a = 1; declare b = a;", Path::new("."), &mut session).unwrap();
/// assert!(build_scopes(&ok).is_ok());
///
/// let bad = parse_source("declare a = a;", Path::new("."), &mut session).unwrap();
/// assert!(build_scopes(&bad).is_err());
/// ```
pub fn build_scopes(root: &Node) -> BuildResult<ScopeTree<'_>> {
    let mut sigils = HashSet::new();
    collect_sigils(root, &mut sigils);
    let mut builder = ScopeBuilder { tree:   ScopeTree::new(),
                                     calls:  Vec::new(),
                                     sigils, };
    builder.fill_prelude();

    let root_scope = builder.tree.root();
    builder.tree.attach(root, root_scope);
    builder.walk_block(root_scope, &root.children)?;
    builder.resolve_calls()?;

    Ok(builder.tree)
}

struct ScopeBuilder<'ast> {
    tree:   ScopeTree<'ast>,
    calls:  Vec<(&'ast Node, ScopeId)>,
    sigils: HashSet<&'ast str>,
}

/// Every `$` name the program binds anywhere.
fn collect_sigils<'ast>(node: &'ast Node, sigils: &mut HashSet<&'ast str>) {
    if let NodeKind::Declare { name }
    | NodeKind::Param { name }
    | NodeKind::LoopBinding { name }
    | NodeKind::NamedArg { name } = &node.kind
       && name.starts_with('$')
    {
        sigils.insert(name.as_str());
    }
    for child in &node.children {
        collect_sigils(child, sigils);
    }
}

impl<'ast> ScopeBuilder<'ast> {
    fn fill_prelude(&mut self) {
        let prelude = self.tree.prelude();
        let scope = self.tree.scope_mut(prelude);
        for (name, _) in BUILTIN_MODULES {
            scope.modules
                 .insert((*name).to_string(), Symbol::BuiltinModule(*name));
        }
        for name in BUILTIN_FUNCTIONS {
            scope.functions
                 .insert((*name).to_string(), Symbol::BuiltinFunction(*name));
        }
        for (name, value) in PRELUDE_CONSTANTS {
            scope.variables
                 .insert((*name).to_string(), Symbol::Constant(*value));
        }
    }

    /// Walks the statements of one block.
    ///
    /// Definitions are registered first. Their bodies are walked after the
    /// rest of the block, so they see every variable the block declares.
    fn walk_block(&mut self, scope: ScopeId, statements: &'ast [Node]) -> BuildResult<()> {
        for statement in statements {
            self.register_definition(scope, statement);
        }
        for statement in statements.iter().filter(|s| !s.is_definition()) {
            self.walk_statement(scope, statement)?;
        }
        for definition in statements.iter().filter(|s| s.is_definition()) {
            self.walk_definition(scope, definition)?;
        }
        Ok(())
    }

    fn register_definition(&mut self, scope: ScopeId, statement: &'ast Node) {
        let (table, symbol) = match &statement.kind {
            NodeKind::ModuleDef { .. } => ("module", Symbol::Module(statement)),
            NodeKind::FunctionDef { .. } => ("function", Symbol::Function(statement)),
            _ => return,
        };
        let Some(name) = statement.name() else {
            return;
        };

        tracing::debug!("registering {table} '{name}' at {}", statement.position);
        self.tree.record_definition(statement, scope);
        let entry = self.tree.scope_mut(scope);
        let previous = if table == "module" {
            entry.modules.insert(name.to_string(), symbol)
        } else {
            entry.functions.insert(name.to_string(), symbol)
        };
        if previous.is_some() {
            tracing::warn!("{}: {table} '{name}' redefined; the later definition is used.",
                           statement.position);
        }
    }

    fn walk_statement(&mut self, scope: ScopeId, statement: &'ast Node) -> BuildResult<()> {
        match &statement.kind {
            NodeKind::Declare { name } => {
                let Some(value) = statement.first() else {
                    return Ok(());
                };
                self.walk_expr(scope, value);
                self.check_dependencies(scope, name, value)?;
                self.declare(scope, name, Symbol::Declared(value), statement);
            },
            NodeKind::ModuleCall { .. } => {
                self.calls.push((statement, scope));
                if let Some(args) = statement.first() {
                    self.walk_expr(scope, args);
                }
                let body = self.open(scope, ScopeKind::Block, statement);
                self.walk_block(body, statement.body())?;
            },
            NodeKind::If => {
                for condition in &statement.children {
                    if let Some(guard) = condition.first() {
                        self.walk_expr(scope, guard);
                    }
                    let branch = self.open(scope, ScopeKind::Block, condition);
                    self.walk_block(branch, condition.body())?;
                }
            },
            NodeKind::Loop(_) => {
                let body = self.open(scope, ScopeKind::Block, statement);
                if let Some(binding) = statement.first() {
                    if let Some(iterable) = binding.first() {
                        self.walk_expr(scope, iterable);
                    }
                    if let Some(name) = binding.name() {
                        self.declare(body, name, Symbol::LoopVariable, binding);
                    }
                }
                self.walk_block(body, statement.body())?;
            },
            _ => {},
        }
        Ok(())
    }

    fn walk_definition(&mut self, scope: ScopeId, definition: &'ast Node) -> BuildResult<()> {
        let kind = match definition.kind {
            NodeKind::ModuleDef { .. } => ScopeKind::Module,
            _ => ScopeKind::Function,
        };
        let inner = self.open(scope, kind, definition);

        if let Some(params) = definition.first() {
            for param in &params.children {
                if let Some(default) = param.first() {
                    self.walk_expr(scope, default);
                }
                if let Some(name) = param.name() {
                    self.declare(inner, name, Symbol::Parameter, param);
                }
            }
        }

        match kind {
            ScopeKind::Module => self.walk_block(inner, definition.body()),
            _ => {
                for expr in definition.body() {
                    self.walk_expr(inner, expr);
                }
                Ok(())
            },
        }
    }

    /// Records every call inside an expression for later resolution.
    fn walk_expr(&mut self, scope: ScopeId, expr: &'ast Node) {
        if matches!(expr.kind, NodeKind::FunctionCall { .. }) {
            self.calls.push((expr, scope));
        }
        for child in &expr.children {
            self.walk_expr(scope, child);
        }
    }

    /// Checks that every identifier in `expr` resolves from `scope`.
    ///
    /// Named-argument names are not identifiers and are not checked; their
    /// values are.
    fn check_dependencies(&self, scope: ScopeId, declared: &str, expr: &Node) -> BuildResult<()> {
        if let NodeKind::Ident { name } = &expr.kind
           && !(name.starts_with('$') && self.sigils.contains(name.as_str()))
           && self.tree.lookup_variable(scope, name).is_none()
        {
            return Err(ScopeError::ForwardReference { declared: declared.to_string(),
                                                      missing:  name.clone(),
                                                      position: expr.position, });
        }
        expr.children
            .iter()
            .try_for_each(|child| self.check_dependencies(scope, declared, child))
    }

    fn declare(&mut self, scope: ScopeId, name: &str, symbol: Symbol<'ast>, at: &Node) {
        let variables = &mut self.tree.scope_mut(scope).variables;
        if variables.shift_remove(name).is_some() {
            tracing::warn!("{}: '{name}' is redeclared; the later value is used.", at.position);
        }
        tracing::debug!("declaring '{name}' at {}", at.position);
        variables.insert(name.to_string(), symbol);
    }

    fn open(&mut self, parent: ScopeId, kind: ScopeKind, node: &Node) -> ScopeId {
        let id = self.tree.push(Some(parent), kind);
        self.tree.attach(node, id);
        id
    }

    fn resolve_calls(&mut self) -> BuildResult<()> {
        for (call, scope) in std::mem::take(&mut self.calls) {
            let name = call.name().unwrap_or_default();
            let symbol = match call.kind {
                NodeKind::ModuleCall { .. } => {
                    self.tree.lookup_module(scope, name).ok_or_else(|| {
                        ScopeError::UnknownModule { name:     name.to_string(),
                                                    position: call.position, }
                    })?
                },
                _ => self.tree.lookup_function(scope, name).ok_or_else(|| {
                    ScopeError::UnknownFunction { name:     name.to_string(),
                                                  position: call.position, }
                })?,
            };
            tracing::debug!("resolved call to '{name}' at {}", call.position);
            self.tree.record_callee(call, symbol);
        }
        Ok(())
    }
}
