use crate::{
    ast::{Node, NodeKind},
    config::EvalConfig,
    csg::{Combinator, Csg},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            assembly::assemble,
            frame::{Bindings, CallFrame, CallStack},
        },
        scope::{ScopeId, ScopeTree, Symbol},
        value::core::Value,
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing an internal invariant violation.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Tree-walking evaluator for one scope-checked program.
///
/// The evaluator owns the call stack for exactly one run. It reads the AST
/// and the scope tree but never modifies them.
///
/// ## Usage
///
/// ```
/// use std::path::Path;
///
/// use solidscript::{
///     config::EvalConfig,
///     interpreter::{
///         evaluator::core::Evaluator,
///         parser::{ParseSession, parse_source},
///         scope::build_scopes,
///     },
/// };
///
/// let mut session = ParseSession::new();
/// let root = parse_source("sphere(r = 2);", Path::new("."), &mut session).unwrap();
/// let scopes = build_scopes(&root).unwrap();
/// let config = EvalConfig::default();
///
/// let csg = Evaluator::new(&root, &scopes, &config).run().unwrap();
/// assert_eq!(csg.unwrap().to_string(), "sphere(r = 2)");
/// ```
pub struct Evaluator<'a> {
    pub(in crate::interpreter::evaluator) root:   &'a Node,
    pub(in crate::interpreter::evaluator) scopes: &'a ScopeTree<'a>,
    pub(in crate::interpreter::evaluator) config: &'a EvalConfig,
    pub(in crate::interpreter::evaluator) stack:  CallStack,
}

impl<'a> Evaluator<'a> {
    /// Creates an evaluator whose stack holds the built-in constants.
    #[must_use]
    pub fn new(root: &'a Node, scopes: &'a ScopeTree<'a>, config: &'a EvalConfig) -> Self {
        let prelude = scopes.scope(scopes.prelude());
        let constants = prelude.variables
                               .iter()
                               .filter_map(|(name, symbol)| match symbol {
                                   Symbol::Constant(value) => {
                                       Some((name.clone(), Value::Number(*value)))
                                   },
                                   _ => None,
                               })
                               .collect::<Bindings>();

        let mut stack = CallStack::default();
        stack.push_call(CallFrame::new("prelude", constants));

        Self { root,
               scopes,
               config,
               stack }
    }

    /// Evaluates the program.
    ///
    /// A root frame is pushed whose base holds the top-level declarations,
    /// every top-level statement is executed, and the geometry produced is
    /// combined with an implicit union.
    ///
    /// # Returns
    /// The root CSG node, or `None` if the program produces no geometry.
    ///
    /// # Errors
    /// `RuntimeError` on an internal invariant violation.
    pub fn run(mut self) -> EvalResult<Option<Csg>> {
        let root = self.root;
        let scope = self.scope_of(root)?;

        self.stack.push_call(CallFrame::new("root", Bindings::new()));
        self.bind_declarations(scope)?;
        let nodes = self.exec_list(&root.children);
        self.stack.pop_call();

        Ok(assemble(nodes?, Combinator::Union))
    }

    /// Executes one statement.
    ///
    /// # Returns
    /// The geometry the statement produces, if any. Declarations and
    /// definitions never produce geometry.
    pub(in crate::interpreter::evaluator) fn exec(&mut self, node: &Node) -> EvalResult<Option<Csg>> {
        match &node.kind {
            NodeKind::ModuleCall { .. } => self.exec_module_call(node),
            NodeKind::If => self.exec_if(node),
            NodeKind::Loop(_) => self.exec_loop(node),
            NodeKind::Declare { name } => {
                if self.config.is_dynamic() {
                    let value = match node.first() {
                        Some(expr) => self.eval(expr)?,
                        None => Value::Undefined,
                    };
                    self.stack.assign(name, value);
                }
                Ok(None)
            },
            NodeKind::ModuleDef { .. } | NodeKind::FunctionDef { .. } => Ok(None),
            other => Err(RuntimeError::UnexpectedNode { kind:     other.label(),
                                                        position: node.position, }),
        }
    }

    /// Executes statements in document order, collecting the geometry they
    /// produce and skipping those that produce none.
    pub(in crate::interpreter::evaluator) fn exec_list(&mut self,
                                                        statements: &[Node])
                                                        -> EvalResult<Vec<Csg>> {
        let mut nodes = Vec::new();
        for statement in statements {
            if let Some(csg) = self.exec(statement)? {
                nodes.push(csg);
            }
        }
        Ok(nodes)
    }

    /// Binds the declarations of `scope` at the innermost level of the top
    /// call.
    ///
    /// Under static binding each declaration is evaluated in declaration
    /// order, so later ones see earlier ones. Under dynamic binding they all
    /// start Undefined and are assigned when their statement executes.
    pub(in crate::interpreter::evaluator) fn bind_declarations(&mut self,
                                                                scope: ScopeId)
                                                                -> EvalResult<()> {
        let scopes = self.scopes;
        for (name, expr) in scopes.scope(scope).declarations() {
            let value = if self.config.is_dynamic() {
                Value::Undefined
            } else {
                self.eval(expr)?
            };
            tracing::trace!("bind '{name}' = {value}");
            self.stack.bind(name, value);
        }
        Ok(())
    }

    /// Runs `body` inside a fresh block frame holding the declarations of the
    /// scope opened by `owner`, plus any `extra` bindings made first.
    pub(in crate::interpreter::evaluator) fn in_block<T>(&mut self,
                                                         owner: &Node,
                                                         extra: Option<(&str, Value)>,
                                                         body: impl FnOnce(&mut Self) -> EvalResult<T>)
                                                         -> EvalResult<T> {
        let scope = self.scope_of(owner)?;
        self.stack.push_block(owner.kind.label());
        if let Some((name, value)) = extra {
            self.stack.bind(name, value);
        }
        let result = self.bind_declarations(scope).and_then(|()| body(self));
        self.stack.pop_block();
        result
    }

    /// The scope opened by a block-opening node.
    pub(in crate::interpreter::evaluator) fn scope_of(&self, node: &Node) -> EvalResult<ScopeId> {
        self.scopes
            .opened_by(node)
            .ok_or(RuntimeError::MissingScope { kind:     node.kind.label(),
                                                position: node.position, })
    }
}
