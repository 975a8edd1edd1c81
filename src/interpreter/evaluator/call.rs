use crate::{
    ast::{Modifier, Node, NodeKind},
    config::CalleeClass,
    csg::{Combinator, Csg},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            assembly::assemble,
            builtin::{
                function::call_builtin_function,
                module::{builtin_module_params, run_builtin_module},
            },
            core::{EvalResult, Evaluator},
            frame::{Bindings, CallFrame},
        },
        scope::Symbol,
        value::core::Value,
    },
};

/// One formal parameter: its name and optional default expression.
type Param<'n> = (&'n str, Option<&'n Node>);

impl<'a> Evaluator<'a> {
    /// Executes a module instantiation.
    ///
    /// The child body is evaluated first, in a block frame of the current
    /// call. Then a new call frame is built for the callee:
    /// 1. For user modules, the locals of the blocks lexically enclosing the
    ///    definition are captured with their current values.
    /// 2. Parameters are bound: defaults first, evaluated in the caller, then
    ///    the arguments (see [`bind_arguments`](Self::bind_arguments)).
    ///
    /// The callee body runs in that frame and its geometry is unioned.
    ///
    /// # Errors
    /// `RuntimeError::UnknownCallee` if the call was never resolved.
    pub(in crate::interpreter::evaluator) fn exec_module_call(&mut self,
                                                               node: &Node)
                                                               -> EvalResult<Option<Csg>> {
        let NodeKind::ModuleCall { name, modifier } = &node.kind else {
            return Err(RuntimeError::UnexpectedNode { kind:     node.kind.label(),
                                                      position: node.position, });
        };

        match modifier {
            Some(Modifier::Disable | Modifier::Background) => {
                tracing::trace!("{}: '{name}' is disabled by its modifier", node.position);
                return Ok(None);
            },
            Some(modifier) => {
                tracing::trace!("{}: '{name}' carries modifier {modifier:?}", node.position);
            },
            None => {},
        }

        let children = self.in_block(node, None, |ev| ev.exec_list(node.body()))?;
        let args = node.first().map_or(&[][..], |list| list.children.as_slice());

        match self.callee(node, name)? {
            Symbol::BuiltinModule(builtin) => {
                let params = builtin_module_params(builtin)?.iter()
                                                            .map(|param| (*param, None))
                                                            .collect::<Vec<Param<'_>>>();
                let base = self.bind_arguments(Bindings::new(), &params, args, CalleeClass::Builtin)?;

                tracing::debug!("{}: instantiating built-in module '{builtin}'", node.position);
                self.stack.push_call(CallFrame::new(builtin, base));
                let result = run_builtin_module(builtin, &self.stack, children);
                self.stack.pop_call();
                result
            },
            Symbol::Module(def) => {
                let base = self.captured_locals(def);
                let params = params_of(def);
                let mut base = self.bind_arguments(base, &params, args, CalleeClass::User)?;
                base.insert("$children".to_string(), Value::from(children.len()));

                tracing::debug!("{}: instantiating module '{name}'", node.position);
                let scope = self.scope_of(def)?;
                self.stack.push_call(CallFrame::new(name.as_str(), base).with_children(children));
                let nodes = self.bind_declarations(scope)
                                .and_then(|()| self.exec_list(def.body()));
                self.stack.pop_call();
                Ok(assemble(nodes?, Combinator::Union))
            },
            _ => Err(RuntimeError::UnknownCallee { name:     name.clone(),
                                                   position: node.position, }),
        }
    }

    /// Evaluates a function call.
    ///
    /// Built-in functions receive the values of the positional arguments.
    /// User functions get a fresh call frame built like a module's and
    /// evaluate their body expression in it.
    pub(in crate::interpreter::evaluator) fn call_function(&mut self,
                                                            node: &Node)
                                                            -> EvalResult<Value> {
        let name = node.name().unwrap_or_default();
        let args = node.first().map_or(&[][..], |list| list.children.as_slice());

        match self.callee(node, name)? {
            Symbol::BuiltinFunction(builtin) => {
                let mut values = Vec::with_capacity(args.len());
                for arg in args.iter().filter(|arg| !matches!(arg.kind, NodeKind::NamedArg { .. })) {
                    values.push(self.eval(arg)?);
                }
                call_builtin_function(builtin, &values)
            },
            Symbol::Function(def) => {
                let base = self.captured_locals(def);
                let params = params_of(def);
                let base = self.bind_arguments(base, &params, args, CalleeClass::User)?;

                tracing::debug!("{}: calling function '{name}'", node.position);
                self.stack.push_call(CallFrame::new(name, base));
                let result = match def.body().first() {
                    Some(body) => self.eval(body),
                    None => Ok(Value::Undefined),
                };
                self.stack.pop_call();
                result
            },
            _ => Err(RuntimeError::UnknownCallee { name:     name.to_string(),
                                                   position: node.position, }),
        }
    }

    /// Binds parameters on top of `base`.
    ///
    /// Every parameter is first bound to its default, evaluated in the
    /// caller's context, or to Undefined. Then the arguments are applied in
    /// order: a named argument always overwrites its parameter; the n-th
    /// positional argument targets the n-th parameter, and positional
    /// arguments beyond the last parameter are ignored. An Undefined
    /// positional argument is dropped when the configured policy protects
    /// `class`; it still uses up its position.
    fn bind_arguments(&mut self,
                      mut base: Bindings,
                      params: &[Param<'_>],
                      args: &[Node],
                      class: CalleeClass)
                      -> EvalResult<Bindings> {
        for (name, default) in params {
            let value = match default {
                Some(expr) => self.eval(expr)?,
                None => Value::Undefined,
            };
            base.insert((*name).to_string(), value);
        }

        let protect = self.config.undefined_args.protects(class);
        let mut position = 0;
        for arg in args {
            if let NodeKind::NamedArg { name } = &arg.kind {
                let value = match arg.first() {
                    Some(expr) => self.eval(expr)?,
                    None => Value::Undefined,
                };
                base.insert(name.clone(), value);
                continue;
            }

            if let Some((name, _)) = params.get(position) {
                let value = self.eval(arg)?;
                if value.is_undefined() && protect {
                    tracing::debug!("{}: dropping undefined argument for '{name}'", arg.position);
                } else {
                    base.insert((*name).to_string(), value);
                }
            }
            position += 1;
        }
        Ok(base)
    }

    /// Current values of the locals declared in the blocks that lexically
    /// enclose a definition, up to the nearest module or root.
    ///
    /// When a name is declared at more than one level the innermost wins.
    fn captured_locals(&self, def: &Node) -> Bindings {
        let mut base = Bindings::new();
        for scope in self.scopes.enclosing_blocks(def) {
            for name in scope.variables.keys() {
                if !base.contains_key(name) {
                    base.insert(name.clone(), self.stack.lookup(name));
                }
            }
        }
        base
    }

    fn callee(&self, node: &Node, name: &str) -> EvalResult<Symbol<'a>> {
        self.scopes
            .callee(node)
            .ok_or_else(|| RuntimeError::UnknownCallee { name:     name.to_string(),
                                                         position: node.position, })
    }
}

/// The parameter profile of a user definition.
fn params_of(def: &Node) -> Vec<Param<'_>> {
    def.first()
       .map(|list| {
           list.children
               .iter()
               .filter_map(|param| Some((param.name()?, param.first())))
               .collect()
       })
       .unwrap_or_default()
}
