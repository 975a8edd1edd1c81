use crate::{
    ast::{LoopKind, Node, NodeKind},
    csg::{Combinator, Csg},
    error::RuntimeError,
    interpreter::evaluator::{
        assembly::assemble,
        core::{EvalResult, Evaluator},
        expr::Iteration,
    },
};

impl Evaluator<'_> {
    /// Executes an `if` chain.
    ///
    /// Guards are tested in order and the first true branch runs in its own
    /// block frame; the geometry it produces is unioned. When no guard holds,
    /// nothing is produced.
    pub(in crate::interpreter::evaluator) fn exec_if(&mut self, node: &Node) -> EvalResult<Option<Csg>> {
        for condition in &node.children {
            let Some(guard) = condition.first() else {
                continue;
            };
            let taken = match guard.kind {
                NodeKind::Always => true,
                _ => self.eval(guard)?.is_truthy(),
            };
            if taken {
                let nodes = self.in_block(condition, None, |ev| ev.exec_list(condition.body()))?;
                return Ok(assemble(nodes, Combinator::Union));
            }
        }
        Ok(None)
    }

    /// Executes a `for` or `intersection_for` loop.
    ///
    /// Each iteration runs the body in a fresh block frame holding the loop
    /// variable. `for` unions the geometry of every iteration.
    /// `intersection_for` unions within each iteration and intersects the
    /// iterations.
    ///
    /// # Example
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
    /// let source = "for (i = [1:2]) sphere(r = i);";
    /// let mut session = ParseSession::new();
    /// let root = parse_source(source, Path::new("."), &mut session).unwrap();
    /// let scopes = build_scopes(&root).unwrap();
    /// let config = EvalConfig::default();
    ///
    /// let csg = Evaluator::new(&root, &scopes, &config).run().unwrap().unwrap();
    /// assert_eq!(csg.to_string(), "union\n    sphere(r = 1)\n    sphere(r = 2)");
    /// ```
    pub(in crate::interpreter::evaluator) fn exec_loop(&mut self, node: &Node) -> EvalResult<Option<Csg>> {
        let NodeKind::Loop(kind) = node.kind else {
            return Err(RuntimeError::UnexpectedNode { kind:     node.kind.label(),
                                                      position: node.position, });
        };
        let items = self.loop_items(node, kind)?;
        let op = match kind {
            LoopKind::For => Combinator::Union,
            LoopKind::IntersectionFor => Combinator::Intersection,
        };
        Ok(assemble(items, op))
    }

    /// Runs every iteration of a loop and collects what they produce.
    ///
    /// For `for` these are all nodes of all iterations, outer-major. For
    /// `intersection_for` there is one node per iteration that produced
    /// geometry. A loop whose sole body statement is a loop of the same kind
    /// splices that loop's items into its own.
    fn loop_items(&mut self, node: &Node, kind: LoopKind) -> EvalResult<Vec<Csg>> {
        let Some(binding) = node.first() else {
            return Ok(Vec::new());
        };
        let name = binding.name().unwrap_or_default();
        let values = match binding.first() {
            Some(iterable) => self.iteration_values(iterable)?,
            None => Iteration::Values(Vec::new().into_iter()),
        };
        let inner = match node.body() {
            [inner] if inner.kind == NodeKind::Loop(kind) => Some(inner),
            _ => None,
        };

        let mut items = Vec::new();
        for value in values {
            let produced = self.in_block(node, Some((name, value)), |ev| match inner {
                                  Some(inner) => ev.loop_items(inner, kind),
                                  None => {
                                      let nodes = ev.exec_list(node.body())?;
                                      Ok(match kind {
                                          LoopKind::For => nodes,
                                          LoopKind::IntersectionFor => {
                                              assemble(nodes, Combinator::Union).into_iter()
                                                                                .collect()
                                          },
                                      })
                                  },
                              })?;
            items.extend(produced);
        }
        Ok(items)
    }
}
