use crate::{
    ast::{Node, NodeKind, Operator},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            binary::core::eval_binary,
            core::{EvalResult, Evaluator},
            unary::eval_unary,
        },
        value::core::Value,
    },
    util::num::f64_to_index,
};

/// Relative slack used when deciding whether a range reaches its end value.
const RANGE_EPSILON: f64 = 1e-9;

/// Most values a single range may enumerate.
pub const MAX_RANGE_STEPS: u32 = 1_000_000;

impl Evaluator<'_> {
    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. Evaluation is
    /// total: anything that does not make sense yields Undefined.
    /// `&&`, `||` and `?:` only evaluate the operands they need.
    ///
    /// # Errors
    /// `RuntimeError::UnexpectedNode` for a node that is not an expression.
    pub fn eval(&mut self, node: &Node) -> EvalResult<Value> {
        match &node.kind {
            NodeKind::Number(n) => Ok(Value::Number(*n)),
            NodeKind::Text(s) => Ok(Value::from(s.as_str())),
            NodeKind::Undef => Ok(Value::Undefined),
            NodeKind::Ident { name } => Ok(self.stack.lookup(name)),
            NodeKind::Vector => {
                let items = node.children
                                .iter()
                                .map(|child| self.eval(child))
                                .collect::<EvalResult<Vec<_>>>()?;
                Ok(Value::from(items))
            },
            NodeKind::Range => {
                let items = self.eval_range(node)?.map(Value::Number).collect::<Vec<_>>();
                Ok(Value::from(items))
            },
            NodeKind::Ternary => {
                let [condition, then_branch, else_branch] = node.children.as_slice() else {
                    return Err(unexpected(node));
                };
                if self.eval(condition)?.is_truthy() {
                    self.eval(then_branch)
                } else {
                    self.eval(else_branch)
                }
            },
            NodeKind::Op(op) => self.eval_operator(*op, node),
            NodeKind::FunctionCall { .. } => self.call_function(node),
            _ => Err(unexpected(node)),
        }
    }

    fn eval_operator(&mut self, op: Operator, node: &Node) -> EvalResult<Value> {
        match node.children.as_slice() {
            [operand] if op.is_unary() => {
                let value = self.eval(operand)?;
                Ok(eval_unary(op, &value))
            },
            [lhs, rhs] if op == Operator::And => {
                let truthy = self.eval(lhs)?.is_truthy() && self.eval(rhs)?.is_truthy();
                Ok(Value::from(truthy))
            },
            [lhs, rhs] if op == Operator::Or => {
                let truthy = self.eval(lhs)?.is_truthy() || self.eval(rhs)?.is_truthy();
                Ok(Value::from(truthy))
            },
            [lhs, rhs] => {
                let lhs = self.eval(lhs)?;
                let rhs = self.eval(rhs)?;
                Ok(eval_binary(op, &lhs, &rhs))
            },
            _ => Err(unexpected(node)),
        }
    }

    /// Evaluates a range node to the numbers it enumerates.
    ///
    /// The end value is included when the steps land on it. A positive
    /// increment counts up while the value does not exceed the end, a
    /// negative one counts down while it is not below it. A zero increment,
    /// a non-numeric bound, or more than [`MAX_RANGE_STEPS`] values
    /// enumerates nothing.
    ///
    /// The numbers are produced on demand as `start + k * increment`, so
    /// long ranges neither accumulate rounding error nor allocate.
    pub(in crate::interpreter::evaluator) fn eval_range(&mut self,
                                                        node: &Node)
                                                        -> EvalResult<RangeSteps> {
        let [start, end, step] = node.children.as_slice() else {
            return Err(unexpected(node));
        };
        let bounds = (self.eval(start)?.as_number(),
                      self.eval(end)?.as_number(),
                      self.eval(step)?.as_number());
        let (Some(start), Some(end), Some(step)) = bounds else {
            tracing::warn!("{}: range bounds must be numbers.", node.position);
            return Ok(RangeSteps::EMPTY);
        };
        if step == 0.0 || !step.is_finite() {
            tracing::warn!("{}: range increment must be a non-zero number.", node.position);
            return Ok(RangeSteps::EMPTY);
        }

        let span = (end - start) / step;
        if !span.is_finite() || span < -RANGE_EPSILON {
            return Ok(RangeSteps::EMPTY);
        }
        let last = (span + RANGE_EPSILON * span.abs().max(1.0)).floor();

        let Some(count) = f64_to_index(last).and_then(|last| u32::try_from(last + 1).ok())
                                            .filter(|count| *count <= MAX_RANGE_STEPS)
        else {
            tracing::warn!("{}: range [{start}:{step}:{end}] has more than {MAX_RANGE_STEPS} values; \
                            nothing is enumerated.",
                           node.position);
            return Ok(RangeSteps::EMPTY);
        };
        Ok(RangeSteps { start,
                        step,
                        index: 0,
                        count })
    }

    /// Enumerates the values a loop variable takes for an iterable node.
    ///
    /// Ranges enumerate their numbers lazily; lists their elements; strings
    /// their characters; a single number is iterated once; Undefined not at
    /// all.
    pub(in crate::interpreter::evaluator) fn iteration_values(&mut self,
                                                              iterable: &Node)
                                                              -> EvalResult<Iteration> {
        if iterable.kind == NodeKind::Range {
            return self.eval_range(iterable).map(Iteration::Range);
        }
        let values = match self.eval(iterable)? {
            Value::List(items) => items.to_vec(),
            Value::Text(s) => s.chars().map(|c| Value::from(c.to_string())).collect(),
            Value::Undefined => Vec::new(),
            number @ Value::Number(_) => vec![number],
        };
        Ok(Iteration::Values(values.into_iter()))
    }
}

/// The numbers of a range, computed one at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeSteps {
    start: f64,
    step:  f64,
    index: u32,
    count: u32,
}

impl RangeSteps {
    const EMPTY: Self = Self { start: 0.0,
                               step:  1.0,
                               index: 0,
                               count: 0, };
}

impl Iterator for RangeSteps {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.index >= self.count {
            return None;
        }
        let value = self.step.mul_add(f64::from(self.index), self.start);
        self.index += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = usize::try_from(self.count - self.index).unwrap_or(usize::MAX);
        (left, Some(left))
    }
}

/// The values a loop variable runs through.
pub enum Iteration {
    /// Numbers of a range.
    Range(RangeSteps),
    /// Elements of an already evaluated value.
    Values(std::vec::IntoIter<Value>),
}

impl Iterator for Iteration {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        match self {
            Self::Range(steps) => steps.next().map(Value::Number),
            Self::Values(values) => values.next(),
        }
    }
}

fn unexpected(node: &Node) -> RuntimeError {
    RuntimeError::UnexpectedNode { kind:     node.kind.label(),
                                   position: node.position, }
}
