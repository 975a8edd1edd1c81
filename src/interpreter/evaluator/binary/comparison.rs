use crate::{ast::Operator, interpreter::value::core::Value};

/// Evaluates `==` or `!=` by structural equality.
///
/// Values of different kinds are never equal. Lists are equal when they
/// have the same length and equal elements.
#[must_use]
pub fn eval_equality(op: Operator, left: &Value, right: &Value) -> Value {
    let equal = left == right;
    Value::from(if op == Operator::NotEqual { !equal } else { equal })
}

/// Evaluates `<`, `<=`, `>` or `>=`.
///
/// Numbers compare numerically and text lexicographically. Mixed or other
/// operands yield Undefined.
///
/// # Example
/// ```
/// use solidscript::{
///     ast::Operator,
///     interpreter::{evaluator::binary::comparison::eval_comparison, value::core::Value},
/// };
///
/// let r = eval_comparison(Operator::Less, &Value::Number(3.0), &Value::Number(5.0));
/// assert_eq!(r, Value::Number(1.0));
///
/// let r = eval_comparison(Operator::Greater, &Value::from("b"), &Value::from("a"));
/// assert_eq!(r, Value::Number(1.0));
///
/// let r = eval_comparison(Operator::Less, &Value::Number(1.0), &Value::from("a"));
/// assert_eq!(r, Value::Undefined);
/// ```
#[must_use]
pub fn eval_comparison(op: Operator, left: &Value, right: &Value) -> Value {
    let ordering = match (left, right) {
        (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
        (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
        _ => return Value::Undefined,
    };
    let Some(ordering) = ordering else {
        return Value::from(false);
    };

    let result = match op {
        Operator::Less => ordering.is_lt(),
        Operator::LessEqual => ordering.is_le(),
        Operator::Greater => ordering.is_gt(),
        Operator::GreaterEqual => ordering.is_ge(),
        _ => return Value::Undefined,
    };
    Value::from(result)
}
