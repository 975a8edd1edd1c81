use crate::{
    ast::Operator,
    interpreter::{evaluator::binary::array::map_list_scalar, value::core::Value},
};

/// Evaluates a prefix operation on a value.
///
/// Supported operators:
/// - `Not`: logical negation of the operand's truthiness.
/// - `Negate`: numeric negation of a number, or of every number in a list.
/// - `Plus`: the identity on numbers and number lists.
///
/// Anything else yields Undefined.
///
/// # Example
/// ```
/// use solidscript::{
///     ast::Operator,
///     interpreter::{evaluator::unary::eval_unary, value::core::Value},
/// };
///
/// assert_eq!(eval_unary(Operator::Negate, &Value::Number(5.0)), Value::Number(-5.0));
/// assert_eq!(eval_unary(Operator::Not, &Value::Undefined), Value::Number(1.0));
/// assert_eq!(eval_unary(Operator::Negate, &Value::from("a")), Value::Undefined);
/// ```
#[must_use]
pub fn eval_unary(op: Operator, value: &Value) -> Value {
    match op {
        Operator::Not => Value::from(!value.is_truthy()),
        Operator::Negate => match value {
            Value::Number(n) => Value::Number(-n),
            Value::List(items) => map_list_scalar(items, |x| -x),
            _ => Value::Undefined,
        },
        Operator::Plus => match value {
            Value::Number(_) => value.clone(),
            Value::List(items) => map_list_scalar(items, |x| x),
            _ => Value::Undefined,
        },
        _ => Value::Undefined,
    }
}
