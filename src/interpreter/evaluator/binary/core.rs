use crate::{
    ast::Operator,
    interpreter::{
        evaluator::binary::{
            array::{dot_product, map_list_binary, map_list_scalar},
            comparison::{eval_comparison, eval_equality},
        },
        value::core::Value,
    },
    util::num::f64_to_index,
};

/// Evaluates a binary operation between two values.
///
/// Operations route to specialized handlers depending on the operator and
/// operand types:
/// - `+` and `-` combine two numbers, or two lists of equal length
///   element-wise.
/// - `*` scales a list by a number from either side, and takes the dot
///   product of two number lists of equal length.
/// - `/` divides a list element-wise by a number.
/// - `%` is the floating-point remainder.
/// - Relational operators compare numbers or text; `==` and `!=` compare any
///   two values structurally.
/// - Indexing reads an element of a list or a character of a string.
///
/// Every other combination yields Undefined. `&&` and `||` are evaluated
/// by the caller because they short-circuit.
///
/// # Parameters
/// - `op`: The operator.
/// - `left`: Left operand.
/// - `right`: Right operand.
///
/// # Returns
/// The resulting value.
///
/// # Example
/// ```
/// use solidscript::{
///     ast::Operator,
///     interpreter::{evaluator::binary::core::eval_binary, value::core::Value},
/// };
///
/// let left = Value::from(vec![Value::Number(1.0), Value::Number(2.0)]);
/// let right = Value::Number(3.0);
///
/// assert_eq!(eval_binary(Operator::Mul, &left, &right),
///            Value::from(vec![Value::Number(3.0), Value::Number(6.0)]));
/// assert_eq!(eval_binary(Operator::Add, &left, &right), Value::Undefined);
/// ```
#[must_use]
pub fn eval_binary(op: Operator, left: &Value, right: &Value) -> Value {
    use Operator::{Add, Div, Index, Mod, Mul, Sub};
    use Value::{List, Number, Text};

    match op {
        Add | Sub => match (left, right) {
            (Number(a), Number(b)) => Number(scalar(op, *a, *b)),
            (List(a), List(b)) => map_list_binary(op, a, b),
            _ => Value::Undefined,
        },

        Mul => match (left, right) {
            (Number(a), Number(b)) => Number(a * b),
            (List(items), Number(n)) | (Number(n), List(items)) => {
                map_list_scalar(items, |x| x * n)
            },
            (List(a), List(b)) => dot_product(a, b),
            _ => Value::Undefined,
        },

        Div => match (left, right) {
            (Number(a), Number(b)) => Number(a / b),
            (List(items), Number(n)) => map_list_scalar(items, |x| x / n),
            _ => Value::Undefined,
        },

        Mod => match (left, right) {
            (Number(a), Number(b)) => Number(a % b),
            _ => Value::Undefined,
        },

        Index => match (left, right.as_number().and_then(f64_to_index)) {
            (List(items), Some(i)) => items.get(i).cloned().unwrap_or_default(),
            (Text(s), Some(i)) => s.chars()
                                   .nth(i)
                                   .map_or(Value::Undefined, |c| Value::from(c.to_string())),
            _ => Value::Undefined,
        },

        _ if op.is_relational() => match op {
            Operator::Equal | Operator::NotEqual => eval_equality(op, left, right),
            _ => eval_comparison(op, left, right),
        },

        _ => Value::Undefined,
    }
}

/// Applies an arithmetic operator to two numbers.
pub(in crate::interpreter::evaluator::binary) fn scalar(op: Operator, a: f64, b: f64) -> f64 {
    match op {
        Operator::Add => a + b,
        Operator::Sub => a - b,
        Operator::Mul => a * b,
        Operator::Div => a / b,
        _ => a % b,
    }
}
