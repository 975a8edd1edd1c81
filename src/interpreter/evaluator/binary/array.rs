use crate::{
    ast::Operator,
    interpreter::{evaluator::binary::core::scalar, value::core::Value},
};

/// Applies `+` or `-` element-wise to two lists.
///
/// The lists must have the same length. Nested lists are combined
/// recursively, so vectors of points add point by point. A length mismatch
/// or a non-numeric element anywhere yields Undefined for the whole result.
///
/// # Parameters
/// - `op`: `Operator::Add` or `Operator::Sub`.
/// - `left`: Left operand elements.
/// - `right`: Right operand elements.
///
/// # Example
/// ```
/// use solidscript::{
///     ast::Operator,
///     interpreter::{evaluator::binary::array::map_list_binary, value::core::Value},
/// };
///
/// let a = [Value::Number(1.0), Value::Number(2.0)];
/// let b = [Value::Number(10.0), Value::Number(20.0)];
///
/// assert_eq!(map_list_binary(Operator::Add, &a, &b),
///            Value::from(vec![Value::Number(11.0), Value::Number(22.0)]));
/// assert_eq!(map_list_binary(Operator::Add, &a, &b[..1]), Value::Undefined);
/// ```
#[must_use]
pub fn map_list_binary(op: Operator, left: &[Value], right: &[Value]) -> Value {
    if left.len() != right.len() {
        return Value::Undefined;
    }

    let mut out = Vec::with_capacity(left.len());
    for (l, r) in left.iter().zip(right) {
        let v = match (l, r) {
            (Value::Number(a), Value::Number(b)) => Value::Number(scalar(op, *a, *b)),
            (Value::List(a), Value::List(b)) => map_list_binary(op, a, b),
            _ => Value::Undefined,
        };
        if v.is_undefined() {
            return Value::Undefined;
        }
        out.push(v);
    }
    Value::from(out)
}

/// Applies `f` to every number in a possibly nested list.
///
/// Used for scaling a list by a number. A non-numeric element yields
/// Undefined for the whole result.
#[must_use]
pub fn map_list_scalar<F>(items: &[Value], f: F) -> Value
    where F: Fn(f64) -> f64 + Copy
{
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        let v = match item {
            Value::Number(n) => Value::Number(f(*n)),
            Value::List(inner) => map_list_scalar(inner, f),
            _ => Value::Undefined,
        };
        if v.is_undefined() {
            return Value::Undefined;
        }
        out.push(v);
    }
    Value::from(out)
}

/// Computes the dot product of two number lists of equal length.
///
/// Anything else, including nested lists, yields Undefined.
///
/// # Example
/// ```
/// use solidscript::interpreter::{evaluator::binary::array::dot_product, value::core::Value};
///
/// let a = [Value::Number(1.0), Value::Number(2.0), Value::Number(3.0)];
/// let b = [Value::Number(4.0), Value::Number(5.0), Value::Number(6.0)];
///
/// assert_eq!(dot_product(&a, &b), Value::Number(32.0));
/// ```
#[must_use]
pub fn dot_product(left: &[Value], right: &[Value]) -> Value {
    if left.len() != right.len() {
        return Value::Undefined;
    }
    left.iter()
        .zip(right)
        .try_fold(0.0, |acc, (l, r)| Some(l.as_number()?.mul_add(r.as_number()?, acc)))
        .map_or(Value::Undefined, Value::Number)
}
