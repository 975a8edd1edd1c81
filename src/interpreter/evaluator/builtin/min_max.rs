use ordered_float::OrderedFloat;

use crate::interpreter::value::core::Value;

/// Computes the minimum or maximum of some numbers.
///
/// The numbers are either all the arguments, or the elements of a single
/// list argument. Any non-numeric candidate, or no candidates at all, yields
/// Undefined.
///
/// The operation is selected by the `name` parameter, which must be `"min"` or
/// `"max"`.
///
/// # Example
/// ```
/// use solidscript::interpreter::{evaluator::builtin::min_max::min_max, value::core::Value};
///
/// let r = min_max("min", &[Value::Number(3.0), Value::Number(7.0)]);
/// assert_eq!(r, Value::Number(3.0));
///
/// let list = Value::from(vec![Value::Number(2.5), Value::Number(1.0)]);
/// assert_eq!(min_max("max", &[list]), Value::Number(2.5));
/// ```
#[must_use]
pub fn min_max(name: &str, args: &[Value]) -> Value {
    let candidates = match args {
        [Value::List(items)] => items.as_slice(),
        _ => args,
    };
    let Some(numbers) = candidates.iter()
                                  .map(|v| v.as_number().map(OrderedFloat))
                                  .collect::<Option<Vec<_>>>()
    else {
        return Value::Undefined;
    };

    let result = if name == "min" {
        numbers.into_iter().min()
    } else {
        numbers.into_iter().max()
    };
    result.map_or(Value::Undefined, |n| Value::Number(n.into_inner()))
}
