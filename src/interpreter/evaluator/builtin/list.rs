use crate::interpreter::value::core::Value;

/// Number of elements of a list or characters of a string.
///
/// # Example
/// ```
/// use solidscript::interpreter::{evaluator::builtin::list::len, value::core::Value};
///
/// assert_eq!(len(&[Value::from("abc")]), Value::Number(3.0));
/// assert_eq!(len(&[Value::Number(1.0)]), Value::Undefined);
/// ```
#[must_use]
pub fn len(args: &[Value]) -> Value {
    match args {
        [Value::List(items)] => Value::from(items.len()),
        [Value::Text(s)] => Value::from(s.chars().count()),
        _ => Value::Undefined,
    }
}

/// Euclidean length of a number list.
#[must_use]
pub fn norm(args: &[Value]) -> Value {
    let [vector] = args else {
        return Value::Undefined;
    };
    vector.as_numbers()
          .map_or(Value::Undefined, |v| Value::Number(v.iter().map(|x| x * x).sum::<f64>().sqrt()))
}

/// Concatenates the text form of every argument.
///
/// Strings contribute their characters without quotes.
///
/// # Example
/// ```
/// use solidscript::interpreter::{evaluator::builtin::list::str, value::core::Value};
///
/// let r = str(&[Value::from("r = "), Value::Number(2.0)]);
/// assert_eq!(r, Value::from("r = 2"));
/// ```
#[must_use]
pub fn str(args: &[Value]) -> Value {
    Value::from(args.iter().map(Value::to_plain_string).collect::<String>())
}

/// Joins lists into one list.
///
/// A non-list argument is added as a single element.
#[must_use]
pub fn concat(args: &[Value]) -> Value {
    let mut out = Vec::new();
    for arg in args {
        match arg {
            Value::List(items) => out.extend(items.iter().cloned()),
            other => out.push(other.clone()),
        }
    }
    Value::from(out)
}
