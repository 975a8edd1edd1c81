use crate::interpreter::value::core::Value;

/// Applies a unary numeric builtin to its single argument.
///
/// The generated functions take one argument. A number maps through the
/// given expression; anything else yields Undefined.
///
/// # Example
/// ```
/// use solidscript::interpreter::{evaluator::builtin::math::sin, value::core::Value};
///
/// let r = sin(&[Value::Number(90.0)]);
/// assert_eq!(r, Value::Number(1.0));
///
/// assert_eq!(sin(&[Value::from("a")]), Value::Undefined);
/// ```
macro_rules! numeric_builtin {
    ($(#[$doc:meta])* $fname:ident, |$x:ident| $body:expr) => {
        $(#[$doc])*
        #[must_use]
        pub fn $fname(args: &[Value]) -> Value {
            match args {
                [Value::Number($x)] => {
                    let $x = *$x;
                    Value::Number($body)
                },
                _ => Value::Undefined,
            }
        }
    };
}

numeric_builtin!(
    /// Absolute value.
    abs, |x| x.abs());
numeric_builtin!(
    /// `-1`, `0` or `1` by the sign of the argument.
    sign, |x| if x == 0.0 { 0.0 } else { x.signum() });
numeric_builtin!(
    /// Sine of an angle in degrees.
    sin, |x| sin_degrees(x));
numeric_builtin!(
    /// Cosine of an angle in degrees.
    cos, |x| cos_degrees(x));
numeric_builtin!(
    /// Tangent of an angle in degrees.
    tan, |x| x.to_radians().tan());
numeric_builtin!(
    /// Arcsine, in degrees.
    asin, |x| x.asin().to_degrees());
numeric_builtin!(
    /// Arccosine, in degrees.
    acos, |x| x.acos().to_degrees());
numeric_builtin!(
    /// Arctangent, in degrees.
    atan, |x| x.atan().to_degrees());
numeric_builtin!(floor, |x| x.floor());
numeric_builtin!(ceil, |x| x.ceil());
numeric_builtin!(
    /// Rounds half away from zero.
    round, |x| x.round());
numeric_builtin!(sqrt, |x| x.sqrt());
numeric_builtin!(exp, |x| x.exp());
numeric_builtin!(
    /// Natural logarithm.
    ln, |x| x.ln());

/// Sine of an angle in degrees, exact at multiples of 90.
fn sin_degrees(x: f64) -> f64 {
    let quarter = x / 90.0;
    if quarter.fract() == 0.0 {
        return match quarter.rem_euclid(4.0) {
            q if q == 1.0 => 1.0,
            q if q == 3.0 => -1.0,
            _ => 0.0,
        };
    }
    x.to_radians().sin()
}

/// Cosine of an angle in degrees, exact at multiples of 90.
fn cos_degrees(x: f64) -> f64 {
    sin_degrees(x + 90.0)
}

/// Angle of the vector `(x, y)`, in degrees.
///
/// Called as `atan2(y, x)`.
#[must_use]
pub fn atan2(args: &[Value]) -> Value {
    match args {
        [Value::Number(y), Value::Number(x)] => Value::Number(y.atan2(*x).to_degrees()),
        _ => Value::Undefined,
    }
}

/// Computes a logarithm.
///
/// With one argument this is the base-10 logarithm. `log(b, x)` is the
/// logarithm of `x` to base `b`.
///
/// # Example
/// ```
/// use solidscript::interpreter::{evaluator::builtin::math::log, value::core::Value};
///
/// assert_eq!(log(&[Value::Number(1.0)]), Value::Number(0.0));
/// assert_eq!(log(&[Value::Number(2.0), Value::Number(8.0)]), Value::Number(3.0));
/// ```
#[must_use]
pub fn log(args: &[Value]) -> Value {
    match args {
        [Value::Number(x)] => Value::Number(x.log10()),
        [Value::Number(base), Value::Number(x)] => Value::Number(x.log2() / base.log2()),
        _ => Value::Undefined,
    }
}

/// Raises the first argument to the power of the second.
#[must_use]
pub fn pow(args: &[Value]) -> Value {
    match args {
        [Value::Number(base), Value::Number(exponent)] => Value::Number(base.powf(*exponent)),
        _ => Value::Undefined,
    }
}
