use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            builtin::{list, math, min_max},
            core::EvalResult,
        },
        value::core::Value,
    },
};

/// Type alias for builtin function handlers.
///
/// A builtin receives the evaluated positional arguments and returns a value.
/// Arguments it cannot use make it return Undefined.
type BuiltinFn = fn(&[Value]) -> Value;

/// Specifies the allowed number of arguments for a builtin.
///
/// - `Exact(n)` means the builtin must receive exactly `n` arguments.
/// - `OneOf(slice)` means the builtin accepts any arity listed in `slice`.
/// - `AtLeast(n)` means the builtin is variadic with at least `n` arguments.
#[derive(Clone, Copy)]
enum Arity {
    Exact(usize),
    OneOf(&'static [usize]),
    AtLeast(usize),
}

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - an arity specification,
/// - a function pointer implementing the builtin.
///
/// The macro produces:
/// - `BuiltinDef` (internal metadata),
/// - `BUILTIN_TABLE` (static table for lookup),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            name:  &'static str,
            arity: Arity,
            func:  BuiltinFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, func: $func },
            )*
        ];
        /// Names of all built-in functions, entered into the prelude scope.
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "abs"    => { arity: Arity::Exact(1), func: math::abs },
    "sign"   => { arity: Arity::Exact(1), func: math::sign },
    "sin"    => { arity: Arity::Exact(1), func: math::sin },
    "cos"    => { arity: Arity::Exact(1), func: math::cos },
    "tan"    => { arity: Arity::Exact(1), func: math::tan },
    "asin"   => { arity: Arity::Exact(1), func: math::asin },
    "acos"   => { arity: Arity::Exact(1), func: math::acos },
    "atan"   => { arity: Arity::Exact(1), func: math::atan },
    "atan2"  => { arity: Arity::Exact(2), func: math::atan2 },
    "floor"  => { arity: Arity::Exact(1), func: math::floor },
    "ceil"   => { arity: Arity::Exact(1), func: math::ceil },
    "round"  => { arity: Arity::Exact(1), func: math::round },
    "sqrt"   => { arity: Arity::Exact(1), func: math::sqrt },
    "exp"    => { arity: Arity::Exact(1), func: math::exp },
    "ln"     => { arity: Arity::Exact(1), func: math::ln },
    "log"    => { arity: Arity::OneOf(&[1, 2]), func: math::log },
    "pow"    => { arity: Arity::Exact(2), func: math::pow },
    "min"    => { arity: Arity::AtLeast(1), func: |args| min_max::min_max("min", args) },
    "max"    => { arity: Arity::AtLeast(1), func: |args| min_max::min_max("max", args) },
    "len"    => { arity: Arity::Exact(1), func: list::len },
    "norm"   => { arity: Arity::Exact(1), func: list::norm },
    "str"    => { arity: Arity::AtLeast(0), func: list::str },
    "concat" => { arity: Arity::AtLeast(0), func: list::concat },
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity constraint.
    ///
    /// Returns `true` if the count is permitted, `false` otherwise.
    fn check(&self, n: usize) -> bool {
        match self {
            Self::Exact(m) => n == *m,
            Self::OneOf(arr) => arr.contains(&n),
            Self::AtLeast(m) => n >= *m,
        }
    }
}

/// Calls a built-in function.
///
/// A call with an argument count the builtin does not accept yields
/// Undefined, like any other argument it cannot use.
///
/// # Errors
/// `RuntimeError::UnsupportedBuiltin` if no builtin has this name.
///
/// # Example
/// ```
/// use solidscript::interpreter::{
///     evaluator::builtin::function::call_builtin_function,
///     value::core::Value,
/// };
///
/// let r = call_builtin_function("pow", &[Value::Number(2.0), Value::Number(3.0)]).unwrap();
/// assert_eq!(r, Value::Number(8.0));
///
/// let r = call_builtin_function("pow", &[Value::Number(2.0)]).unwrap();
/// assert_eq!(r, Value::Undefined);
///
/// assert!(call_builtin_function("nope", &[]).is_err());
/// ```
pub fn call_builtin_function(name: &str, args: &[Value]) -> EvalResult<Value> {
    let builtin = BUILTIN_TABLE.iter()
                               .find(|b| b.name == name)
                               .ok_or_else(|| RuntimeError::UnsupportedBuiltin { name: name.to_string() })?;

    if !builtin.arity.check(args.len()) {
        tracing::warn!("'{name}' does not take {} arguments; the result is undef.", args.len());
        return Ok(Value::Undefined);
    }
    Ok((builtin.func)(args))
}
