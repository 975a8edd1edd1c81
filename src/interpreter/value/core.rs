use std::{fmt, rc::Rc};

use crate::{
    csg::{Vec2, Vec3},
    util::num::usize_to_f64_checked,
};

/// Represents a runtime value in the interpreter.
///
/// Values are immutable. Lists share their storage, so copying a value is
/// cheap and never aliases anything that could change.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// No value is bound. A normal value, not an error.
    #[default]
    Undefined,
    /// A numeric value (double precision floating-point). Booleans are the
    /// numbers `1` and `0`.
    Number(f64),
    /// A string.
    Text(Rc<str>),
    /// An ordered list of values.
    List(Rc<Vec<Self>>),
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Number(if v { 1.0 } else { 0.0 })
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(Rc::from(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(Rc::from(v))
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::List(Rc::new(v))
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        usize_to_f64_checked(v).map_or(Self::Undefined, Self::Number)
    }
}

impl Value {
    /// Returns `true` if the value counts as true in a condition.
    ///
    /// Undefined is false. A number is true unless it is zero or NaN. Text
    /// and lists are true unless empty.
    ///
    /// # Example
    /// ```
    /// use solidscript::interpreter::value::core::Value;
    ///
    /// assert!(Value::Number(2.0).is_truthy());
    /// assert!(!Value::Number(0.0).is_truthy());
    /// assert!(!Value::Undefined.is_truthy());
    /// assert!(!Value::from(Vec::new()).is_truthy());
    /// assert!(Value::from("a").is_truthy());
    /// ```
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Undefined => false,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::Text(s) => !s.is_empty(),
            Self::List(items) => !items.is_empty(),
        }
    }

    /// Returns `true` for [`Value::Undefined`].
    #[must_use]
    pub const fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// The number held, if this is a number.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The elements held, if this is a list.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Interprets the value as a list of numbers.
    ///
    /// # Returns
    /// `None` unless this is a list whose elements are all numbers.
    #[must_use]
    pub fn as_numbers(&self) -> Option<Vec<f64>> {
        self.as_list()?.iter().map(Self::as_number).collect()
    }

    /// Interprets the value as a 3-D vector.
    ///
    /// A list of two numbers gets `z = 0`. A single number `n` becomes
    /// `[n, n, n]` when `broadcast` is set.
    #[must_use]
    pub fn as_vec3(&self, broadcast: bool) -> Option<Vec3> {
        if let Self::Number(n) = self {
            return broadcast.then_some([*n; 3]);
        }
        match self.as_numbers()?.as_slice() {
            [x, y] => Some([*x, *y, 0.0]),
            [x, y, z] => Some([*x, *y, *z]),
            _ => None,
        }
    }

    /// Interprets the value as a 2-D vector, broadcasting a single number.
    #[must_use]
    pub fn as_vec2(&self) -> Option<Vec2> {
        if let Self::Number(n) = self {
            return Some([*n; 2]);
        }
        match self.as_numbers()?.as_slice() {
            [x, y] => Some([*x, *y]),
            _ => None,
        }
    }

    /// Interprets the value as a boolean flag; Undefined gives `default`.
    #[must_use]
    pub fn as_flag(&self, default: bool) -> bool {
        if self.is_undefined() { default } else { self.is_truthy() }
    }

    /// The text form used by `str` and string concatenation: strings appear
    /// without quotes at the top level.
    #[must_use]
    pub fn to_plain_string(&self) -> String {
        match self {
            Self::Text(s) => s.to_string(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => write!(f, "undef"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "\"{s}\""),
            Self::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            },
        }
    }
}
