use std::{fmt, sync::Arc};

use derive_more::Display;

use crate::interpret::{error::EvalError, number::Number};

type HostFn = dyn Fn(Vec<Value>) -> Result<Value, EvalError> + Send + Sync;

/// A host function reachable through the evaluation context.
///
/// Two callables are the same value only when they share the same closure.
#[derive(Clone)]
pub struct Callable(Arc<HostFn>);

impl Callable {
    pub fn new<F>(function: F) -> Self
    where
        F: Fn(Vec<Value>) -> Result<Value, EvalError> + Send + Sync + 'static,
    {
        Callable(Arc::new(function))
    }

    pub fn call(&self, args: Vec<Value>) -> Result<Value, EvalError> {
        (self.0)(args)
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callable({:p})", Arc::as_ptr(&self.0))
    }
}

/// The string form of a value is what `+` concatenates: strings are written
/// raw, `null`/`true`/`false` as words, arrays as `[a, b]`.
#[derive(Display, derive_more::Debug, Clone)]
pub enum Value {
    #[display("null")]
    #[debug("Null")]
    Null,

    #[display("{}", _0)]
    #[debug("Bool({})", _0)]
    Bool(bool),

    #[display("{}", _0)]
    #[debug("{:?}", _0)]
    Number(Number),

    #[display("{}", _0)]
    #[debug("Str({:?})", _0)]
    Str(String),

    #[display("{}", format_array(_0))]
    #[debug("Array({:?})", _0)]
    Array(Vec<Value>),

    #[display("function")]
    #[debug("{:?}", _0)]
    Callable(Callable),
}

fn format_array(values: &[Value]) -> String {
    let internal = values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{}]", internal)
}

impl Value {
    pub fn make_integer(v: i64) -> Value {
        Value::Number(Number::Integer(v))
    }

    pub fn make_floating(v: f64) -> Value {
        Value::Number(Number::Floating(v))
    }

    pub fn make_str(v: impl Into<String>) -> Value {
        Value::Str(v.into())
    }

    pub fn make_function<F>(function: F) -> Value
    where
        F: Fn(Vec<Value>) -> Result<Value, EvalError> + Send + Sync + 'static,
    {
        Value::Callable(Callable::new(function))
    }

    pub fn get_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn get_number(&self) -> Option<Number> {
        match self {
            Value::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn get_str(&self) -> Option<&str> {
        match self {
            Value::Str(v) => Some(v),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(Number::Integer(_)) => "integer",
            Value::Number(Number::Floating(_)) => "float",
            Value::Str(_) => "string",
            Value::Array(_) => "array",
            Value::Callable(_) => "function",
        }
    }

    /// `false`, `null` and zero are falsy, everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(v) => *v,
            Value::Number(v) => !v.is_zero(),
            Value::Str(_) | Value::Array(_) | Value::Callable(_) => true,
        }
    }

    pub fn to_number(&self) -> Result<Number, EvalError> {
        match self {
            Value::Number(v) => Ok(*v),
            Value::Bool(v) => Ok(Number::Integer(*v as i64)),
            Value::Null => Ok(Number::Integer(0)),
            Value::Str(s) => parse_number(s).ok_or_else(|| EvalError::NotANumber(self.clone())),
            Value::Array(_) | Value::Callable(_) => Err(EvalError::NotANumber(self.clone())),
        }
    }

    /// `===`: no coercion across kinds, but integer and float are both numbers.
    pub fn strict_eq(&self, other: &Self) -> bool {
        use Value::*;
        match (self, other) {
            (Null, Null) => true,
            (Bool(l), Bool(r)) => l == r,
            (Number(l), Number(r)) => l == r,
            (Str(l), Str(r)) => l == r,
            (Array(l), Array(r)) => {
                l.len() == r.len() && l.iter().zip(r).all(|(l, r)| l.strict_eq(r))
            }
            (Callable(l), Callable(r)) => l.ptr_eq(r),
            _ => false,
        }
    }

    /// `==`: `null` only equals `null`, strings compare by content, arrays
    /// element-wise, and everything else by numeric value when both sides
    /// coerce to a number.
    pub fn loose_eq(&self, other: &Self) -> bool {
        use Value::*;
        match (self, other) {
            (Null, Null) => true,
            (Null, _) | (_, Null) => false,
            (Str(l), Str(r)) => l == r,
            (Array(l), Array(r)) => {
                l.len() == r.len() && l.iter().zip(r).all(|(l, r)| l.loose_eq(r))
            }
            (Array(_), _) | (_, Array(_)) => false,
            (Callable(l), Callable(r)) => l.ptr_eq(r),
            (Callable(_), _) | (_, Callable(_)) => false,
            (l, r) => match (l.to_number(), r.to_number()) {
                (Ok(l), Ok(r)) => l == r,
                _ => false,
            },
        }
    }
}

/// Sign and digits parse as an integer, anything else Rust reads as an `f64`
/// parses as a float.
fn parse_number(s: &str) -> Option<Number> {
    let s = s.trim();
    if let Ok(v) = s.parse::<i64>() {
        return Some(Number::Integer(v));
    }
    s.parse::<f64>().ok().map(Number::Floating)
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.strict_eq(other)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::make_integer(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::make_integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::make_floating(v)
    }
}

impl From<Number> for Value {
    fn from(v: Number) -> Self {
        Value::Number(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::make_str(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Array(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthiness() {
        assert!(!Value::Null.is_truthy());
        assert!(!Value::from(false).is_truthy());
        assert!(!Value::from(0).is_truthy());
        assert!(!Value::from(0.0).is_truthy());
        assert!(Value::from("").is_truthy());
        assert!(Value::Array(vec![]).is_truthy());
        assert!(Value::from(-1).is_truthy());
    }

    #[test]
    fn number_coercion() {
        assert_eq!(Value::from(true).to_number().unwrap(), Number::Integer(1));
        assert_eq!(Value::Null.to_number().unwrap(), Number::Integer(0));
        assert!(matches!(
            Value::from(" -12 ").to_number(),
            Ok(Number::Integer(-12))
        ));
        assert!(matches!(
            Value::from("2.5").to_number(),
            Ok(Number::Floating(v)) if v == 2.5
        ));
        assert!(matches!(
            Value::from("abc").to_number(),
            Err(EvalError::NotANumber(_))
        ));
        assert!(Value::from(vec![1]).to_number().is_err());
    }

    #[test]
    fn string_coercion_follows_float_parsing() {
        assert!(matches!(
            Value::from("1e3").to_number(),
            Ok(Number::Floating(v)) if v == 1000.0
        ));
        assert!(matches!(
            Value::from("inf").to_number(),
            Ok(Number::Floating(v)) if v.is_infinite()
        ));
        assert!(matches!(
            Value::from("nan").to_number(),
            Ok(Number::Floating(v)) if v.is_nan()
        ));
        assert!(Value::from("").to_number().is_err());
    }

    #[test]
    fn accessors_only_match_their_kind() {
        assert_eq!(Value::from(true).get_bool(), Some(true));
        assert_eq!(Value::from(1).get_bool(), None);
        assert_eq!(Value::from(2.5).get_number(), Some(Number::Floating(2.5)));
        assert_eq!(Value::from("2").get_number(), None);
        assert_eq!(Value::from("x").get_str(), Some("x"));
        assert_eq!(Value::Null.get_str(), None);
    }

    #[test]
    fn strict_and_loose_equality() {
        assert!(Value::from(1).strict_eq(&Value::from(1.0)));
        assert!(!Value::from(1).strict_eq(&Value::from("1")));
        assert!(!Value::from(1).strict_eq(&Value::from(true)));
        assert!(Value::from(1).loose_eq(&Value::from("1")));
        assert!(Value::from(1).loose_eq(&Value::from(true)));
        assert!(!Value::Null.loose_eq(&Value::from(0)));
        assert!(!Value::from("A").loose_eq(&Value::from(1)));
        assert!(!Value::from("A").loose_eq(&Value::from(true)));
        assert!(Value::from(vec![1, 2]).loose_eq(&Value::from(vec!["1", "2"])));
        assert!(!Value::from(vec![1, 2]).loose_eq(&Value::from(vec![0])));
    }

    #[test]
    fn callables_compare_by_identity() {
        let f = Value::make_function(|_| Ok(Value::Null));
        let g = Value::make_function(|_| Ok(Value::Null));
        assert!(f.strict_eq(&f.clone()));
        assert!(!f.strict_eq(&g));
    }

    #[test]
    fn display() {
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(Value::from("A").to_string(), "A");
        assert_eq!(
            Value::from(vec![Value::from(1), Value::from("b")]).to_string(),
            "[1, b]"
        );
    }
}
