use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::interpret::{context::Context, number::Number, value::Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SerialValue {
    Nil,

    Bool(bool),

    // untagged variants are tried in order, so `1` stays an integer
    Integer(i64),

    Floating(f64),

    Str(String),

    Array(Vec<SerialValue>),
}

impl SerialValue {
    /// `None` for values JSON cannot hold, i.e. callables.
    pub fn convert_from_value(value: &Value) -> Option<Self> {
        let v = match value {
            Value::Null => Self::Nil,
            Value::Bool(v) => Self::Bool(*v),
            Value::Number(Number::Integer(v)) => Self::Integer(*v),
            Value::Number(Number::Floating(v)) => Self::Floating(*v),
            Value::Str(v) => Self::Str(v.clone()),
            Value::Array(values) => Self::Array(
                values
                    .iter()
                    .map(Self::convert_from_value)
                    .collect::<Option<_>>()?,
            ),
            Value::Callable(_) => return None,
        };
        Some(v)
    }

    pub fn hydrate(self) -> Value {
        match self {
            Self::Nil => Value::Null,
            Self::Bool(v) => Value::Bool(v),
            Self::Integer(v) => Value::make_integer(v),
            Self::Floating(v) => Value::make_floating(v),
            Self::Str(v) => Value::Str(v),
            Self::Array(values) => Value::Array(values.into_iter().map(Self::hydrate).collect()),
        }
    }
}

impl Context {
    /// Reads a JSON object of `name: value` pairs. Nested objects are rejected
    /// since the language has no object values.
    pub fn from_json_str(input: &str) -> Result<Context, serde_json::Error> {
        let map: BTreeMap<String, SerialValue> = serde_json::from_str(input)?;
        Ok(map.into_iter().map(|(k, v)| (k, v.hydrate())).collect())
    }
}

impl Value {
    pub fn to_json(&self) -> Option<String> {
        let serial = SerialValue::convert_from_value(self)?;
        serde_json::to_string(&serial).ok()
    }
}
