use std::collections::HashMap;

use crate::interpret::{error::EvalError, value::Value};

/// Names visible to an expression while it is evaluated.
///
/// Functions are ordinary values holding a [`Callable`](super::Callable), so
/// one map serves both variables and functions.
#[derive(Debug, Clone, Default)]
pub struct Context {
    variables: HashMap<String, Value>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn with_function<F>(mut self, name: impl Into<String>, function: F) -> Self
    where
        F: Fn(Vec<Value>) -> Result<Value, EvalError> + Send + Sync + 'static,
    {
        self.insert_function(name, function);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.variables.insert(name.into(), value.into())
    }

    pub fn insert_function<F>(&mut self, name: impl Into<String>, function: F) -> Option<Value>
    where
        F: Fn(Vec<Value>) -> Result<Value, EvalError> + Send + Sync + 'static,
    {
        self.variables
            .insert(name.into(), Value::make_function(function))
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn extend(&mut self, other: Context) {
        self.variables.extend(other.variables);
    }
}

impl From<HashMap<String, Value>> for Context {
    fn from(variables: HashMap<String, Value>) -> Self {
        Self { variables }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Context {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            variables: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
