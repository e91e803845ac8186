use super::value::Value;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum EvalError {
    #[error("Variable of name `{0}` is not defined in the context")]
    UndefinedVariable(String),

    #[error("Function of name `{0}` is not defined in the context")]
    UndefinedFunction(String),

    #[error("Value `{1}` of name `{0}` is not a callable")]
    ValueNotCallable(String, Value),

    #[error("Value `{0}` of type `{}` cannot be converted to a number", .0.type_name())]
    NotANumber(Value),

    #[error("Divide by 0")]
    DivideByZero,

    /// Failure reported by a host callable.
    #[error("{0}")]
    Custom(String),
}
