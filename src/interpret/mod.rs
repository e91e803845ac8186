mod context;
mod error;
mod interpreter;
mod number;
mod serial;
mod value;

pub use context::Context;
pub use error::EvalError;
pub use interpreter::Interpreter;
pub use number::Number;
pub use serial::SerialValue;
pub use value::{Callable, Value};
