//! A small expression language with JavaScript-like operators.
//!
//! ```
//! use americano::{parse, Context, Value};
//!
//! let expr = parse("price * 2 > 10 ? 'big' : 'small'").unwrap();
//! let ctx = Context::new().with_value("price", 7);
//! assert_eq!(expr.eval(&ctx).unwrap(), Value::from("big"));
//! ```

pub mod ast;
pub mod interpret;
pub mod parse;
pub mod span;
pub mod token;

use log::debug;
use thiserror::Error;

pub use ast::Node;
pub use interpret::{Callable, Context, EvalError, Number, SerialValue, Value};
pub use parse::ParseError;

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Evaluation error: {0}")]
    Eval(#[from] EvalError),
}

/// A parsed expression, ready to be evaluated against any number of contexts.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedExpression {
    source: String,
    root: Node,
}

impl ParsedExpression {
    pub fn eval(&self, context: &Context) -> Result<Value, EvalError> {
        interpret::Interpreter::new(context).interpret(&self.root)
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

impl std::fmt::Display for ParsedExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.root)
    }
}

pub fn parse(input: &str) -> Result<ParsedExpression, ParseError> {
    let tokens = parse::lex(input);
    for item in &tokens {
        debug!(
            "{} - {:?}: {:?}",
            item.span,
            item.token,
            item.span.str_from_source(input),
        );
    }

    let root = parse::parse(input, &tokens)?;
    debug!("{}", root);

    Ok(ParsedExpression {
        source: input.to_string(),
        root,
    })
}

/// Parses and evaluates in one step.
pub fn evaluate(input: &str, context: &Context) -> Result<Value, Error> {
    Ok(parse(input)?.eval(context)?)
}
