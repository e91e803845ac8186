mod error;
mod lex;
mod parse_context;
mod parser;

pub use error::ParseError;
pub use lex::{lex, LexItem};
pub use parser::parse;
