use crate::span::Span;
use crate::token::Token;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Unexpected character in position {0}")]
    UnexpectedCharacter(Span),

    #[error("String starts at {0} is not closed")]
    UnclosedString(usize),

    #[error("Unexpected token `{0}` at position {1}{}", diagnostic_expect_token(.2))]
    UnexpectedToken(Token, Span, Option<Token>),

    #[error("Token `{0}` at position {1} cannot start an expression")]
    ExpectedExpression(Token, Span),

    #[error("Unable to parse to number at position {0}")]
    ParseToNumber(Span),

    #[error("Only a name can be called, found a call at position {0}")]
    CallTargetNotIdentifier(Span),

    #[error("Unable to parse the next value because of EOF{}", diagnostic_expect_token(.0))]
    Eof(Option<Token>),

    #[error("Parse have leftover tokens start with `{0}` at {1}")]
    Unfinished(Token, Span),
}

impl ParseError {
    pub fn get_source_start(&self, input: &str) -> (usize, usize) {
        use ParseError::*;
        match self {
            UnexpectedCharacter(s)
            | UnexpectedToken(_, s, _)
            | ExpectedExpression(_, s)
            | ParseToNumber(s)
            | CallTargetNotIdentifier(s)
            | Unfinished(_, s) => s.to_start_row_col(input),
            UnclosedString(u) => Span::empty(*u).to_start_row_col(input),
            Eof(_) => Span::empty(input.len()).to_start_row_col(input),
        }
    }
}

fn diagnostic_expect_token(o: &Option<Token>) -> String {
    match o {
        None => "".to_string(),
        Some(t) => format!(", expected token `{}`", t),
    }
}
