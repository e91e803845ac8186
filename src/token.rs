use derive_more::Display;
use phf::phf_map;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Token {
    #[display("integer")]
    Integer,
    #[display("float")]
    Floating,
    #[display("string")]
    Str,
    #[display("identifier")]
    Identifier,

    #[display("true")]
    True,
    #[display("false")]
    False,
    #[display("null")]
    Null,

    #[display("+")]
    Plus,
    #[display("-")]
    Minus,
    #[display("*")]
    Star,
    #[display("/")]
    Slash,
    #[display("!")]
    Bang,

    #[display("<")]
    Less,
    #[display("<=")]
    LessEqual,
    #[display(">")]
    Greater,
    #[display(">=")]
    GreaterEqual,
    #[display("===")]
    EqualEqualEqual,
    #[display("==")]
    EqualEqual,
    #[display("!==")]
    BangEqualEqual,
    #[display("!=")]
    BangEqual,

    #[display("&&")]
    And,
    #[display("||")]
    Or,

    #[display("?")]
    Question,
    #[display(":")]
    Colon,
    #[display(",")]
    Comma,

    #[display("(")]
    LRoundParen,
    #[display(")")]
    RRoundParen,
    #[display("[")]
    LSquareParen,
    #[display("]")]
    RSquareParen,

    #[display("end of input")]
    Eof,

    // the lexer never fails, the parser reports these
    #[display("unknown character")]
    Unknown,
    #[display("unterminated string")]
    UnterminatedString,
}

pub static KEYWORDS: phf::Map<&'static str, Token> = phf_map! {
    "true" => Token::True,
    "false" => Token::False,
    "null" => Token::Null,
};
