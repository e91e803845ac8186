use std::iter::Peekable;
use std::str::CharIndices;

use crate::span::Span;
use crate::token::{Token, KEYWORDS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexItem {
    pub span: Span,
    pub token: Token,
}

impl LexItem {
    pub fn new(token: Token, span: Span) -> Self {
        LexItem { token, span }
    }
}

fn is_identifier_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

fn is_identifier_char(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

struct Lexer<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

/// Splits `input` into tokens. Never fails: characters that start no token
/// become [`Token::Unknown`] and the item list always ends with [`Token::Eof`].
pub fn lex(input: &str) -> Vec<LexItem> {
    let mut lexer = Lexer {
        input,
        chars: input.char_indices().peekable(),
    };
    let mut result = vec![];

    while let Some((start, c)) = lexer.chars.next() {
        let token = match c {
            ' ' | '\t' | '\n' | '\r' => continue,
            '(' => Token::LRoundParen,
            ')' => Token::RRoundParen,
            '[' => Token::LSquareParen,
            ']' => Token::RSquareParen,
            ',' => Token::Comma,
            '?' => Token::Question,
            ':' => Token::Colon,
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '<' => lexer.choose('=', Token::LessEqual, Token::Less),
            '>' => lexer.choose('=', Token::GreaterEqual, Token::Greater),
            '=' => match lexer.choose('=', Token::EqualEqual, Token::Unknown) {
                Token::EqualEqual => lexer.choose('=', Token::EqualEqualEqual, Token::EqualEqual),
                other => other,
            },
            '!' => match lexer.choose('=', Token::BangEqual, Token::Bang) {
                Token::BangEqual => lexer.choose('=', Token::BangEqualEqual, Token::BangEqual),
                other => other,
            },
            '&' => lexer.choose('&', Token::And, Token::Unknown),
            '|' => lexer.choose('|', Token::Or, Token::Unknown),
            '"' | '\'' => lexer.lex_string(c),
            c if c.is_ascii_digit() => lexer.lex_number(),
            c if is_identifier_start(c) => lexer.lex_keyword_or_identifier(start),
            c if c.is_whitespace() => continue,
            _ => Token::Unknown,
        };
        result.push(LexItem::new(token, Span::new(start, lexer.offset())));
    }

    result.push(LexItem::new(Token::Eof, Span::empty(input.len())));
    result
}

impl Lexer<'_> {
    fn offset(&mut self) -> usize {
        self.chars
            .peek()
            .map(|(offset, _)| *offset)
            .unwrap_or(self.input.len())
    }

    fn next_if_eq(&mut self, expected: char) -> bool {
        self.chars.next_if(|(_, c)| *c == expected).is_some()
    }

    fn choose(&mut self, next: char, matched: Token, otherwise: Token) -> Token {
        if self.next_if_eq(next) {
            matched
        } else {
            otherwise
        }
    }

    fn eat_digits(&mut self) {
        while self.chars.next_if(|(_, c)| c.is_ascii_digit()).is_some() {}
    }

    fn lex_number(&mut self) -> Token {
        self.eat_digits();

        // only take the '.' when a digit follows it
        let mut lookahead = self.chars.clone();
        let has_fraction = matches!(lookahead.next(), Some((_, '.')))
            && matches!(lookahead.next(), Some((_, c)) if c.is_ascii_digit());
        if !has_fraction {
            return Token::Integer;
        }

        self.chars.next();
        self.eat_digits();
        Token::Floating
    }

    fn lex_string(&mut self, quote: char) -> Token {
        while let Some((_, c)) = self.chars.next() {
            if c == quote {
                return Token::Str;
            }
            if c == '\\' && self.chars.next().is_none() {
                break;
            }
        }
        Token::UnterminatedString
    }

    fn lex_keyword_or_identifier(&mut self, start: usize) -> Token {
        while self.chars.next_if(|(_, c)| is_identifier_char(*c)).is_some() {}
        let end = self.offset();
        KEYWORDS
            .get(&self.input[start..end])
            .copied()
            .unwrap_or(Token::Identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        lex(input).into_iter().map(|li| li.token).collect()
    }

    #[test]
    fn test_single_and_multi_char_operators() {
        let test_cases = vec![
            ("+", Token::Plus),
            ("-", Token::Minus),
            ("*", Token::Star),
            ("/", Token::Slash),
            ("!", Token::Bang),
            ("<", Token::Less),
            ("<=", Token::LessEqual),
            (">", Token::Greater),
            (">=", Token::GreaterEqual),
            ("==", Token::EqualEqual),
            ("===", Token::EqualEqualEqual),
            ("!=", Token::BangEqual),
            ("!==", Token::BangEqualEqual),
            ("&&", Token::And),
            ("||", Token::Or),
            ("?", Token::Question),
            (":", Token::Colon),
            (",", Token::Comma),
            ("(", Token::LRoundParen),
            (")", Token::RRoundParen),
            ("[", Token::LSquareParen),
            ("]", Token::RSquareParen),
        ];

        for (input, expected) in test_cases {
            assert_eq!(tokens(input), vec![expected, Token::Eof], "input {input:?}");
        }
    }

    #[test]
    fn test_lone_prefixes_are_unknown() {
        assert_eq!(tokens("="), vec![Token::Unknown, Token::Eof]);
        assert_eq!(tokens("&"), vec![Token::Unknown, Token::Eof]);
        assert_eq!(tokens("|"), vec![Token::Unknown, Token::Eof]);
        assert_eq!(tokens("#"), vec![Token::Unknown, Token::Eof]);
    }

    #[test]
    fn test_keywords() {
        assert_eq!(
            tokens("true false null nullable _x1"),
            vec![
                Token::True,
                Token::False,
                Token::Null,
                Token::Identifier,
                Token::Identifier,
                Token::Eof
            ]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(tokens("100"), vec![Token::Integer, Token::Eof]);
        assert_eq!(tokens("12.34"), vec![Token::Floating, Token::Eof]);
        assert_eq!(
            tokens("1."),
            vec![Token::Integer, Token::Unknown, Token::Eof]
        );
    }

    #[test]
    fn test_strings_keep_span_with_quotes() {
        let input = r#"'a\'b' + "c""#;
        let items = lex(input);
        assert_eq!(items[0].token, Token::Str);
        assert_eq!(items[0].span.str_from_source(input), r"'a\'b'");
        assert_eq!(items[1].token, Token::Plus);
        assert_eq!(items[2].span.str_from_source(input), "\"c\"");
    }

    #[test]
    fn test_mismatched_quote_does_not_close() {
        assert_eq!(
            tokens(r#""abc'"#),
            vec![Token::UnterminatedString, Token::Eof]
        );
    }

    #[test]
    fn test_spans_are_byte_offsets() {
        let items = lex("é + 1");
        assert_eq!(items[0].token, Token::Identifier);
        assert_eq!(items[0].span, Span::new(0, 2));
        assert_eq!(items[2].span, Span::new(5, 6));
        assert_eq!(items[3].span, Span::empty(6));
    }
}
