use crate::token::Token;

use super::error::ParseError;
use super::lex::LexItem;

pub struct ParseContext<'a> {
    input: &'a str,
    items: &'a [LexItem],
    curr_pos: usize,
}

impl<'a> ParseContext<'a> {
    pub fn new(input: &'a str, items: &'a [LexItem]) -> Self {
        Self {
            input,
            items,
            curr_pos: 0,
        }
    }

    pub fn get_input(&self) -> &'a str {
        self.input
    }

    /// The item under the cursor. Once the items run out this keeps returning
    /// the trailing end-of-input item.
    pub fn peek_item(&self) -> Option<LexItem> {
        self.items
            .get(self.curr_pos)
            .or_else(|| self.items.last())
            .copied()
    }

    pub fn is_at_end(&self) -> bool {
        self.peek_item()
            .map(|li| li.token == Token::Eof)
            .unwrap_or(true)
    }

    pub fn advance(&mut self) {
        if self.curr_pos < self.items.len() {
            self.curr_pos += 1;
        }
    }

    pub fn peek(&self, match_tokens: &'static [Token]) -> bool {
        self.peek_item()
            .map(|li| match_tokens.contains(&li.token))
            .unwrap_or(false)
    }

    /// The item under the cursor, or [`ParseError::Eof`] at end of input.
    pub fn get_curr(&self) -> Result<LexItem, ParseError> {
        match self.peek_item() {
            Some(li) if li.token != Token::Eof => Ok(li),
            _ => Err(ParseError::Eof(None)),
        }
    }

    pub fn consume_token(&mut self, token: Token) -> Result<LexItem, ParseError> {
        if self.is_at_end() {
            return Err(ParseError::Eof(Some(token)));
        }
        let li = self.get_curr()?;
        if li.token != token {
            return Err(ParseError::UnexpectedToken(li.token, li.span, Some(token)));
        }
        self.advance();
        Ok(li)
    }
}
