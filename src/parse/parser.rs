use crate::ast::*;

use super::error::ParseError;
use super::lex::LexItem;
use super::parse_context::ParseContext;

use crate::token::Token;

type BindingPower = u8;

const LOWEST: BindingPower = 0;
const TERNARY: BindingPower = 10;
const LOGICAL_OR: BindingPower = 20;
const LOGICAL_AND: BindingPower = 30;
const EQUALITY: BindingPower = 40;
const RELATIONAL: BindingPower = 50;
const ADDITIVE: BindingPower = 60;
const MULTIPLICATIVE: BindingPower = 70;
const PREFIX: BindingPower = 80;
const CALL: BindingPower = 90;

/// Builds a node from the token that starts an expression.
type PrefixRule = fn(&mut ParseContext, LexItem) -> Result<Node, ParseError>;

/// Extends an already parsed left node with the operator token and what follows it.
type InfixRule = fn(&mut ParseContext, Node, LexItem, BindingPower) -> Result<Node, ParseError>;

fn prefix_rule(token: Token) -> Option<PrefixRule> {
    let rule: PrefixRule = match token {
        Token::Integer | Token::Floating | Token::Str | Token::True | Token::False | Token::Null => {
            parse_literal
        }
        Token::Identifier => parse_identifier,
        Token::Minus | Token::Plus | Token::Bang => parse_unary,
        Token::LRoundParen => parse_group,
        Token::LSquareParen => parse_array_literal,
        _ => return None,
    };
    Some(rule)
}

fn infix_rule(token: Token) -> Option<(BindingPower, InfixRule)> {
    let binary: InfixRule = parse_binary;
    let rule = match token {
        Token::Question => (TERNARY, parse_ternary as InfixRule),
        Token::Or => (LOGICAL_OR, binary),
        Token::And => (LOGICAL_AND, binary),
        Token::EqualEqual | Token::BangEqual | Token::EqualEqualEqual | Token::BangEqualEqual => {
            (EQUALITY, binary)
        }
        Token::Less | Token::LessEqual | Token::Greater | Token::GreaterEqual => {
            (RELATIONAL, binary)
        }
        Token::Plus | Token::Minus => (ADDITIVE, binary),
        Token::Star | Token::Slash => (MULTIPLICATIVE, binary),
        Token::LRoundParen => (CALL, parse_fn_call as InfixRule),
        _ => return None,
    };
    Some(rule)
}

pub fn parse(input: &str, items: &[LexItem]) -> Result<Node, ParseError> {
    let mut state = ParseContext::new(input, items);
    let node = parse_expr(&mut state, LOWEST)?;
    match state.get_curr() {
        Err(_) => Ok(node),
        Ok(li) => Err(ParseError::Unfinished(li.token, li.span)),
    }
}

fn parse_expr(state: &mut ParseContext, min_bp: BindingPower) -> Result<Node, ParseError> {
    let li = state.get_curr()?;
    let Some(prefix) = prefix_rule(li.token) else {
        return Err(no_prefix_error(li));
    };
    state.advance();
    let mut lhs = prefix(state, li)?;

    while let Some(op) = state.peek_item() {
        let Some((bp, infix)) = infix_rule(op.token) else {
            break;
        };
        if bp <= min_bp {
            break;
        }
        state.advance();
        lhs = infix(state, lhs, op, bp)?;
    }

    Ok(lhs)
}

fn no_prefix_error(li: LexItem) -> ParseError {
    match li.token {
        Token::Unknown => ParseError::UnexpectedCharacter(li.span),
        Token::UnterminatedString => ParseError::UnclosedString(li.span.start),
        _ => ParseError::ExpectedExpression(li.token, li.span),
    }
}

fn parse_literal(state: &mut ParseContext, li: LexItem) -> Result<Node, ParseError> {
    let source = li.span.str_from_source(state.get_input());
    let literal = match li.token {
        Token::Null => LiteralNode::Null,
        Token::True => LiteralNode::Bool(true),
        Token::False => LiteralNode::Bool(false),
        Token::Integer => source
            .parse::<i64>()
            .map(LiteralNode::Integer)
            .map_err(|_| ParseError::ParseToNumber(li.span))?,
        Token::Floating => source
            .parse::<f64>()
            .map(LiteralNode::Floating)
            .map_err(|_| ParseError::ParseToNumber(li.span))?,
        // remove start and end quote
        Token::Str => LiteralNode::Str(unescape(&source[1..source.len() - 1])),
        _ => return Err(ParseError::ExpectedExpression(li.token, li.span)),
    };
    Ok(Node::Literal(literal))
}

/// A backslash keeps the character after it verbatim, which is how a string
/// embeds its own delimiter.
fn unescape(content: &str) -> String {
    let mut result = String::with_capacity(content.len());
    let mut chars = content.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => result.extend(chars.next()),
            _ => result.push(c),
        }
    }
    result
}

fn parse_identifier(state: &mut ParseContext, li: LexItem) -> Result<Node, ParseError> {
    Ok(Node::Identifier(li.span.string_from_source(state.get_input())))
}

fn parse_unary(state: &mut ParseContext, li: LexItem) -> Result<Node, ParseError> {
    let Some(op) = UnaryOp::from_token(li.token) else {
        return Err(ParseError::ExpectedExpression(li.token, li.span));
    };
    let operand = parse_expr(state, PREFIX)?;
    Ok(Node::unary(op, operand))
}

fn parse_group(state: &mut ParseContext, _: LexItem) -> Result<Node, ParseError> {
    let expr = parse_expr(state, LOWEST)?;
    state.consume_token(Token::RRoundParen)?;
    Ok(expr)
}

fn parse_array_literal(state: &mut ParseContext, _: LexItem) -> Result<Node, ParseError> {
    let elements = parse_comma_list(state, Token::RSquareParen)?;
    Ok(Node::ArrayLiteral(elements))
}

fn parse_binary(
    state: &mut ParseContext,
    lhs: Node,
    li: LexItem,
    bp: BindingPower,
) -> Result<Node, ParseError> {
    let Some(op) = BinaryOp::from_token(li.token) else {
        return Err(ParseError::UnexpectedToken(li.token, li.span, None));
    };
    // same power on the right keeps the operator left associative
    let rhs = parse_expr(state, bp)?;
    Ok(Node::binary(lhs, op, rhs))
}

fn parse_ternary(
    state: &mut ParseContext,
    cond: Node,
    _: LexItem,
    bp: BindingPower,
) -> Result<Node, ParseError> {
    let then_branch = parse_expr(state, LOWEST)?;
    state.consume_token(Token::Colon)?;
    // one below its own power so a chained ternary nests to the right
    let else_branch = parse_expr(state, bp - 1)?;
    Ok(Node::ternary(cond, then_branch, else_branch))
}

fn parse_fn_call(
    state: &mut ParseContext,
    callee: Node,
    li: LexItem,
    _: BindingPower,
) -> Result<Node, ParseError> {
    let Node::Identifier(callee) = callee else {
        return Err(ParseError::CallTargetNotIdentifier(li.span));
    };
    let args = parse_comma_list(state, Token::RRoundParen)?;
    Ok(Node::Call(FnCallNode { callee, args }))
}

/// Parses `expr, expr, ...` up to and including `right_paren`, the opening
/// delimiter having been consumed already. A trailing comma is accepted.
fn parse_comma_list(state: &mut ParseContext, right_paren: Token) -> Result<Vec<Node>, ParseError> {
    let mut result = Vec::new();
    let mut has_consumed_separator = true;

    while let Ok(li) = state.get_curr() {
        if li.token == right_paren {
            break;
        }

        if !has_consumed_separator {
            return Err(ParseError::UnexpectedToken(
                li.token,
                li.span,
                Some(Token::Comma),
            ));
        }

        result.push(parse_expr(state, LOWEST)?);
        has_consumed_separator = false;

        if state.peek(&[Token::Comma]) {
            state.advance();
            has_consumed_separator = true;
        }
    }

    state.consume_token(right_paren)?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::lex::lex;

    fn parse_str(input: &str) -> Result<Node, ParseError> {
        parse(input, &lex(input))
    }

    fn shape(input: &str) -> String {
        parse_str(input).unwrap().to_string()
    }

    #[test]
    fn test_precedence() {
        let test_cases = vec![
            ("1 + 2 * 3", "(1 + (2 * 3))"),
            ("2 * 3 + 1", "((2 * 3) + 1)"),
            ("(1 + 2) * 3", "((1 + 2) * 3)"),
            ("3 + 4 - 2", "((3 + 4) - 2)"),
            ("6 / 3 * 4", "((6 / 3) * 4)"),
            ("-1 + 3", "((-1) + 3)"),
            ("3 + -1", "(3 + (-1))"),
            ("!a && b", "((!a) && b)"),
            ("a || b && c", "(a || (b && c))"),
            ("true !== true || true", "((true !== true) || true)"),
            ("3 === 2 + 1", "(3 === (2 + 1))"),
            ("1 < 2 == true", "((1 < 2) == true)"),
            ("--1", "(-(-1))"),
        ];

        for (input, expected) in test_cases {
            assert_eq!(shape(input), expected, "input {input:?}");
        }
    }

    #[test]
    fn test_ternary_is_right_associative() {
        assert_eq!(shape("a ? b : c ? d : e"), "(a ? b : (c ? d : e))");
        assert_eq!(shape("a || b ? 1 + 2 : 3"), "((a || b) ? (1 + 2) : 3)");
        assert_eq!(shape("a ? b ? c : d : e"), "(a ? (b ? c : d) : e)");
    }

    #[test]
    fn test_group_is_unwrapped() {
        assert_eq!(parse_str("((1))").unwrap(), Node::Literal(LiteralNode::Integer(1)));
    }

    #[test]
    fn test_array_literal() {
        assert_eq!(parse_str("[]").unwrap(), Node::ArrayLiteral(vec![]));
        assert_eq!(shape("[1,]"), "[1]");
        assert_eq!(shape("[1, [2, 3], (4)]"), "[1, [2, 3], 4]");
    }

    #[test]
    fn test_call() {
        assert_eq!(shape("f()"), "f()");
        assert_eq!(shape("(f)(1)"), "f(1)");
        assert_eq!(shape("is_true(true, 1 + 2)"), "is_true(true, (1 + 2))");
        assert_eq!(shape("-f(1) * 2"), "((-f(1)) * 2)");
    }

    #[test]
    fn test_string_literals() {
        let test_cases = vec![
            (r#""\"""#, "\""),
            (r"'\''", "'"),
            (r#""with space""#, "with space"),
            (r#"'$var'"#, "$var"),
            (r#""it's""#, "it's"),
        ];

        for (input, expected) in test_cases {
            assert_eq!(
                parse_str(input).unwrap(),
                Node::Literal(LiteralNode::Str(expected.to_string())),
                "input {input:?}"
            );
        }
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            parse_str("?"),
            Err(ParseError::ExpectedExpression(Token::Question, _))
        ));
        assert!(matches!(parse_str(""), Err(ParseError::Eof(None))));
        assert!(matches!(parse_str("1 +"), Err(ParseError::Eof(None))));
        assert!(matches!(
            parse_str("(1 + 2"),
            Err(ParseError::Eof(Some(Token::RRoundParen)))
        ));
        assert!(matches!(
            parse_str("[1, 2"),
            Err(ParseError::Eof(Some(Token::RSquareParen)))
        ));
        assert!(matches!(
            parse_str("[1 2]"),
            Err(ParseError::UnexpectedToken(Token::Integer, _, Some(Token::Comma)))
        ));
        assert!(matches!(
            parse_str("a ? b"),
            Err(ParseError::Eof(Some(Token::Colon)))
        ));
        assert!(matches!(
            parse_str("a ? b , c"),
            Err(ParseError::UnexpectedToken(Token::Comma, _, Some(Token::Colon)))
        ));
        assert!(matches!(
            parse_str("1 2"),
            Err(ParseError::Unfinished(Token::Integer, _))
        ));
        assert!(matches!(
            parse_str("a = 1"),
            Err(ParseError::Unfinished(Token::Unknown, _))
        ));
        assert!(matches!(
            parse_str("1 + #"),
            Err(ParseError::UnexpectedCharacter(_))
        ));
        assert!(matches!(
            parse_str("'abc"),
            Err(ParseError::UnclosedString(0))
        ));
        assert!(matches!(
            parse_str("f(1)(2)"),
            Err(ParseError::CallTargetNotIdentifier(_))
        ));
        assert!(matches!(
            parse_str("1(2)"),
            Err(ParseError::CallTargetNotIdentifier(_))
        ));
        assert!(matches!(
            parse_str("99999999999999999999"),
            Err(ParseError::ParseToNumber(_))
        ));
    }
}
