use std::fmt;

use derive_more::Display;

use crate::token::Token;

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralNode {
    Null,
    Bool(bool),
    Integer(i64),
    Floating(f64),
    Str(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum UnaryOp {
    #[display("-")]
    Minus,
    #[display("+")]
    Plus,
    #[display("!")]
    Not,
}

impl UnaryOp {
    pub fn from_token(token: Token) -> Option<Self> {
        match token {
            Token::Minus => Some(Self::Minus),
            Token::Plus => Some(Self::Plus),
            Token::Bang => Some(Self::Not),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum BinaryOp {
    #[display("+")]
    Add,
    #[display("-")]
    Subtract,
    #[display("*")]
    Multiply,
    #[display("/")]
    Divide,
    #[display("<")]
    Less,
    #[display("<=")]
    LessEqual,
    #[display(">")]
    Greater,
    #[display(">=")]
    GreaterEqual,
    #[display("===")]
    StrictEqual,
    #[display("==")]
    LooseEqual,
    #[display("!==")]
    StrictNotEqual,
    #[display("!=")]
    LooseNotEqual,
    #[display("&&")]
    And,
    #[display("||")]
    Or,
}

impl BinaryOp {
    pub fn from_token(token: Token) -> Option<Self> {
        let op = match token {
            Token::Plus => Self::Add,
            Token::Minus => Self::Subtract,
            Token::Star => Self::Multiply,
            Token::Slash => Self::Divide,
            Token::Less => Self::Less,
            Token::LessEqual => Self::LessEqual,
            Token::Greater => Self::Greater,
            Token::GreaterEqual => Self::GreaterEqual,
            Token::EqualEqualEqual => Self::StrictEqual,
            Token::EqualEqual => Self::LooseEqual,
            Token::BangEqualEqual => Self::StrictNotEqual,
            Token::BangEqual => Self::LooseNotEqual,
            Token::And => Self::And,
            Token::Or => Self::Or,
            _ => return None,
        };
        Some(op)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryOpNode {
    pub op: UnaryOp,
    pub operand: Box<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOpNode {
    pub lhs: Box<Node>,
    pub op: BinaryOp,
    pub rhs: Box<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TernaryNode {
    pub cond: Box<Node>,
    pub then_branch: Box<Node>,
    pub else_branch: Box<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FnCallNode {
    pub callee: String,
    pub args: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Literal(LiteralNode),
    Identifier(String),
    ArrayLiteral(Vec<Node>),
    Unary(UnaryOpNode),
    Binary(BinaryOpNode),
    Ternary(TernaryNode),
    Call(FnCallNode),
}

impl Node {
    pub fn unary(op: UnaryOp, operand: Node) -> Self {
        Node::Unary(UnaryOpNode {
            op,
            operand: Box::new(operand),
        })
    }

    pub fn binary(lhs: Node, op: BinaryOp, rhs: Node) -> Self {
        Node::Binary(BinaryOpNode {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
        })
    }

    pub fn ternary(cond: Node, then_branch: Node, else_branch: Node) -> Self {
        Node::Ternary(TernaryNode {
            cond: Box::new(cond),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        })
    }
}

fn write_comma_list(f: &mut fmt::Formatter<'_>, nodes: &[Node]) -> fmt::Result {
    if let Some((last, rest)) = nodes.split_last() {
        for node in rest {
            write!(f, "{}, ", node)?;
        }
        write!(f, "{}", last)?;
    }
    Ok(())
}

impl fmt::Display for LiteralNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralNode::Null => write!(f, "null"),
            LiteralNode::Bool(v) => write!(f, "{}", v),
            LiteralNode::Integer(v) => write!(f, "{}", v),
            LiteralNode::Floating(v) => write!(f, "{:?}", v),
            LiteralNode::Str(v) => write!(f, "{:?}", v),
        }
    }
}

/// Prints the tree fully parenthesized, e.g. `1 + 2 * 3` as `(1 + (2 * 3))`.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Literal(v) => write!(f, "{}", v),
            Node::Identifier(name) => write!(f, "{}", name),
            Node::ArrayLiteral(elements) => {
                write!(f, "[")?;
                write_comma_list(f, elements)?;
                write!(f, "]")
            }
            Node::Unary(UnaryOpNode { op, operand }) => write!(f, "({}{})", op, operand),
            Node::Binary(BinaryOpNode { lhs, op, rhs }) => write!(f, "({} {} {})", lhs, op, rhs),
            Node::Ternary(TernaryNode {
                cond,
                then_branch,
                else_branch,
            }) => write!(f, "({} ? {} : {})", cond, then_branch, else_branch),
            Node::Call(FnCallNode { callee, args }) => {
                write!(f, "{}(", callee)?;
                write_comma_list(f, args)?;
                write!(f, ")")
            }
        }
    }
}
