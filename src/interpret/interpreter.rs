use std::cmp::Ordering;

use log::trace;

use super::context::Context;
use super::error::EvalError;
use super::number::Number;
use super::value::Value;
use crate::ast::*;

/// Walks a tree against a read-only [`Context`].
pub struct Interpreter<'cl> {
    context: &'cl Context,
}

impl<'cl> Interpreter<'cl> {
    pub fn new(context: &'cl Context) -> Self {
        Self { context }
    }

    pub fn interpret(&self, node: &Node) -> Result<Value, EvalError> {
        match node {
            Node::Literal(node) => Ok(interpret_literal(node)),
            Node::Identifier(name) => self.lookup(name),
            Node::ArrayLiteral(elements) => self.interpret_array_literal(elements),
            Node::Unary(node) => self.interpret_unary_op(node),
            Node::Binary(node) => self.interpret_binary_op(node),
            Node::Ternary(node) => self.interpret_ternary(node),
            Node::Call(node) => self.interpret_fn_call(node),
        }
    }

    fn lookup(&self, name: &str) -> Result<Value, EvalError> {
        self.context
            .get(name)
            .cloned()
            .ok_or_else(|| EvalError::UndefinedVariable(name.to_string()))
    }

    fn interpret_array_literal(&self, elements: &[Node]) -> Result<Value, EvalError> {
        let mut arr = Vec::with_capacity(elements.len());
        for node in elements {
            arr.push(self.interpret(node)?);
        }
        Ok(Value::Array(arr))
    }

    fn interpret_unary_op(&self, UnaryOpNode { op, operand }: &UnaryOpNode) -> Result<Value, EvalError> {
        let value = self.interpret(operand)?;
        match op {
            UnaryOp::Minus => Ok(Value::Number(-value.to_number()?)),
            UnaryOp::Plus => Ok(Value::Number(value.to_number()?)),
            UnaryOp::Not => Ok(Value::Bool(!value.is_truthy())),
        }
    }

    fn interpret_binary_op(
        &self,
        BinaryOpNode { lhs, op, rhs }: &BinaryOpNode,
    ) -> Result<Value, EvalError> {
        let lhs_val = self.interpret(lhs)?;

        // the right side of `&&` and `||` is only evaluated when needed
        match op {
            BinaryOp::And if !lhs_val.is_truthy() => return Ok(lhs_val),
            BinaryOp::Or if lhs_val.is_truthy() => return Ok(lhs_val),
            BinaryOp::And | BinaryOp::Or => return self.interpret(rhs),
            _ => {}
        }

        let rhs_val = self.interpret(rhs)?;

        match op {
            BinaryOp::Add => interpret_add(lhs_val, rhs_val),
            BinaryOp::Subtract | BinaryOp::Multiply | BinaryOp::Divide => {
                binary_number(&lhs_val, *op, &rhs_val)
            }
            BinaryOp::Less | BinaryOp::LessEqual | BinaryOp::Greater | BinaryOp::GreaterEqual => {
                interpret_ordering(&lhs_val, *op, &rhs_val)
            }
            BinaryOp::StrictEqual => Ok(Value::Bool(lhs_val.strict_eq(&rhs_val))),
            BinaryOp::StrictNotEqual => Ok(Value::Bool(!lhs_val.strict_eq(&rhs_val))),
            BinaryOp::LooseEqual => Ok(Value::Bool(lhs_val.loose_eq(&rhs_val))),
            BinaryOp::LooseNotEqual => Ok(Value::Bool(!lhs_val.loose_eq(&rhs_val))),
            BinaryOp::And | BinaryOp::Or => unreachable!("short-circuit operators handled above"),
        }
    }

    fn interpret_ternary(
        &self,
        TernaryNode {
            cond,
            then_branch,
            else_branch,
        }: &TernaryNode,
    ) -> Result<Value, EvalError> {
        if self.interpret(cond)?.is_truthy() {
            self.interpret(then_branch)
        } else {
            self.interpret(else_branch)
        }
    }

    fn interpret_fn_call(&self, FnCallNode { callee, args }: &FnCallNode) -> Result<Value, EvalError> {
        let function = match self.context.get(callee) {
            Some(Value::Callable(function)) => function,
            Some(value) => return Err(EvalError::ValueNotCallable(callee.clone(), value.clone())),
            None => return Err(EvalError::UndefinedFunction(callee.clone())),
        };

        let args = args
            .iter()
            .map(|node| self.interpret(node))
            .collect::<Result<Vec<_>, _>>()?;

        trace!("CALL: {}({:?})", callee, args);
        let result = function.call(args)?;
        trace!("RETURN: {} -> {:?}", callee, result);
        Ok(result)
    }
}

fn interpret_literal(node: &LiteralNode) -> Value {
    match node {
        LiteralNode::Null => Value::Null,
        LiteralNode::Bool(v) => Value::Bool(*v),
        LiteralNode::Integer(v) => Value::make_integer(*v),
        LiteralNode::Floating(v) => Value::make_floating(*v),
        LiteralNode::Str(v) => Value::Str(v.clone()),
    }
}

/// A string on either side turns `+` into concatenation.
fn interpret_add(lhs: Value, rhs: Value) -> Result<Value, EvalError> {
    match (&lhs, &rhs) {
        (Value::Str(_), _) | (_, Value::Str(_)) => Ok(Value::Str(format!("{}{}", lhs, rhs))),
        _ => Ok(Value::Number(lhs.to_number()? + rhs.to_number()?)),
    }
}

fn binary_number(lhs: &Value, op: BinaryOp, rhs: &Value) -> Result<Value, EvalError> {
    let l = lhs.to_number()?;
    let r = rhs.to_number()?;

    let v = match op {
        BinaryOp::Subtract => l - r,
        BinaryOp::Multiply => l * r,
        BinaryOp::Divide => {
            if r.is_zero() {
                return Err(EvalError::DivideByZero);
            }
            l.true_div(r)
        }
        _ => unreachable!("`{}` is not an arithmetic operator", op),
    };
    Ok(Value::Number(v))
}

fn interpret_ordering(lhs: &Value, op: BinaryOp, rhs: &Value) -> Result<Value, EvalError> {
    let l: Number = lhs.to_number()?;
    let r: Number = rhs.to_number()?;
    let ordering = l.partial_cmp(&r);
    let result = match op {
        BinaryOp::Less => ordering == Some(Ordering::Less),
        BinaryOp::LessEqual => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
        BinaryOp::Greater => ordering == Some(Ordering::Greater),
        BinaryOp::GreaterEqual => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
        _ => unreachable!("`{}` is not a comparison operator", op),
    };
    Ok(Value::Bool(result))
}
