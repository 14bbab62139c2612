//! ExpressionEvaluator - 后缀/前缀求值
//!
//! 两种记法共用同一套栈算法：前缀序列从右向左处理，
//! 二元运算时两次弹栈的左右顺序与后缀相反。

use crate::error::EvalError;
use crate::operators::{OperatorKind, OperatorTable};
use notate_syntax::{Stack, Token};
use std::fmt;

/// 记法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notation {
    Postfix,
    Prefix,
}

impl fmt::Display for Notation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notation::Postfix => f.write_str("Postfix"),
            Notation::Prefix => f.write_str("Prefix"),
        }
    }
}

/// 弹出二元运算的 `(left, right)`
///
/// 后缀：先弹出的是右操作数；前缀（反向处理）：先弹出的是左操作数
fn pop_operands(values: &mut Stack<f64>, notation: Notation) -> Result<(f64, f64), EvalError> {
    let first = values.pop()?;
    let second = values.pop()?;
    match notation {
        Notation::Postfix => Ok((second, first)),
        Notation::Prefix => Ok((first, second)),
    }
}

/// 求值器；每次调用使用自己的值栈
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'o> {
    operators: &'o OperatorTable,
}

impl<'o> Evaluator<'o> {
    pub fn new(operators: &'o OperatorTable) -> Self {
        Self { operators }
    }

    pub fn evaluate(&self, tokens: &[Token], notation: Notation) -> Result<f64, EvalError> {
        let ordered: Vec<(usize, Token)> = match notation {
            Notation::Postfix => tokens.iter().copied().enumerate().collect(),
            Notation::Prefix => tokens.iter().copied().enumerate().rev().collect(),
        };

        let mut values: Stack<f64> = Stack::new();
        for (position, token) in ordered {
            let symbol = match token {
                Token::Integer(value) => {
                    values.push(value as f64);
                    continue;
                }
                Token::LeftParen | Token::RightParen => {
                    return Err(EvalError::UnexpectedParen { position })
                }
                Token::Operator(op) => op.symbol(),
                Token::UnaryMinus => "UMINUS",
            };

            let result = match self.operators.lookup(symbol)?.kind {
                OperatorKind::Unary(_) => {
                    let operand = values.pop()?;
                    self.operators.apply(symbol, &[operand])?
                }
                OperatorKind::Binary { .. } => {
                    let (left, right) = pop_operands(&mut values, notation)?;
                    self.operators.apply(symbol, &[left, right])?
                }
                OperatorKind::Sentinel => return Err(EvalError::UnexpectedParen { position }),
            };
            log::trace!("{} {} -> {}", notation, symbol, result);
            values.push(result);
        }

        let result = values.pop()?;
        if !values.is_empty() {
            return Err(EvalError::LeftoverOperands {
                remaining: values.len() + 1,
            });
        }
        Ok(result)
    }
}
