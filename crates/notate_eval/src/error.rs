//! Evaluation Error Types

use notate_diagnostics::Diagnostic;
use notate_syntax::{EmptyStackError, SyntaxError};
use thiserror::Error;

/// 转换与求值错误
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// 运算符表中没有该符号（记号与运算符表不一致，属于内部错误）
    #[error("unknown operator '{symbol}'")]
    UnknownOperator { symbol: String },

    #[error("division by zero in '{symbol}'")]
    DivisionByZero { symbol: String },

    #[error(transparent)]
    EmptyStack(#[from] EmptyStackError),

    /// 求值结束时栈中不止一个值
    #[error("malformed expression: {remaining} values left on the stack")]
    LeftoverOperands { remaining: usize },

    #[error("operator '{symbol}' takes {expected} operand(s), got {found}")]
    ArityMismatch {
        symbol: String,
        expected: usize,
        found: usize,
    },

    /// 括号出现在后缀/前缀序列中
    #[error("unexpected parenthesis at token {position}")]
    UnexpectedParen { position: usize },

    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

impl EvalError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            EvalError::Syntax(err) => err.to_diagnostic(),
            EvalError::DivisionByZero { .. } => Diagnostic::error(self.to_string())
                .code("division-by-zero")
                .with_note("the right operand of '/' and '%' must be non-zero"),
            EvalError::EmptyStack(_) | EvalError::LeftoverOperands { .. } => {
                Diagnostic::error(self.to_string())
                    .code("empty-stack")
                    .with_note("the expression is malformed; validate it before evaluating")
            }
            EvalError::UnknownOperator { .. } | EvalError::ArityMismatch { .. } => {
                Diagnostic::error(self.to_string())
                    .code("unknown-operator")
                    .with_note("the operator table does not match the tokenizer")
            }
            EvalError::UnexpectedParen { .. } => Diagnostic::error(self.to_string())
                .code("syntax")
                .with_note("parentheses only appear in infix expressions"),
        }
    }
}
