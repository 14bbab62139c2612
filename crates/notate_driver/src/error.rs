//! Expression Errors
//!
//! 驱动层的错误类型，集成统一诊断系统

use notate_diagnostics::{Diagnostic, Emitter};
use notate_eval::EvalError;
use notate_syntax::{LexError, ParseError, SyntaxError, TableError};
use std::fmt;
use thiserror::Error;

/// 错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidCharacter,
    Syntax,
    UnknownOperator,
    DivisionByZero,
    EmptyStack,
    /// 转移表缺失或损坏
    Configuration,
    Io,
    /// 后缀与前缀结果不一致
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::InvalidCharacter => "invalid character",
            ErrorKind::Syntax => "syntax",
            ErrorKind::UnknownOperator => "unknown operator",
            ErrorKind::DivisionByZero => "division by zero",
            ErrorKind::EmptyStack => "empty stack",
            ErrorKind::Configuration => "configuration",
            ErrorKind::Io => "io",
            ErrorKind::Internal => "internal",
        };
        f.write_str(name)
    }
}

/// 表达式处理错误
#[derive(Debug, Error)]
pub enum ExprError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error("postfix value {postfix} disagrees with prefix value {prefix}")]
    Disagreement { postfix: f64, prefix: f64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ParseError> for ExprError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::Lex(err) => ExprError::Lex(err),
            ParseError::Syntax(err) => ExprError::Syntax(err),
            ParseError::Table(err) => ExprError::Table(err),
        }
    }
}

impl ExprError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExprError::Lex(_) => ErrorKind::InvalidCharacter,
            ExprError::Syntax(_) => ErrorKind::Syntax,
            ExprError::Table(_) => ErrorKind::Configuration,
            ExprError::Eval(err) => match err {
                EvalError::UnknownOperator { .. } | EvalError::ArityMismatch { .. } => {
                    ErrorKind::UnknownOperator
                }
                EvalError::DivisionByZero { .. } => ErrorKind::DivisionByZero,
                EvalError::EmptyStack(_) | EvalError::LeftoverOperands { .. } => {
                    ErrorKind::EmptyStack
                }
                EvalError::UnexpectedParen { .. } | EvalError::Syntax(_) => ErrorKind::Syntax,
            },
            ExprError::Disagreement { .. } => ErrorKind::Internal,
            ExprError::Io(_) => ErrorKind::Io,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ExprError::Lex(err) => err.to_diagnostic(),
            ExprError::Syntax(err) => err.to_diagnostic(),
            ExprError::Table(err) => err.to_diagnostic(),
            ExprError::Eval(err) => err.to_diagnostic(),
            ExprError::Disagreement { .. } => Diagnostic::error(self.to_string())
                .code("internal")
                .with_note("postfix and prefix evaluation must always agree"),
            ExprError::Io(_) => Diagnostic::error(self.to_string()),
        }
    }

    /// 使用统一诊断系统输出错误，有源码且有位置时标注出错位置
    pub fn emit(&self, emitter: &Emitter, source: Option<&str>) {
        let diag = self.to_diagnostic();
        let annotated = match source {
            Some(src) if diag.span.is_some() => emitter.emit_with_source(&diag, src).is_ok(),
            _ => false,
        };
        if !annotated {
            emitter.emit(&diag);
        }
    }
}

/// 处理结果类型
pub type ExprResult<T> = Result<T, ExprError>;
