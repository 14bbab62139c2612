//! Syntax Error Types
//!
//! 三类错误严格区分：
//! - [`LexError`]：输入里出现了字母表之外的字符（用户输入错误）
//! - [`SyntaxError`]：记号序列不符合文法（用户输入错误）
//! - [`TableError`]：转移表本身缺失或损坏（配置错误，与用户输入无关）

use crate::grammar::{NonTerminal, Terminal};
use crate::table::Action;
use notate_diagnostics::{Diagnostic, Span, Suggestion};
use thiserror::Error;

/// 词法错误
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    /// 字母表之外的字符
    #[error("invalid character '{ch}'")]
    InvalidCharacter { ch: char, span: Span },

    /// 数字串超出 u64 范围
    #[error("integer literal '{literal}' does not fit in 64 bits")]
    IntegerTooLarge { literal: String, span: Span },

    /// `UMINUS` 不在 `( UMINUS <operand> )` 形式中
    #[error("'UMINUS' must be written as '( UMINUS <operand> )'")]
    UnaryMinusForm { span: Span },
}

impl LexError {
    pub fn span(&self) -> &Span {
        match self {
            LexError::InvalidCharacter { span, .. }
            | LexError::IntegerTooLarge { span, .. }
            | LexError::UnaryMinusForm { span } => span,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.to_string())
            .code("invalid-character")
            .span(self.span().clone());
        match self {
            LexError::InvalidCharacter { .. } => diag
                .label("not part of an expression")
                .with_note("allowed: digits, whitespace, + - * / % ^ ( ) and the keyword UMINUS"),
            LexError::IntegerTooLarge { .. } => diag
                .label("literal too large")
                .with_note(format!("the largest literal is {}", u64::MAX)),
            LexError::UnaryMinusForm { .. } => diag.label("misplaced keyword").with_suggestion(
                Suggestion::new("unary minus is a parenthesized prefix operator")
                    .with_replacement("( UMINUS 5 )"),
            ),
        }
    }
}

/// 语法错误
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyntaxError {
    /// 当前状态下该输入没有 action
    #[error("invalid expression: unexpected {found}")]
    InvalidExpression {
        found: String,
        span: Span,
        expected: Vec<String>,
    },

    /// 转移表中根本没有这个符号的列
    #[error("invalid character '{symbol}' in expression")]
    InvalidCharacter { symbol: String, span: Span },

    /// 两个整数之间只有空白
    #[error("invalid expression: operands must be separated by an operator")]
    AdjacentOperands { span: Span },

    /// 转换时发现括号不配对（位置为记号下标）
    #[error("unbalanced parentheses at token {position}")]
    UnbalancedParen { position: usize },
}

impl SyntaxError {
    pub fn span(&self) -> Option<&Span> {
        match self {
            SyntaxError::InvalidExpression { span, .. }
            | SyntaxError::InvalidCharacter { span, .. }
            | SyntaxError::AdjacentOperands { span } => Some(span),
            SyntaxError::UnbalancedParen { .. } => None,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.to_string()).code("syntax");
        if let Some(span) = self.span() {
            diag = diag.span(span.clone());
        }
        match self {
            SyntaxError::InvalidExpression { found, expected, .. } => {
                diag = diag.label(format!("unexpected {}", found));
                if !expected.is_empty() {
                    diag = diag.with_note(format!("expected one of: {}", expected.join(", ")));
                }
                diag
            }
            SyntaxError::InvalidCharacter { symbol, .. } => diag
                .label("no column in the transition table")
                .with_note(format!("the expression grammar has no production using '{}'", symbol)),
            SyntaxError::AdjacentOperands { .. } => diag
                .label("second operand")
                .suggest("insert an operator between the two numbers"),
            SyntaxError::UnbalancedParen { .. } => diag,
        }
    }
}

/// 转移表配置错误
#[derive(Debug, Error)]
pub enum TableError {
    #[error("cannot read transition table: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed transition table: {0}")]
    Csv(#[from] csv::Error),

    #[error("transition table is empty")]
    Empty,

    #[error("the first column of the transition table must be 'state', found '{found}'")]
    MissingStateColumn { found: String },

    #[error("unknown column '{name}' in transition table")]
    UnknownColumn { name: String },

    #[error("column '{name}' appears twice in transition table")]
    DuplicateColumn { name: String },

    #[error("row {row} of the transition table is labelled '{found}'")]
    StateOutOfOrder { row: usize, found: String },

    #[error("invalid action '{cell}' at state {state}, column '{column}'")]
    InvalidAction {
        state: usize,
        column: String,
        cell: String,
    },

    #[error("invalid goto '{cell}' at state {state}, column '{column}'")]
    InvalidGoto {
        state: usize,
        column: String,
        cell: String,
    },

    #[error("state {state}, column '{column}' targets state {target}, but only {states} states exist")]
    TargetOutOfRange {
        state: usize,
        column: String,
        target: usize,
        states: usize,
    },

    #[error("state {state}, column '{column}' reduces by unknown production {production}")]
    UnknownProduction {
        state: usize,
        column: String,
        production: usize,
    },

    #[error("transition table has no 'acc' entry")]
    NoAccept,

    #[error("no goto entry for state {state} on {nonterminal}")]
    MissingGoto {
        state: usize,
        nonterminal: NonTerminal,
    },

    #[error("reducing by production {production} pops past the bottom of the state stack")]
    StackUnderflow { production: usize },

    #[error("transition table reduces forever at state {state}")]
    ReduceLoop { state: usize },

    #[error("grammar conflict at state {state} on '{terminal}': {existing} vs {incoming}")]
    Conflict {
        state: usize,
        terminal: Terminal,
        existing: Action,
        incoming: Action,
    },
}

impl TableError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.to_string())
            .code("configuration")
            .with_note("this is a problem with the transition table, not with the expression")
            .suggest("regenerate the table with `notate table`")
    }
}

/// 校验器的统一错误
#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Table(#[from] TableError),
}

/// 校验结果类型
pub type ParseResult<T> = Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lex_error_diagnostic() {
        let err = LexError::InvalidCharacter { ch: '#', span: 1..2 };
        let diag = err.to_diagnostic();

        assert_eq!(diag.message, "invalid character '#'");
        assert_eq!(diag.code, Some("invalid-character"));
        assert_eq!(diag.span, Some(1..2));
    }

    #[test]
    fn test_syntax_error_lists_expected() {
        let err = SyntaxError::InvalidExpression {
            found: "'+'".to_string(),
            span: 2..3,
            expected: vec!["'('".to_string(), "digit".to_string()],
        };
        let diag = err.to_diagnostic();

        assert_eq!(diag.message, "invalid expression: unexpected '+'");
        assert_eq!(diag.notes, vec!["expected one of: '(', digit".to_string()]);
    }

    #[test]
    fn test_table_error_is_configuration() {
        let diag = TableError::MissingGoto {
            state: 3,
            nonterminal: NonTerminal::F,
        }
        .to_diagnostic();

        assert_eq!(diag.code, Some("configuration"));
        assert_eq!(diag.message, "no goto entry for state 3 on F");
    }
}
