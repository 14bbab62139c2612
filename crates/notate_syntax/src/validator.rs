//! Validator - 表驱动的移进归约校验器
//!
//! 扫描指针与状态栈属于同一台状态机：记号在扫描指针第一次到达时才由
//! [`Lexer`] 识别，被多字符记号覆盖的字节不会再次参与识别。
//! 整数记号在文法里逐位移进（`N -> N D`），其余记号各占一个输入符号。
//! 接受时返回经过文法确认的记号序列。

use crate::error::{ParseResult, SyntaxError, TableError};
use crate::grammar::{self, Terminal, PRODUCTIONS};
use crate::lexer::{Lexeme, Lexer};
use crate::stack::Stack;
use crate::table::{Action, TransitionTable};
use crate::token::{BinaryOp, Token};
use notate_diagnostics::{Span, SpanExt};

/// 当前输入符号
#[derive(Debug, Clone)]
struct Lookahead {
    /// `None` 表示该记号在转移表中没有对应的列
    terminal: Option<Terminal>,
    text: String,
    span: Span,
}

impl Lookahead {
    fn describe(&self) -> String {
        match self.terminal {
            Some(Terminal::End) => "end of input".to_string(),
            _ => format!("'{}'", self.text),
        }
    }
}

/// 非整数记号对应的终结符
fn terminal_of(token: Token) -> Option<Terminal> {
    match token {
        Token::Operator(BinaryOp::Add) => Some(Terminal::Plus),
        Token::Operator(BinaryOp::Sub) => Some(Terminal::Minus),
        Token::Operator(BinaryOp::Mul) => Some(Terminal::Star),
        Token::Operator(BinaryOp::Div) => Some(Terminal::Slash),
        Token::Operator(BinaryOp::Mod) => Some(Terminal::Percent),
        Token::Operator(BinaryOp::Pow) => None,
        Token::LeftParen => Some(Terminal::LParen),
        Token::RightParen => Some(Terminal::RParen),
        Token::UnaryMinus => Some(Terminal::UMinus),
        Token::Integer(_) => None,
    }
}

/// 扫描指针：惰性识别记号，并把整数拆成逐位的终结符
struct Scanner<'src> {
    lexer: Lexer<'src>,
    tokens: Vec<Lexeme>,
    /// 扫描指针所在记号在 `tokens` 中的下标；`None` 表示需要识别下一个记号
    current: Option<usize>,
    /// 整数记号内下一个待移进数字的偏移
    digit: usize,
    exhausted: bool,
}

impl<'src> Scanner<'src> {
    fn new(source: &'src str) -> Self {
        Self {
            lexer: Lexer::new(source),
            tokens: Vec::new(),
            current: None,
            digit: 0,
            exhausted: false,
        }
    }

    fn pull(&mut self) -> ParseResult<()> {
        let Some(next) = self.lexer.next() else {
            self.exhausted = true;
            return Ok(());
        };
        let lexeme = next?;
        if let (Token::Integer(_), Some(previous)) = (lexeme.token, self.tokens.last()) {
            if previous.token.is_operand() {
                return Err(SyntaxError::AdjacentOperands { span: lexeme.span }.into());
            }
        }
        self.tokens.push(lexeme);
        self.current = Some(self.tokens.len() - 1);
        Ok(())
    }

    fn current(&mut self) -> ParseResult<Lookahead> {
        if self.current.is_none() && !self.exhausted {
            self.pull()?;
        }

        let source = self.lexer.source();
        let Some(index) = self.current else {
            return Ok(Lookahead {
                terminal: Some(Terminal::End),
                text: "$".to_string(),
                span: Span::point(source.len()),
            });
        };

        let lexeme = &self.tokens[index];
        match lexeme.token {
            Token::Integer(_) => {
                let at = lexeme.span.start + self.digit;
                let byte = source.as_bytes()[at];
                Ok(Lookahead {
                    terminal: Some(Terminal::Digit(byte - b'0')),
                    text: (byte as char).to_string(),
                    span: Span::new(at, at + 1),
                })
            }
            token => Ok(Lookahead {
                terminal: terminal_of(token),
                text: token.to_string(),
                span: lexeme.span.clone(),
            }),
        }
    }

    /// 前进一个输入符号
    fn advance(&mut self) {
        let Some(index) = self.current else {
            return;
        };
        let lexeme = &self.tokens[index];
        if lexeme.token.is_operand() {
            self.digit += 1;
            if self.digit < lexeme.span.len() {
                return;
            }
        }
        self.digit = 0;
        self.current = None;
    }

    fn finish(self) -> Vec<Lexeme> {
        self.tokens
    }
}

/// 移进归约校验器；每次调用使用自己的状态栈，可在多个调用方之间共享
#[derive(Debug, Clone, Copy)]
pub struct Validator<'t> {
    table: &'t TransitionTable,
}

impl<'t> Validator<'t> {
    pub fn new(table: &'t TransitionTable) -> Self {
        Self { table }
    }

    /// 校验表达式，接受时返回记号序列
    pub fn validate(&self, source: &str) -> ParseResult<Vec<Lexeme>> {
        let mut scanner = Scanner::new(source);
        let mut states: Stack<usize> = Stack::new();
        states.push(0);

        // 合法的表在两次移进之间最多连续归约有限次
        let reduce_limit = self.table.state_count() * (PRODUCTIONS.len() + 1);
        let mut reduces = 0;

        loop {
            let state = *states
                .peek()
                .map_err(|_| TableError::StackUnderflow { production: 0 })?;
            let lookahead = scanner.current()?;

            let terminal = match lookahead.terminal {
                Some(terminal) if self.table.has_column(terminal) => terminal,
                _ => {
                    return Err(SyntaxError::InvalidCharacter {
                        symbol: lookahead.text,
                        span: lookahead.span,
                    }
                    .into())
                }
            };

            let Some(action) = self.table.action(state, terminal) else {
                return Err(self.unexpected(state, lookahead).into());
            };
            log::trace!("state {} on {}: {}", state, terminal, action);

            match action {
                Action::Accept => {
                    let tokens = scanner.finish();
                    log::debug!("accepted {} tokens", tokens.len());
                    return Ok(tokens);
                }
                Action::Shift(next) => {
                    states.push(next);
                    scanner.advance();
                    reduces = 0;
                }
                Action::Reduce(index) => {
                    let production = grammar::production(index).ok_or_else(|| {
                        TableError::UnknownProduction {
                            state,
                            column: terminal.to_string(),
                            production: index,
                        }
                    })?;
                    for _ in production.rhs {
                        states
                            .pop()
                            .map_err(|_| TableError::StackUnderflow { production: index })?;
                    }
                    let top = *states
                        .peek()
                        .map_err(|_| TableError::StackUnderflow { production: index })?;
                    let next = self.table.goto(top, production.lhs).ok_or(
                        TableError::MissingGoto {
                            state: top,
                            nonterminal: production.lhs,
                        },
                    )?;
                    states.push(next);

                    reduces += 1;
                    if reduces > reduce_limit {
                        return Err(TableError::ReduceLoop { state: next }.into());
                    }
                }
            }
        }
    }

    fn unexpected(&self, state: usize, lookahead: Lookahead) -> SyntaxError {
        let mut expected: Vec<String> = Vec::new();
        for terminal in self.table.expected(state) {
            let name = match terminal {
                Terminal::Digit(_) => "digit".to_string(),
                Terminal::End => "end of input".to_string(),
                other => format!("'{}'", other),
            };
            if !expected.contains(&name) {
                expected.push(name);
            }
        }
        SyntaxError::InvalidExpression {
            found: lookahead.describe(),
            span: lookahead.span,
            expected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{LexError, ParseError};
    use crate::grammar::NonTerminal;
    use crate::lexer::tokens;

    fn validate(source: &str) -> ParseResult<Vec<Token>> {
        let table = TransitionTable::generate().unwrap();
        Validator::new(&table)
            .validate(source)
            .map(|lexemes| tokens(&lexemes))
    }

    #[test]
    fn test_accepts_well_formed_expressions() {
        for source in [
            "1",
            "1+2*3",
            "(1+2)*3",
            "8-3-2",
            "12 + 3",
            "( UMINUS 5 )+3",
            "(UMINUS (UMINUS 7))",
            "((4))%3/2",
            " 100 * ( 2 - 1 ) ",
        ] {
            assert!(validate(source).is_ok(), "rejected {:?}", source);
        }
    }

    #[test]
    fn test_returns_collapsed_tokens() {
        assert_eq!(
            validate("12+3").unwrap(),
            vec![
                Token::Integer(12),
                Token::Operator(BinaryOp::Add),
                Token::Integer(3),
            ]
        );
    }

    #[test]
    fn test_double_operator_is_syntax_error() {
        let err = validate("1++2").unwrap_err();
        match err {
            ParseError::Syntax(SyntaxError::InvalidExpression {
                found,
                span,
                expected,
            }) => {
                assert_eq!(found, "'+'");
                assert_eq!(span, 2..3);
                assert!(expected.contains(&"digit".to_string()));
                assert!(expected.contains(&"'('".to_string()));
            }
            other => panic!("expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_character_reported_by_lexer() {
        let err = validate("1#2").unwrap_err();
        assert!(matches!(
            err,
            ParseError::Lex(LexError::InvalidCharacter { ch: '#', .. })
        ));
    }

    #[test]
    fn test_syntax_error_found_before_later_invalid_character() {
        // 记号惰性识别：'#' 还没被扫描到，先报语法错误
        let err = validate("1++#").unwrap_err();
        assert!(matches!(err, ParseError::Syntax(_)));
    }

    #[test]
    fn test_power_has_no_column() {
        let err = validate("2^3").unwrap_err();
        match err {
            ParseError::Syntax(SyntaxError::InvalidCharacter { symbol, span }) => {
                assert_eq!(symbol, "^");
                assert_eq!(span, 1..2);
            }
            other => panic!("expected invalid character, got {:?}", other),
        }
    }

    #[test]
    fn test_unbalanced_and_truncated_input() {
        for source in ["(1+2", "1+2)", "", "1+", "()", "( UMINUS )"] {
            assert!(
                matches!(validate(source), Err(ParseError::Syntax(_))),
                "accepted {:?}",
                source
            );
        }
    }

    #[test]
    fn test_end_of_input_description() {
        let err = validate("1+").unwrap_err();
        match err {
            ParseError::Syntax(SyntaxError::InvalidExpression { found, span, .. }) => {
                assert_eq!(found, "end of input");
                assert_eq!(span, 2..2);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_adjacent_integers_rejected() {
        let err = validate("12 3").unwrap_err();
        assert!(matches!(
            err,
            ParseError::Syntax(SyntaxError::AdjacentOperands { span }) if span == (3..4)
        ));
    }

    #[test]
    fn test_missing_goto_is_configuration_error() {
        // 只能移进 '1'，归约 D -> 1 后没有 goto
        let table =
            TransitionTable::from_csv("state,1,$\n0,s1,acc\n1,r14,r14\n".as_bytes()).unwrap();
        let err = Validator::new(&table).validate("1").unwrap_err();
        assert!(matches!(
            err,
            ParseError::Table(TableError::MissingGoto {
                state: 0,
                nonterminal: NonTerminal::D
            })
        ));
    }

    #[test]
    fn test_underflow_is_configuration_error() {
        // 在初始状态按 E -> E + T 归约，弹出的状态比栈里的多
        let table = TransitionTable::from_csv("state,1,$\n0,r1,acc\n".as_bytes()).unwrap();
        let err = Validator::new(&table).validate("1").unwrap_err();
        assert!(matches!(
            err,
            ParseError::Table(TableError::StackUnderflow { production: 1 })
        ));
    }

    #[test]
    fn test_reduce_cycle_is_configuration_error() {
        // 按 E -> T 归约后 goto 回到状态 1，又遇到同一个归约
        let table =
            TransitionTable::from_csv("state,1,$,E\n0,s1,,1\n1,r3,acc,\n".as_bytes()).unwrap();
        let err = Validator::new(&table).validate("11").unwrap_err();
        assert!(matches!(err, ParseError::Table(TableError::ReduceLoop { .. })));
    }
}
