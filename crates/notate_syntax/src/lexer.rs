//! Lexer - 带位置信息的词法分析
//!
//! 在 logos 生成的状态机外包一层：补全错误位置，并检查 `UMINUS`
//! 只出现在 `( UMINUS <operand> )` 形式中。校验器按需逐个拉取记号，
//! 独立的 [`tokenize`] 则一次性扫描全部输入，两者共用同一套规则。

use crate::error::LexError;
use crate::token::{LexErrorKind, Token};
use logos::{Logos, SpannedIter};
use notate_diagnostics::Span;

/// 记号及其在源码中的字节范围
#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme {
    pub token: Token,
    pub span: Span,
}

/// 逐个产生 [`Lexeme`] 的迭代器
pub struct Lexer<'src> {
    source: &'src str,
    inner: SpannedIter<'src, Token>,
    previous: Option<Token>,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            inner: Token::lexer(source).spanned(),
            previous: None,
        }
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    fn convert_error(&self, kind: LexErrorKind, span: Span) -> LexError {
        let text = &self.source[span.clone()];
        match kind {
            LexErrorKind::IntegerTooLarge => LexError::IntegerTooLarge {
                literal: text.to_string(),
                span,
            },
            LexErrorKind::InvalidCharacter => {
                let ch = text.chars().next().unwrap_or('\u{fffd}');
                let width = ch.len_utf8();
                LexError::InvalidCharacter {
                    ch,
                    span: span.start..span.start + width,
                }
            }
        }
    }

    /// `UMINUS` 前面必须是 `(`，后面必须跟空白
    fn check_unary_minus(&self, span: &Span) -> Result<(), LexError> {
        let after_paren = self.previous == Some(Token::LeftParen);
        let spaced = self.source[span.end..]
            .chars()
            .next()
            .is_some_and(char::is_whitespace);
        if after_paren && spaced {
            Ok(())
        } else {
            Err(LexError::UnaryMinusForm { span: span.clone() })
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Lexeme, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        let (result, span) = self.inner.next()?;
        let lexeme = match result {
            Ok(token) => {
                if token == Token::UnaryMinus {
                    if let Err(err) = self.check_unary_minus(&span) {
                        return Some(Err(err));
                    }
                }
                self.previous = Some(token);
                Lexeme { token, span }
            }
            Err(kind) => return Some(Err(self.convert_error(kind, span))),
        };
        Some(Ok(lexeme))
    }
}

/// 一次性扫描整个表达式（不做文法校验）
pub fn tokenize(source: &str) -> Result<Vec<Lexeme>, LexError> {
    Lexer::new(source).collect()
}

/// 只保留记号本身
pub fn tokens(lexemes: &[Lexeme]) -> Vec<Token> {
    lexemes.iter().map(|l| l.token).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::BinaryOp;

    fn kinds(source: &str) -> Vec<Token> {
        tokens(&tokenize(source).unwrap())
    }

    #[test]
    fn test_multi_digit_integer_is_one_token() {
        assert_eq!(
            kinds("12+3"),
            vec![
                Token::Integer(12),
                Token::Operator(BinaryOp::Add),
                Token::Integer(3)
            ]
        );
    }

    #[test]
    fn test_whitespace_splits_digit_runs() {
        assert_eq!(kinds("12 3"), vec![Token::Integer(12), Token::Integer(3)]);
        assert_eq!(kinds("  7\t"), vec![Token::Integer(7)]);
        assert!(kinds("   ").is_empty());
    }

    #[test]
    fn test_spans() {
        let lexemes = tokenize(" 45 *6").unwrap();
        assert_eq!(lexemes[0].span, 1..3);
        assert_eq!(lexemes[1].span, 4..5);
        assert_eq!(lexemes[2].span, 5..6);
    }

    #[test]
    fn test_unary_minus_form() {
        assert_eq!(
            kinds("( UMINUS 5 )+3"),
            vec![
                Token::LeftParen,
                Token::UnaryMinus,
                Token::Integer(5),
                Token::RightParen,
                Token::Operator(BinaryOp::Add),
                Token::Integer(3),
            ]
        );
        assert_eq!(kinds("(UMINUS 5)").len(), 4);
    }

    #[test]
    fn test_unary_minus_outside_parens() {
        let err = tokenize("UMINUS 5").unwrap_err();
        assert_eq!(err, LexError::UnaryMinusForm { span: 0..6 });

        let err = tokenize("1+UMINUS 5").unwrap_err();
        assert!(matches!(err, LexError::UnaryMinusForm { .. }));
    }

    #[test]
    fn test_unary_minus_needs_trailing_space() {
        let err = tokenize("(UMINUS5)").unwrap_err();
        assert_eq!(err, LexError::UnaryMinusForm { span: 1..7 });

        assert!(tokenize("(UMINUS").is_err());
    }

    #[test]
    fn test_invalid_character() {
        let err = tokenize("1#2").unwrap_err();
        assert_eq!(err, LexError::InvalidCharacter { ch: '#', span: 1..2 });

        let err = tokenize("2x").unwrap_err();
        assert!(matches!(err, LexError::InvalidCharacter { ch: 'x', .. }));
    }

    #[test]
    fn test_integer_too_large() {
        let err = tokenize("1+18446744073709551616").unwrap_err();
        assert_eq!(
            err,
            LexError::IntegerTooLarge {
                literal: "18446744073709551616".to_string(),
                span: 2..22,
            }
        );
        assert_eq!(kinds("18446744073709551615"), vec![Token::Integer(u64::MAX)]);
    }
}
