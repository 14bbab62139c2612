//! Expression - 带值的后缀/前缀表达式
//!
//! 构造时求值一次，之后记号与值都不可变。

use crate::error::EvalError;
use crate::evaluate::{Evaluator, Notation};
use crate::operators::OperatorTable;
use notate_syntax::{render, Token};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    tokens: Vec<Token>,
    notation: Notation,
    value: f64,
}

impl Expression {
    pub fn new(
        tokens: Vec<Token>,
        notation: Notation,
        operators: &OperatorTable,
    ) -> Result<Self, EvalError> {
        let value = Evaluator::new(operators).evaluate(&tokens, notation)?;
        // `( UMINUS 0 )` 得到 -0.0，显示为 0
        let value = if value == 0.0 { 0.0 } else { value };
        Ok(Self {
            tokens,
            notation,
            value,
        })
    }

    pub fn postfix(tokens: Vec<Token>, operators: &OperatorTable) -> Result<Self, EvalError> {
        Self::new(tokens, Notation::Postfix, operators)
    }

    pub fn prefix(tokens: Vec<Token>, operators: &OperatorTable) -> Result<Self, EvalError> {
        Self::new(tokens, Notation::Prefix, operators)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn notation(&self) -> Notation {
        self.notation
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// 空格分隔的记号序列
    pub fn render(&self) -> String {
        render(&self.tokens)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}(expr={}, value={})",
            self.notation,
            self.render(),
            self.value
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notate_syntax::BinaryOp;

    #[test]
    fn test_display() {
        let operators = OperatorTable::new();
        let tokens = vec![
            Token::Integer(1),
            Token::Integer(2),
            Token::Integer(3),
            Token::Operator(BinaryOp::Mul),
            Token::Operator(BinaryOp::Add),
        ];
        let expr = Expression::postfix(tokens, &operators).unwrap();

        assert_eq!(expr.value(), 7.0);
        assert_eq!(expr.notation(), Notation::Postfix);
        assert_eq!(expr.to_string(), "Postfix(expr=1 2 3 * +, value=7)");
    }

    #[test]
    fn test_prefix_display() {
        let operators = OperatorTable::new();
        let tokens = vec![
            Token::Operator(BinaryOp::Div),
            Token::Integer(7),
            Token::Integer(2),
        ];
        let expr = Expression::prefix(tokens, &operators).unwrap();

        assert_eq!(expr.to_string(), "Prefix(expr=/ 7 2, value=3.5)");
        assert_eq!(expr.tokens().len(), 3);
    }

    #[test]
    fn test_negated_zero_is_plain_zero() {
        let operators = OperatorTable::new();
        let expr = Expression::postfix(vec![Token::Integer(0), Token::UnaryMinus], &operators).unwrap();

        assert!(expr.value().is_sign_positive());
        assert_eq!(expr.to_string(), "Postfix(expr=0 UMINUS, value=0)");

        let expr = Expression::prefix(vec![Token::UnaryMinus, Token::Integer(0)], &operators).unwrap();
        assert_eq!(expr.to_string(), "Prefix(expr=UMINUS 0, value=0)");
    }

    #[test]
    fn test_construction_fails_on_bad_value() {
        let operators = OperatorTable::new();
        let tokens = vec![
            Token::Integer(1),
            Token::Integer(0),
            Token::Operator(BinaryOp::Mod),
        ];

        assert!(matches!(
            Expression::postfix(tokens, &operators),
            Err(EvalError::DivisionByZero { .. })
        ));
    }
}
