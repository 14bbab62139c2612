//! InfixConverter - 中缀转后缀/前缀
//!
//! 后缀：经典的运算符栈算法。`(` 作为栈中哨兵（优先级最低，不会被运算符弹出），
//! 遇到 `)` 时弹出直到 `(`。
//!
//! 前缀：先镜像（反转并交换括号），在镜像序列上求后缀，再反转结果。
//! 镜像序列中运算符的左右顺序颠倒，所以这一遍使用互换后的结合性，
//! 保证 `8-3-2` 的前缀与后缀求值一致。

use crate::error::EvalError;
use crate::operators::{Associativity, OperatorTable};
use notate_syntax::{Stack, SyntaxError, Token};

/// 求后缀时的扫描方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// 原始中缀序列
    Forward,
    /// 镜像后的序列，结合性互换
    Mirrored,
}

/// 反转记号序列并交换左右括号
pub fn mirror(tokens: &[Token]) -> Vec<Token> {
    tokens.iter().rev().map(|t| t.mirrored()).collect()
}

/// 中缀转换器
#[derive(Debug, Clone, Copy)]
pub struct InfixConverter<'o> {
    operators: &'o OperatorTable,
}

impl<'o> InfixConverter<'o> {
    pub fn new(operators: &'o OperatorTable) -> Self {
        Self { operators }
    }

    pub fn to_postfix(&self, tokens: &[Token]) -> Result<Vec<Token>, EvalError> {
        let postfix = self.postfix_pass(tokens, Direction::Forward)?;
        log::debug!("postfix: {}", notate_syntax::render(&postfix));
        Ok(postfix)
    }

    pub fn to_prefix(&self, tokens: &[Token]) -> Result<Vec<Token>, EvalError> {
        let mut prefix = self.postfix_pass(&mirror(tokens), Direction::Mirrored)?;
        prefix.reverse();
        log::debug!("prefix: {}", notate_syntax::render(&prefix));
        Ok(prefix)
    }

    /// 运算符栈算法本体
    pub fn postfix_pass(
        &self,
        tokens: &[Token],
        direction: Direction,
    ) -> Result<Vec<Token>, EvalError> {
        let mut stack: Stack<Token> = Stack::new();
        let mut output = Vec::with_capacity(tokens.len());

        for (position, token) in tokens.iter().copied().enumerate() {
            match token {
                Token::Integer(_) => output.push(token),
                Token::LeftParen => stack.push(token),
                Token::RightParen => loop {
                    match stack.pop() {
                        Ok(Token::LeftParen) => break,
                        Ok(top) => output.push(top),
                        Err(_) => return Err(SyntaxError::UnbalancedParen { position }.into()),
                    }
                },
                Token::Operator(_) | Token::UnaryMinus => {
                    let symbol = self.symbol_of(token)?;
                    let precedence = self.operators.precedence(symbol)?;
                    let associativity = match direction {
                        Direction::Forward => self.operators.associativity(symbol)?,
                        Direction::Mirrored => self.operators.associativity(symbol)?.flipped(),
                    };

                    while let Ok(top) = stack.peek() {
                        let top_precedence = self.operators.precedence(self.symbol_of(*top)?)?;
                        if !should_pop(precedence, top_precedence, associativity) {
                            break;
                        }
                        output.push(stack.pop()?);
                    }
                    stack.push(token);
                }
            }
        }

        while let Ok(top) = stack.pop() {
            if top == Token::LeftParen {
                return Err(SyntaxError::UnbalancedParen {
                    position: tokens.len(),
                }
                .into());
            }
            output.push(top);
        }
        Ok(output)
    }

    fn symbol_of(&self, token: Token) -> Result<&'static str, EvalError> {
        token.symbol().ok_or_else(|| EvalError::UnknownOperator {
            symbol: token.to_string(),
        })
    }
}

/// 新运算符入栈前是否先弹出栈顶
///
/// 左结合：`<=`，相同优先级从左到右；右结合：`<`
fn should_pop(incoming: u8, top: u8, associativity: Associativity) -> bool {
    match associativity {
        Associativity::Left => incoming <= top,
        Associativity::Right => incoming < top,
    }
}
