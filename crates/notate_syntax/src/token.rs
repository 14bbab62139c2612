//! Token - 词法单元
//!
//! 表达式只包含五类记号：整数、二元运算符、左右括号与一元负号关键字 `UMINUS`。
//! 记号一经产生便不可变，并按源码从左到右的顺序传递。

use logos::Logos;
use std::fmt;

/// 二元运算符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

impl BinaryOp {
    pub const ALL: [BinaryOp; 6] = [
        BinaryOp::Add,
        BinaryOp::Sub,
        BinaryOp::Mul,
        BinaryOp::Div,
        BinaryOp::Mod,
        BinaryOp::Pow,
    ];

    /// 源码中的符号
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Pow => "^",
        }
    }
}

/// logos 的错误类别，由 [`crate::lexer::Lexer`] 补全位置后转换为 `LexError`
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LexErrorKind {
    #[default]
    InvalidCharacter,
    IntegerTooLarge,
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(error = LexErrorKind)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    /// 连续的十进制数字（贪婪匹配）
    #[regex("[0-9]+", |lex| lex.slice().parse::<u64>().map_err(|_| LexErrorKind::IntegerTooLarge))]
    Integer(u64),

    #[token("+", |_| BinaryOp::Add)]
    #[token("-", |_| BinaryOp::Sub)]
    #[token("*", |_| BinaryOp::Mul)]
    #[token("/", |_| BinaryOp::Div)]
    #[token("%", |_| BinaryOp::Mod)]
    #[token("^", |_| BinaryOp::Pow)]
    Operator(BinaryOp),

    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,

    /// 一元负号，只能写成 `( UMINUS <operand> )`
    #[token("UMINUS")]
    UnaryMinus,
}

impl Token {
    /// 运算符表中的键；整数没有符号
    pub fn symbol(&self) -> Option<&'static str> {
        match self {
            Token::Integer(_) => None,
            Token::Operator(op) => Some(op.symbol()),
            Token::LeftParen => Some("("),
            Token::RightParen => Some(")"),
            Token::UnaryMinus => Some("UMINUS"),
        }
    }

    pub fn is_operand(&self) -> bool {
        matches!(self, Token::Integer(_))
    }

    /// 括号互换，其余原样返回（前缀转换时使用）
    pub fn mirrored(self) -> Token {
        match self {
            Token::LeftParen => Token::RightParen,
            Token::RightParen => Token::LeftParen,
            other => other,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Integer(value) => write!(f, "{}", value),
            other => f.write_str(other.symbol().unwrap_or_default()),
        }
    }
}

/// 以单个空格连接记号：`1 2 3 * +`
pub fn render(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(Token::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
