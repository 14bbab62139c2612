//! Grammar - 固定的表达式文法
//!
//! ```text
//!  1- 3  E -> E + T | E - T | T
//!  4- 7  T -> T * F | T / F | T % F | F
//!  8-10  F -> ( E ) | ( UMINUS F ) | N
//! 11-12  N -> N D | D
//! 13-22  D -> 0 | 1 | ... | 9
//! ```
//!
//! 产生式编号从 1 开始，与转移表中 `r<p>` 的编号一致。
//! 数字是逐个字符的终结符，多位整数由 `N -> N D` 组合而成。

use std::fmt;

/// 终结符（转移表的 action 列）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Terminal {
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    LParen,
    RParen,
    UMinus,
    Digit(u8),
    /// 输入结束 `$`
    End,
}

impl Terminal {
    pub const COUNT: usize = 19;

    pub const ALL: [Terminal; Terminal::COUNT] = [
        Terminal::Plus,
        Terminal::Minus,
        Terminal::Star,
        Terminal::Slash,
        Terminal::Percent,
        Terminal::LParen,
        Terminal::RParen,
        Terminal::UMinus,
        Terminal::Digit(0),
        Terminal::Digit(1),
        Terminal::Digit(2),
        Terminal::Digit(3),
        Terminal::Digit(4),
        Terminal::Digit(5),
        Terminal::Digit(6),
        Terminal::Digit(7),
        Terminal::Digit(8),
        Terminal::Digit(9),
        Terminal::End,
    ];

    /// 在 action 行中的列下标
    pub fn index(&self) -> usize {
        match self {
            Terminal::Plus => 0,
            Terminal::Minus => 1,
            Terminal::Star => 2,
            Terminal::Slash => 3,
            Terminal::Percent => 4,
            Terminal::LParen => 5,
            Terminal::RParen => 6,
            Terminal::UMinus => 7,
            Terminal::Digit(d) => 8 + (*d as usize).min(9),
            Terminal::End => 18,
        }
    }

    /// 表格列名
    pub fn name(&self) -> &'static str {
        const DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];
        match self {
            Terminal::Plus => "+",
            Terminal::Minus => "-",
            Terminal::Star => "*",
            Terminal::Slash => "/",
            Terminal::Percent => "%",
            Terminal::LParen => "(",
            Terminal::RParen => ")",
            Terminal::UMinus => "UMINUS",
            Terminal::Digit(d) => DIGITS[(*d as usize).min(9)],
            Terminal::End => "$",
        }
    }

    pub fn from_name(name: &str) -> Option<Terminal> {
        Terminal::ALL.into_iter().find(|t| t.name() == name)
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 非终结符（转移表的 goto 列）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NonTerminal {
    E,
    T,
    F,
    N,
    D,
}

impl NonTerminal {
    pub const COUNT: usize = 5;

    pub const ALL: [NonTerminal; NonTerminal::COUNT] = [
        NonTerminal::E,
        NonTerminal::T,
        NonTerminal::F,
        NonTerminal::N,
        NonTerminal::D,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn name(&self) -> &'static str {
        match self {
            NonTerminal::E => "E",
            NonTerminal::T => "T",
            NonTerminal::F => "F",
            NonTerminal::N => "N",
            NonTerminal::D => "D",
        }
    }

    pub fn from_name(name: &str) -> Option<NonTerminal> {
        NonTerminal::ALL.into_iter().find(|n| n.name() == name)
    }
}

impl fmt::Display for NonTerminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 文法符号
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    Terminal(Terminal),
    NonTerminal(NonTerminal),
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Terminal(t) => t.fmt(f),
            Symbol::NonTerminal(n) => n.fmt(f),
        }
    }
}

/// 产生式 `lhs -> rhs`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Production {
    pub lhs: NonTerminal,
    pub rhs: &'static [Symbol],
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ->", self.lhs)?;
        for symbol in self.rhs {
            write!(f, " {}", symbol)?;
        }
        Ok(())
    }
}

use self::Symbol::{NonTerminal as Nt, Terminal as Tm};
use NonTerminal::{D, E, F, N, T};

/// 全部产生式，下标 0 对应编号 1
pub static PRODUCTIONS: [Production; 22] = [
    Production { lhs: E, rhs: &[Nt(E), Tm(Terminal::Plus), Nt(T)] },
    Production { lhs: E, rhs: &[Nt(E), Tm(Terminal::Minus), Nt(T)] },
    Production { lhs: E, rhs: &[Nt(T)] },
    Production { lhs: T, rhs: &[Nt(T), Tm(Terminal::Star), Nt(F)] },
    Production { lhs: T, rhs: &[Nt(T), Tm(Terminal::Slash), Nt(F)] },
    Production { lhs: T, rhs: &[Nt(T), Tm(Terminal::Percent), Nt(F)] },
    Production { lhs: T, rhs: &[Nt(F)] },
    Production { lhs: F, rhs: &[Tm(Terminal::LParen), Nt(E), Tm(Terminal::RParen)] },
    Production {
        lhs: F,
        rhs: &[Tm(Terminal::LParen), Tm(Terminal::UMinus), Nt(F), Tm(Terminal::RParen)],
    },
    Production { lhs: F, rhs: &[Nt(N)] },
    Production { lhs: N, rhs: &[Nt(N), Nt(D)] },
    Production { lhs: N, rhs: &[Nt(D)] },
    Production { lhs: D, rhs: &[Tm(Terminal::Digit(0))] },
    Production { lhs: D, rhs: &[Tm(Terminal::Digit(1))] },
    Production { lhs: D, rhs: &[Tm(Terminal::Digit(2))] },
    Production { lhs: D, rhs: &[Tm(Terminal::Digit(3))] },
    Production { lhs: D, rhs: &[Tm(Terminal::Digit(4))] },
    Production { lhs: D, rhs: &[Tm(Terminal::Digit(5))] },
    Production { lhs: D, rhs: &[Tm(Terminal::Digit(6))] },
    Production { lhs: D, rhs: &[Tm(Terminal::Digit(7))] },
    Production { lhs: D, rhs: &[Tm(Terminal::Digit(8))] },
    Production { lhs: D, rhs: &[Tm(Terminal::Digit(9))] },
];

/// 文法开始符号
pub const START: NonTerminal = NonTerminal::E;

/// 按编号（从 1 开始）取产生式
pub fn production(index: usize) -> Option<&'static Production> {
    index.checked_sub(1).and_then(|i| PRODUCTIONS.get(i))
}
