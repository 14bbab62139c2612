//! Notate Syntax
//!
//! 表达式前端：记号、词法分析、文法与转移表、移进归约校验器。
//!
//! ```rust
//! use notate_syntax::{tokens, TransitionTable, Validator};
//!
//! let table = TransitionTable::generate().unwrap();
//! let lexemes = Validator::new(&table).validate("(1+2)*3").unwrap();
//! assert_eq!(notate_syntax::render(&tokens(&lexemes)), "( 1 + 2 ) * 3");
//! ```

pub mod error;
pub mod grammar;
pub mod lexer;
pub mod stack;
pub mod table;
pub mod token;
pub mod validator;

pub use error::{LexError, ParseError, ParseResult, SyntaxError, TableError};
pub use grammar::{NonTerminal, Production, Terminal, PRODUCTIONS};
pub use lexer::{tokenize, tokens, Lexeme, Lexer};
pub use stack::{EmptyStackError, Stack};
pub use table::{Action, TransitionTable};
pub use token::{render, BinaryOp, Token};
pub use validator::Validator;
