//! Notate Eval
//!
//! 运算符表、中缀到后缀/前缀的转换与两种记法的求值。
//!
//! ```rust
//! use notate_eval::{Evaluator, InfixConverter, Notation, OperatorTable};
//! use notate_syntax::{tokenize, tokens};
//!
//! let operators = OperatorTable::new();
//! let infix = tokens(&tokenize("8-3-2").unwrap());
//! let prefix = InfixConverter::new(&operators).to_prefix(&infix).unwrap();
//! let value = Evaluator::new(&operators).evaluate(&prefix, Notation::Prefix).unwrap();
//! assert_eq!(value, 3.0);
//! ```

pub mod convert;
pub mod error;
pub mod evaluate;
pub mod expression;
pub mod operators;

#[cfg(test)]
mod proptests;

pub use convert::{mirror, Direction, InfixConverter};
pub use error::EvalError;
pub use evaluate::{Evaluator, Notation};
pub use expression::Expression;
pub use operators::{Associativity, OperatorKind, OperatorSpec, OperatorTable};
