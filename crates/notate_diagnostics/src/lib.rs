//! Notate Diagnostics
//!
//! 统一的诊断系统：词法、语法、转移表与求值错误都转换为 [`Diagnostic`]，
//! 由 [`Emitter`] 输出，带源码时标注出错位置。
//!
//! # 核心类型
//!
//! - [`Diagnostic`] - 诊断信息主体
//! - [`DiagnosticLevel`] - 诊断级别（Error/Warning）
//! - [`DiagnosticSink`] - 会话提示的收集器
//! - [`Emitter`] - 诊断输出器
//! - [`Span`] - 源码位置信息
//!
//! # 示例
//!
//! ```rust
//! use notate_diagnostics::{Diagnostic, Emitter};
//!
//! let diag = Diagnostic::error("invalid expression: unexpected '+'")
//!     .code("syntax")
//!     .span(2..3)
//!     .with_note("expected one of: digit, '('")
//!     .suggest("remove the extra operator");
//!
//! let text = Emitter::without_colors().render_with_source(&diag, "1++2").unwrap();
//! assert!(text.contains("unexpected '+'"));
//! ```

pub mod diagnostic;
pub mod emitter;
pub mod level;
pub mod sink;
pub mod span;

// 重新导出核心类型
pub use diagnostic::{Diagnostic, Suggestion};
pub use emitter::Emitter;
pub use level::DiagnosticLevel;
pub use sink::DiagnosticSink;
pub use span::{Span, SpanExt};
