//! Diagnostic - 诊断信息
//!
//! 表示一次表达式处理失败（或警告）的完整描述

use crate::level::DiagnosticLevel;
use crate::span::Span;

/// 修复建议
#[derive(Debug, Clone)]
pub struct Suggestion {
    /// 建议消息
    pub message: String,
    /// 建议的替换写法（如果有）
    pub replacement: Option<String>,
}

impl Suggestion {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            replacement: None,
        }
    }

    /// 添加替换写法
    pub fn with_replacement(mut self, replacement: impl Into<String>) -> Self {
        self.replacement = Some(replacement.into());
        self
    }
}

/// 诊断信息
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// 诊断级别
    pub level: DiagnosticLevel,
    /// 错误类别（如 `syntax`、`division-by-zero`），输出为 `error[syntax]`
    pub code: Option<&'static str>,
    /// 主要消息
    pub message: String,
    /// 源码位置（可选）
    pub span: Option<Span>,
    /// 位置处的标签文字
    pub label: Option<String>,
    /// 补充注释
    pub notes: Vec<String>,
    /// 修复建议
    pub suggestions: Vec<Suggestion>,
}

impl Diagnostic {
    pub fn new(level: DiagnosticLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            code: None,
            message: message.into(),
            span: None,
            label: None,
            notes: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// 创建错误诊断
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Error, message)
    }

    /// 创建警告诊断
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Warning, message)
    }

    /// 设置错误类别
    pub fn code(mut self, code: &'static str) -> Self {
        self.code = Some(code);
        self
    }

    /// 设置位置信息
    pub fn span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// 设置位置标签
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// 添加注释
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// 添加建议
    pub fn with_suggestion(mut self, suggestion: Suggestion) -> Self {
        self.suggestions.push(suggestion);
        self
    }

    /// 添加简单建议（仅消息）
    pub fn suggest(self, message: impl Into<String>) -> Self {
        self.with_suggestion(Suggestion::new(message))
    }

    /// 标题行：`error[syntax]: message`
    pub fn headline(&self) -> String {
        match self.code {
            Some(code) => format!("{}[{}]: {}", self.level, code, self.message),
            None => format!("{}: {}", self.level, self.message),
        }
    }
}
