//! DiagnosticLevel - 诊断级别
//!
//! 错误终止本次处理；警告只是提示，处理照常进行（例如关闭了文法校验）。

use colored::{ColoredString, Colorize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticLevel {
    Error,
    Warning,
}

impl DiagnosticLevel {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }

    /// 终端里的级别标签
    pub fn colored_name(&self) -> ColoredString {
        let name = self.name().bold();
        match self {
            Self::Error => name.red(),
            Self::Warning => name.yellow(),
        }
    }

    /// 带源码输出时 ariadne 使用的报告类型
    pub fn report_kind(&self) -> ariadne::ReportKind<'static> {
        match self {
            Self::Error => ariadne::ReportKind::Error,
            Self::Warning => ariadne::ReportKind::Warning,
        }
    }
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
