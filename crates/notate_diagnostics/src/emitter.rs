//! Emitter - 诊断输出器
//!
//! 负责将诊断信息格式化输出到 stderr；带源码时使用 ariadne 标注位置

use crate::diagnostic::Diagnostic;
use crate::span::Span;
use ariadne::{Color, Config, Label, Report, Source};
use colored::*;
use std::io;

/// 诊断输出器
pub struct Emitter {
    /// 是否使用颜色
    use_colors: bool,
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}

impl Emitter {
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    /// 创建无颜色的输出器
    pub fn without_colors() -> Self {
        Self { use_colors: false }
    }

    /// 输出单个诊断（无源码）
    pub fn emit(&self, diagnostic: &Diagnostic) {
        eprint!("{}", self.render(diagnostic));
    }

    /// 输出所有诊断
    pub fn emit_all(&self, diagnostics: &[Diagnostic]) {
        for diagnostic in diagnostics {
            self.emit(diagnostic);
            eprintln!();
        }
    }

    /// 结合源码输出诊断；没有位置信息时退回到普通格式
    pub fn emit_with_source(&self, diagnostic: &Diagnostic, source: &str) -> io::Result<()> {
        match &diagnostic.span {
            Some(span) => self.build_report(diagnostic, span, source).eprint(Source::from(source)),
            None => {
                self.emit(diagnostic);
                Ok(())
            }
        }
    }

    /// 与 `emit_with_source` 相同，但写入字符串
    pub fn render_with_source(&self, diagnostic: &Diagnostic, source: &str) -> io::Result<String> {
        match &diagnostic.span {
            Some(span) => {
                let mut buf = Vec::new();
                self.build_report(diagnostic, span, source)
                    .write(Source::from(source), &mut buf)?;
                Ok(String::from_utf8_lossy(&buf).into_owned())
            }
            None => Ok(self.render(diagnostic)),
        }
    }

    /// 渲染为文本（无源码）
    pub fn render(&self, diagnostic: &Diagnostic) -> String {
        if self.use_colors {
            self.render_colored(diagnostic)
        } else {
            self.render_plain(diagnostic)
        }
    }

    fn build_report(&self, diagnostic: &Diagnostic, span: &Span, source: &str) -> Report<'static, Span> {
        let span = visible_span(span, source.len());
        let mut label = Label::new(span.clone()).with_color(Color::Red);
        if let Some(text) = &diagnostic.label {
            label = label.with_message(text);
        }

        let mut builder = Report::<Span>::build(diagnostic.level.report_kind(), (), span.start)
            .with_config(Config::default().with_color(self.use_colors))
            .with_message(&diagnostic.message)
            .with_label(label);
        if let Some(code) = diagnostic.code {
            builder = builder.with_code(code);
        }
        for note in &diagnostic.notes {
            builder = builder.with_note(note);
        }
        for suggestion in &diagnostic.suggestions {
            match &suggestion.replacement {
                Some(replacement) => {
                    builder = builder.with_help(format!("{} (try: {})", suggestion.message, replacement))
                }
                None => builder = builder.with_help(&suggestion.message),
            }
        }
        builder.finish()
    }

    fn render_colored(&self, diagnostic: &Diagnostic) -> String {
        let mut out = String::new();
        let head = match diagnostic.code {
            Some(code) => format!("{}[{}]", diagnostic.level.colored_name(), code),
            None => diagnostic.level.colored_name().to_string(),
        };
        out.push_str(&format!("{}: {}\n", head, diagnostic.message.bold()));

        if let Some(span) = &diagnostic.span {
            out.push_str(&format!("  {} {:?}\n", "-->".blue().bold(), span));
        }
        for note in &diagnostic.notes {
            out.push_str(&format!(
                "  {} {}\n",
                "=".blue().bold(),
                format!("note: {}", note).bright_black()
            ));
        }
        for suggestion in &diagnostic.suggestions {
            out.push_str(&format!(
                "  {} {}\n",
                "=".green().bold(),
                format!("help: {}", suggestion.message).green()
            ));
            if let Some(replacement) = &suggestion.replacement {
                out.push_str(&format!("        try: {}\n", replacement.green().italic()));
            }
        }
        out
    }

    fn render_plain(&self, diagnostic: &Diagnostic) -> String {
        let mut out = format!("{}\n", diagnostic.headline());

        if let Some(span) = &diagnostic.span {
            out.push_str(&format!("  --> {:?}\n", span));
        }
        for note in &diagnostic.notes {
            out.push_str(&format!("  = note: {}\n", note));
        }
        for suggestion in &diagnostic.suggestions {
            out.push_str(&format!("  = help: {}\n", suggestion.message));
            if let Some(replacement) = &suggestion.replacement {
                out.push_str(&format!("        try: {}\n", replacement));
            }
        }
        out
    }
}

/// ariadne 无法显示零宽标签：把空 Span 扩展到一个字符（末尾时向前取）
fn visible_span(span: &Span, len: usize) -> Span {
    if !span.is_empty() || len == 0 {
        return span.clone();
    }
    if span.start < len {
        span.start..span.start + 1
    } else {
        len - 1..len
    }
}
