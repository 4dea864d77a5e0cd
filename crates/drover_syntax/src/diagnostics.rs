//! Diagnostics and error reporting for the Drover frontend.
//!
//! Syntax and lexical errors are **collected**, not thrown: one parse call
//! reports every independent defect it can find, ordered by position.
//! Rendering offers two paths: a plain-text renderer with source context, and
//! a [`miette`] adapter for fancy terminal reports.

use crate::ast::Span;
use miette::{NamedSource, SourceSpan};
use thiserror::Error;

/// Severity of a collected diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Recoverable at statement granularity.
    Error,
    /// Stops the parse of the whole source unit (unterminated string,
    /// unterminated block, mixed script kinds).
    Fatal,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "syntax error"),
            Severity::Fatal => write!(f, "fatal syntax error"),
        }
    }
}

/// A syntax/lexical error with location information.
///
/// `lexeme` holds the offending token text when one exists (it is `None` for
/// e.g. end-of-file conditions).
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{severity}: {message}")]
pub struct Diagnostic {
    pub message: String,
    pub span: Span,
    pub severity: Severity,
    pub lexeme: Option<String>,
    pub notes: Vec<String>,
    pub hints: Vec<String>,
}

impl Diagnostic {
    pub fn syntax(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            severity: Severity::Error,
            lexeme: None,
            notes: Vec::new(),
            hints: Vec::new(),
        }
    }

    pub fn fatal(message: impl Into<String>, span: Span) -> Self {
        Self {
            severity: Severity::Fatal,
            ..Self::syntax(message, span)
        }
    }

    /// Escalate to [`Severity::Fatal`].
    pub fn into_fatal(mut self) -> Self {
        self.severity = Severity::Fatal;
        self
    }

    pub fn with_lexeme(mut self, lexeme: impl Into<String>) -> Self {
        self.lexeme = Some(lexeme.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }

    /// 1-based line/column of the diagnostic within `source`.
    pub fn position(&self, source: &str) -> Position {
        let (line, column, _) = line_info(source, self.span.start);
        Position { line, column }
    }

    /// Convert into a [`miette::Report`] carrying the named source buffer and
    /// a labeled span, for fancy terminal display.
    pub fn into_report(self, source_name: &str, source: &str) -> miette::Report {
        let len = self.span.end.saturating_sub(self.span.start).max(1);
        let pointer = match &self.lexeme {
            Some(lexeme) => format!("unexpected `{}`", lexeme),
            None => "here".to_string(),
        };
        let help = if self.hints.is_empty() {
            None
        } else {
            Some(self.hints.join("\n"))
        };
        miette::Report::new(LabeledSyntaxError {
            message: self.message,
            src: NamedSource::new(source_name, source.to_string()),
            at: (self.span.start, len).into(),
            pointer,
            help,
        })
    }
}

/// miette-facing shape of a [`Diagnostic`].
#[derive(Debug, Error, miette::Diagnostic)]
#[error("{message}")]
struct LabeledSyntaxError {
    message: String,
    #[source_code]
    src: NamedSource<String>,
    #[label("{pointer}")]
    at: SourceSpan,
    pointer: String,
    #[help]
    help: Option<String>,
}

/// 1-based source position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

/// Render a diagnostic as plain text with the offending source line and a
/// caret, suitable for logs and tests.
pub fn render(source_name: &str, source: &str, diagnostic: &Diagnostic) -> String {
    let (line, column, line_text) = line_info(source, diagnostic.span.start);
    let mut out = String::new();
    out.push_str(&format!("{}: {}\n", diagnostic.severity, diagnostic.message));
    out.push_str(&format!("  --> {}:{}:{}\n", source_name, line, column));
    out.push_str(&format!("   | {}\n", line_text));
    let underline = diagnostic
        .span
        .end
        .saturating_sub(diagnostic.span.start)
        .clamp(1, line_text.len().saturating_sub(column - 1).max(1));
    out.push_str(&format!("   | {}{}\n", " ".repeat(column - 1), "^".repeat(underline)));
    for note in &diagnostic.notes {
        out.push_str(&format!("   = note: {}\n", note));
    }
    for hint in &diagnostic.hints {
        out.push_str(&format!("   = hint: {}\n", hint));
    }
    out
}

/// Line number, column number, and line text for a byte offset.
fn line_info(source: &str, offset: usize) -> (usize, usize, &str) {
    let offset = offset.min(source.len());
    let mut line_num = 1;
    let mut line_start = 0;

    for (i, c) in source.char_indices() {
        if i >= offset {
            break;
        }
        if c == '\n' {
            line_num += 1;
            line_start = i + 1;
        }
    }

    let line_end = source[line_start..]
        .find('\n')
        .map(|i| line_start + i)
        .unwrap_or(source.len());

    (line_num, offset - line_start + 1, &source[line_start..line_end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_info() {
        let source = "set a = 1\nset b = 2\nset c = 3";

        let (line, col, text) = line_info(source, 0);
        assert_eq!((line, col), (1, 1));
        assert_eq!(text, "set a = 1");

        let (line, col, text) = line_info(source, 10);
        assert_eq!((line, col), (2, 1));
        assert_eq!(text, "set b = 2");

        let (line, col, text) = line_info(source, 14);
        assert_eq!((line, col), (2, 5));
        assert_eq!(text, "set b = 2");
    }

    #[test]
    fn test_position() {
        let source = "func f\nreturn !\nendfunc";
        let d = Diagnostic::syntax("unexpected character '!'", Span::new(14, 15));
        let pos = d.position(source);
        assert_eq!(pos, Position { line: 2, column: 8 });
    }

    #[test]
    fn test_render_includes_caret_and_hint() {
        let source = "ask\n";
        let d = Diagnostic::syntax("Expected an expression after 'ask'", Span::new(0, 3))
            .with_lexeme("ask")
            .with_hint("write the question as an expression, e.g. ask \"proceed?\"");
        let out = render("script.drv", source, &d);
        assert!(out.contains("script.drv:1:1"));
        assert!(out.contains("^^^"));
        assert!(out.contains("hint:"));
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Error.to_string(), "syntax error");
        assert_eq!(Severity::Fatal.to_string(), "fatal syntax error");
    }
}
