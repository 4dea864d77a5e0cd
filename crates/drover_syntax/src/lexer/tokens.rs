//! Token vocabulary produced by the lexer.

use crate::ast::Span;
use drover_core::lang::builtins::BuiltinFn;
use drover_core::lang::keywords::KeywordId;
use drover_core::lang::operators::OperatorId;
use drover_core::lang::punctuation::PunctuationId;
use drover_core::lang::{builtins, keywords, operators, punctuation};

/// The kind of a lexed token.
///
/// Newlines are significant in the grammar and become real tokens; the lexer
/// preserves every one (blank lines are absorbed by the parser). Characters
/// the lexer does not recognize become [`TokenKind::Invalid`] so the parser
/// can report them with statement-level recovery instead of aborting the lex.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Keyword(KeywordId),
    Operator(OperatorId),
    Punctuation(PunctuationId),
    Builtin(BuiltinFn),
    Ident(String),
    /// Numeric literal. Drover has a single numeric type.
    Number(f64),
    /// Single- or double-quoted string, escapes already processed.
    Str(String),
    /// Triple-backtick raw string, taken verbatim (may span lines).
    TripleStr(String),
    /// `{{name}}` or `{{last}}` interpolation marker.
    Placeholder(String),
    /// A full `##` metadata line; the raw text after the marker.
    MetadataLine(String),
    Newline,
    Invalid(char),
    Eof,
}

impl TokenKind {
    /// Short human-readable description for diagnostics.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Keyword(k) => format!("keyword `{}`", keywords::as_str(*k)),
            TokenKind::Operator(op) => format!("`{}`", operators::as_str(*op)),
            TokenKind::Punctuation(p) => format!("`{}`", punctuation::as_str(*p)),
            TokenKind::Builtin(b) => format!("builtin `{}`", builtins::as_str(*b)),
            TokenKind::Ident(name) => format!("identifier `{}`", name),
            TokenKind::Number(n) => format!("number `{}`", n),
            TokenKind::Str(_) => "string literal".to_string(),
            TokenKind::TripleStr(_) => "raw string literal".to_string(),
            TokenKind::Placeholder(name) => format!("placeholder `{{{{{}}}}}`", name),
            TokenKind::MetadataLine(_) => "metadata line".to_string(),
            TokenKind::Newline => "end of line".to_string(),
            TokenKind::Invalid(c) => format!("character `{}`", c),
            TokenKind::Eof => "end of file".to_string(),
        }
    }
}

/// A token with its byte span in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// The source text covered by this token's span, for diagnostics.
    pub fn lexeme<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.span.start..self.span.end).unwrap_or("")
    }
}
