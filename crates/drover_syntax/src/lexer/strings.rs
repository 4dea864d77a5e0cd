//! String, raw string, and placeholder scanning for the Drover lexer.

use super::Lexer;
use super::tokens::TokenKind;
use crate::ast::Span;
use crate::diagnostics::Diagnostic;

/// Result of processing an escape sequence
enum EscapeResult {
    /// Successfully parsed escape character
    Char(char),
    /// Unknown escape - preserve as-is (backslash + char)
    Unknown(char),
    /// End of input during escape
    Eof,
}

impl<'a> Lexer<'a> {
    /// Process an escape sequence. Called after consuming the backslash.
    fn scan_escape(&mut self, quote: char) -> EscapeResult {
        match self.advance() {
            Some('n') => EscapeResult::Char('\n'),
            Some('t') => EscapeResult::Char('\t'),
            Some('r') => EscapeResult::Char('\r'),
            Some('\\') => EscapeResult::Char('\\'),
            Some(q) if q == quote => EscapeResult::Char(q),
            Some(c) => EscapeResult::Unknown(c),
            None => EscapeResult::Eof,
        }
    }

    /// Scan a quoted string literal. Called after the opening quote.
    ///
    /// Strings do not span lines; a newline before the closing quote is the
    /// same hard failure as end of input.
    pub(super) fn scan_string(&mut self, start: usize, quote: char) {
        let mut value = String::new();

        loop {
            match self.peek() {
                None | Some('\n') => {
                    self.push_error(Diagnostic::fatal(
                        "Unterminated string literal",
                        Span::new(start, self.current_pos),
                    ));
                    return;
                }
                Some('\\') => {
                    self.advance();
                    match self.scan_escape(quote) {
                        EscapeResult::Char(c) => value.push(c),
                        EscapeResult::Unknown(c) => {
                            value.push('\\');
                            value.push(c);
                        }
                        EscapeResult::Eof => {
                            self.push_error(Diagnostic::fatal(
                                "Unterminated string literal",
                                Span::new(start, self.current_pos),
                            ));
                            return;
                        }
                    }
                }
                Some(c) if c == quote => {
                    self.advance();
                    self.add_token(TokenKind::Str(value), start);
                    return;
                }
                Some(c) => {
                    value.push(c);
                    self.advance();
                }
            }
        }
    }

    /// Scan a triple-backtick raw string. Called after the first backtick.
    ///
    /// The body is taken verbatim (no escapes) until the matching closing
    /// triple, scanning across embedded newlines as one token. A lone or
    /// double backtick is not a string form in Drover.
    pub(super) fn scan_backtick(&mut self, start: usize) {
        if !(self.match_char('`') && self.match_char('`')) {
            self.add_token(TokenKind::Invalid('`'), start);
            return;
        }

        let body_start = self.current_pos;
        loop {
            match self.peek() {
                None => {
                    self.push_error(Diagnostic::fatal(
                        "Unterminated triple-backtick string",
                        Span::new(start, self.current_pos),
                    ));
                    return;
                }
                Some('`') if self.source_has_closing_triple() => {
                    let value = self.source_slice(body_start, self.current_pos);
                    self.advance();
                    self.advance();
                    self.advance();
                    self.add_token(TokenKind::TripleStr(value), start);
                    return;
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
    }

    fn source_has_closing_triple(&mut self) -> bool {
        self.peek() == Some('`')
            && self.peek_next() == Some('`')
            && self.peek_at(2) == Some('`')
    }

    /// Scan a `{{name}}` placeholder. Called after both opening braces.
    ///
    /// A malformed placeholder becomes an [`TokenKind::Invalid`] token so the
    /// parser recovers at statement granularity; only an unclosed `{{` at end
    /// of input is a hard lex failure.
    pub(super) fn scan_placeholder(&mut self, start: usize) {
        let name_start = self.current_pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                self.advance();
            } else {
                break;
            }
        }
        let name = self.source_slice(name_start, self.current_pos);

        if !name.is_empty() && self.match_char('}') && self.match_char('}') {
            self.add_token(TokenKind::Placeholder(name), start);
            return;
        }
        if self.peek().is_none() {
            self.push_error(Diagnostic::fatal(
                "Unterminated placeholder, expected `}}`",
                Span::new(start, self.current_pos),
            ));
            return;
        }
        self.add_token(TokenKind::Invalid('{'), start);
    }
}
