//! Lexer for Drover source code.
//!
//! Converts source text into a token stream. Handles:
//! - Keywords, identifiers, and builtin callable names
//! - Numeric literals (one numeric type, `f64`)
//! - Quoted strings with escapes and triple-backtick raw strings
//! - `{{name}}` placeholders and `##` metadata lines
//! - Significant newlines (preserved, never collapsed)
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token)
//! - `strings` - Quoted string, raw string, and placeholder scanning
//! - `numbers` - Numeric literal scanning
//!
//! The lexer only fails hard on unterminated string-like constructs; any
//! other unexpected character becomes a [`TokenKind::Invalid`] token and is
//! reported by the parser during statement recovery.

mod numbers;
mod strings;
pub mod tokens;

pub use tokens::{Token, TokenKind};

use crate::ast::Span;
use crate::diagnostics::Diagnostic;
use drover_core::lang::operators::OperatorId;
use drover_core::lang::punctuation::PunctuationId;
use drover_core::lang::{builtins, keywords};

/// Lexer for Drover source code.
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
    /// True until the first non-whitespace token of the current line; gates
    /// the `##` metadata-line form.
    at_line_start: bool,
    tokens: Vec<Token>,
    errors: Vec<Diagnostic>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
            at_line_start: true,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Tokenize the entire source.
    ///
    /// Returns the token stream (always terminated by `Eof`) unless the
    /// source contains an unterminated string or raw string, which is the one
    /// unrecoverable lexical condition.
    pub fn tokenize(mut self) -> Result<Vec<Token>, Vec<Diagnostic>> {
        while !self.is_at_end() {
            self.scan_token();
        }

        self.tokens.push(Token::new(
            TokenKind::Eof,
            Span::new(self.current_pos, self.current_pos),
        ));

        if self.errors.is_empty() {
            Ok(self.tokens)
        } else {
            Err(self.errors)
        }
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    pub(super) fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    pub(super) fn peek_next(&self) -> Option<char> {
        self.peek_at(1)
    }

    /// Peek `n` characters past the current position without consuming.
    pub(super) fn peek_at(&self, n: usize) -> Option<char> {
        self.source[self.current_pos..].chars().nth(n)
    }

    pub(super) fn source_slice(&self, start: usize, end: usize) -> String {
        self.source[start..end].to_string()
    }

    pub(super) fn advance(&mut self) -> Option<char> {
        if let Some((pos, c)) = self.chars.next() {
            self.current_pos = pos + c.len_utf8();
            Some(c)
        } else {
            None
        }
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self) {
        // Skip whitespace (but not newlines)
        while let Some(c) = self.peek() {
            if c == ' ' || c == '\t' {
                self.advance();
            } else {
                break;
            }
        }

        let start = self.current_pos;
        let was_line_start = self.at_line_start;

        let Some(c) = self.advance() else {
            return;
        };

        // Every token but a newline leaves line-start state.
        self.at_line_start = false;

        match c {
            // Comments and metadata lines. `## key: value` at the start of a
            // line is structured metadata; everything else after `#` is noise.
            '#' => {
                if was_line_start && self.peek() == Some('#') {
                    self.advance();
                    self.scan_metadata_line(start);
                } else {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
            }

            '\n' => {
                self.add_token(TokenKind::Newline, start);
                self.at_line_start = true;
            }

            '\r' => {
                self.at_line_start = was_line_start;
            }

            // Operators and punctuation
            '+' => self.add_op(OperatorId::Plus, start),
            '-' => self.add_op(OperatorId::Minus, start),
            '*' => {
                if self.match_char('*') {
                    self.add_op(OperatorId::StarStar, start);
                } else {
                    self.add_op(OperatorId::Star, start);
                }
            }
            '/' => self.add_op(OperatorId::Slash, start),
            '%' => self.add_op(OperatorId::Percent, start),
            '|' => self.add_op(OperatorId::Pipe, start),
            '^' => self.add_op(OperatorId::Caret, start),
            '&' => self.add_op(OperatorId::Amp, start),
            '~' => self.add_op(OperatorId::Tilde, start),
            ',' => self.add_punct(PunctuationId::Comma, start),
            ':' => self.add_punct(PunctuationId::Colon, start),
            '.' => self.add_punct(PunctuationId::Dot, start),
            '(' => self.add_punct(PunctuationId::LParen, start),
            ')' => self.add_punct(PunctuationId::RParen, start),
            '[' => self.add_punct(PunctuationId::LBracket, start),
            ']' => self.add_punct(PunctuationId::RBracket, start),
            '}' => self.add_punct(PunctuationId::RBrace, start),
            '{' => {
                if self.peek() == Some('{') {
                    self.advance();
                    self.scan_placeholder(start);
                } else {
                    self.add_punct(PunctuationId::LBrace, start);
                }
            }
            '=' => {
                if self.match_char('=') {
                    self.add_op(OperatorId::EqEq, start);
                } else {
                    self.add_op(OperatorId::Assign, start);
                }
            }
            '!' => {
                if self.match_char('=') {
                    self.add_op(OperatorId::NotEq, start);
                } else {
                    self.add_token(TokenKind::Invalid('!'), start);
                }
            }
            '<' => {
                if self.match_char('=') {
                    self.add_op(OperatorId::LtEq, start);
                } else {
                    self.add_op(OperatorId::Lt, start);
                }
            }
            '>' => {
                if self.match_char('=') {
                    self.add_op(OperatorId::GtEq, start);
                } else {
                    self.add_op(OperatorId::Gt, start);
                }
            }

            // Strings
            '"' => self.scan_string(start, '"'),
            '\'' => self.scan_string(start, '\''),
            '`' => self.scan_backtick(start),

            // Numbers
            '0'..='9' => self.scan_number(start, c),

            // Identifiers, keywords, and builtin names
            _ if is_ident_start(c) => self.scan_identifier(start),

            // Carried through to the parser; not a lexical failure.
            _ => self.add_token(TokenKind::Invalid(c), start),
        }
    }

    // ========================================================================
    // Token emission helpers
    // ========================================================================

    pub(super) fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(super) fn add_token(&mut self, kind: TokenKind, start: usize) {
        self.tokens.push(Token::new(kind, Span::new(start, self.current_pos)));
    }

    fn add_op(&mut self, id: OperatorId, start: usize) {
        self.add_token(TokenKind::Operator(id), start);
    }

    fn add_punct(&mut self, id: PunctuationId, start: usize) {
        self.add_token(TokenKind::Punctuation(id), start);
    }

    pub(super) fn push_error(&mut self, error: Diagnostic) {
        self.errors.push(error);
    }

    // ========================================================================
    // Identifiers and metadata
    // ========================================================================

    fn scan_identifier(&mut self, start: usize) {
        while let Some(c) = self.peek() {
            if is_ident_continue(c) {
                self.advance();
            } else {
                break;
            }
        }

        let spelling = &self.source[start..self.current_pos];

        // Reserved words and builtin names win over plain identifiers; the
        // parser re-interprets them contextually where the dialect allows.
        if let Some(id) = keywords::from_str(spelling) {
            self.add_token(TokenKind::Keyword(id), start);
        } else if let Some(b) = builtins::from_str(spelling) {
            self.add_token(TokenKind::Builtin(b), start);
        } else {
            self.add_token(TokenKind::Ident(spelling.to_string()), start);
        }
    }

    /// Rest of a `##` line, raw. Key/value splitting happens in the AST
    /// ([`crate::ast::MetadataEntry`]), not here.
    fn scan_metadata_line(&mut self, start: usize) {
        let text_start = self.current_pos;
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
        let raw = self.source[text_start..self.current_pos].trim().to_string();
        self.add_token(TokenKind::MetadataLine(raw), start);
    }
}

/// Check if a character can start an identifier (ASCII-only).
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Check if a character can continue an identifier (ASCII-only).
fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Convenience function to lex a source string.
///
/// This is a shorthand for `Lexer::new(source).tokenize()`.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Result<Vec<Token>, Vec<Diagnostic>> {
    Lexer::new(source).tokenize()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use drover_core::lang::keywords::KeywordId;
    use drover_core::lang::operators::OperatorId;

    #[test]
    fn test_keyword_registry_parity() {
        use drover_core::lang::keywords;

        for k in keywords::KEYWORDS {
            let tokens = lex(k.canonical).unwrap_or_else(|errs| panic!("lex({:?}) failed: {:?}", k.canonical, errs));
            assert_eq!(
                tokens.len(),
                2,
                "expected token + EOF for keyword {:?}, got {:?}",
                k.id,
                tokens
            );
            assert!(tokens[0].is_keyword(k.id));
            assert!(tokens[1].is_eof());
        }
    }

    #[test]
    fn test_operator_symbol_registry_parity() {
        use drover_core::lang::operators;

        for o in operators::OPERATORS {
            if o.is_keyword_spelling {
                // Word operators lex as keywords and are mapped back by the
                // parser.
                continue;
            }
            let tokens = lex(o.spelling).unwrap_or_else(|errs| panic!("lex({:?}) failed: {:?}", o.spelling, errs));
            assert_eq!(
                tokens.len(),
                2,
                "expected token + EOF for operator {:?}, got {:?}",
                o.id,
                tokens
            );
            assert!(tokens[0].is_operator(o.id));
        }
    }

    #[test]
    fn test_builtin_names() {
        let tokens = lex("min(1, 2)").unwrap();
        assert_eq!(
            tokens[0].builtin_fn(),
            Some(drover_core::lang::builtins::BuiltinFn::Min)
        );
        assert_eq!(tokens[1].builtin_fn(), None);
    }

    #[test]
    fn test_keywords_and_identifiers() {
        let tokens = lex("set total = subtotal").unwrap();
        assert!(tokens[0].is_keyword(KeywordId::Set));
        assert!(matches!(&tokens[1].kind, TokenKind::Ident(s) if s == "total"));
        assert!(tokens[2].is_operator(OperatorId::Assign));
        assert!(matches!(&tokens[3].kind, TokenKind::Ident(s) if s == "subtotal"));
    }

    #[test]
    fn test_operators() {
        let tokens = lex("+ - * / % ** == != < <= > >= | ^ & ~").unwrap();
        let expected = [
            OperatorId::Plus,
            OperatorId::Minus,
            OperatorId::Star,
            OperatorId::Slash,
            OperatorId::Percent,
            OperatorId::StarStar,
            OperatorId::EqEq,
            OperatorId::NotEq,
            OperatorId::Lt,
            OperatorId::LtEq,
            OperatorId::Gt,
            OperatorId::GtEq,
            OperatorId::Pipe,
            OperatorId::Caret,
            OperatorId::Amp,
            OperatorId::Tilde,
        ];
        for (i, id) in expected.iter().enumerate() {
            assert_eq!(tokens[i].operator_id(), Some(*id), "token {}", i);
        }
    }

    #[test]
    fn test_numbers_are_floats() {
        let tokens = lex("42 3.5 1e3").unwrap();
        assert!(matches!(tokens[0].kind, TokenKind::Number(n) if n == 42.0));
        assert!(matches!(tokens[1].kind, TokenKind::Number(n) if n == 3.5));
        assert!(matches!(tokens[2].kind, TokenKind::Number(n) if n == 1000.0));
    }

    #[test]
    fn test_string_escapes() {
        let tokens = lex(r#"'it\'s' "a\nb""#).unwrap();
        assert!(matches!(&tokens[0].kind, TokenKind::Str(s) if s == "it's"));
        assert!(matches!(&tokens[1].kind, TokenKind::Str(s) if s == "a\nb"));
    }

    #[test]
    fn test_triple_backtick_spans_newlines() {
        let tokens = lex("```line one\nline two```").unwrap();
        assert!(matches!(&tokens[0].kind, TokenKind::TripleStr(s) if s == "line one\nline two"));
        assert!(tokens[1].is_eof());
    }

    #[test]
    fn test_unterminated_string_is_fatal() {
        let errs = lex("set a = 'oops\n").unwrap_err();
        assert_eq!(errs.len(), 1);
        assert!(errs[0].message.contains("Unterminated string"));
    }

    #[test]
    fn test_placeholder() {
        let tokens = lex("emit {{total}}").unwrap();
        assert!(tokens[0].is_keyword(KeywordId::Emit));
        assert!(matches!(&tokens[1].kind, TokenKind::Placeholder(s) if s == "total"));
    }

    #[test]
    fn test_malformed_placeholder_is_a_token_not_an_error() {
        // Interior whitespace leaves the name empty; the parser reports it.
        let tokens = lex("emit {{ total }}\nset a = 1").unwrap();
        assert!(tokens.iter().any(|t| matches!(t.kind, TokenKind::Invalid('{'))));
        assert!(tokens.iter().any(|t| t.is_keyword(KeywordId::Set)));
    }

    #[test]
    fn test_unclosed_placeholder_at_eof_is_fatal() {
        let errs = lex("emit {{total").unwrap_err();
        assert_eq!(errs.len(), 1);
        assert!(errs[0].message.contains("placeholder"));
    }

    #[test]
    fn test_metadata_line_at_line_start() {
        let tokens = lex("## name: restock\nset a = 1").unwrap();
        assert!(matches!(&tokens[0].kind, TokenKind::MetadataLine(s) if s == "name: restock"));
        assert!(tokens[1].is_newline());
        assert!(tokens[2].is_keyword(KeywordId::Set));
    }

    #[test]
    fn test_double_hash_mid_line_is_comment() {
        let tokens = lex("set a = 1 ## not metadata").unwrap();
        assert!(
            !tokens
                .iter()
                .any(|t| matches!(t.kind, TokenKind::MetadataLine(_)))
        );
    }

    #[test]
    fn test_comments_discarded() {
        let tokens = lex("set a = 1 # trailing\n# full line\nset b = 2").unwrap();
        let idents: Vec<_> = tokens.iter().filter_map(|t| t.ident_name()).collect();
        assert_eq!(idents, ["a", "b"]);
    }

    #[test]
    fn test_newlines_preserved_not_collapsed() {
        let tokens = lex("set a = 1\n\n\nset b = 2").unwrap();
        let newline_count = tokens.iter().filter(|t| t.is_newline()).count();
        assert_eq!(newline_count, 3);
    }

    #[test]
    fn test_invalid_char_is_a_token_not_an_error() {
        let tokens = lex("set a = $").unwrap();
        assert!(tokens.iter().any(|t| matches!(t.kind, TokenKind::Invalid('$'))));
    }

    #[test]
    fn test_tool_path() {
        let tokens = lex("tool.inventory.check(sku)").unwrap();
        assert!(tokens[0].is_keyword(KeywordId::Tool));
        assert!(tokens[1].is_punctuation(drover_core::lang::punctuation::PunctuationId::Dot));
        assert!(matches!(&tokens[2].kind, TokenKind::Ident(s) if s == "inventory"));
    }

    #[test]
    fn test_spans_are_byte_offsets() {
        let tokens = lex("set ab = 1").unwrap();
        assert_eq!(tokens[0].span, Span::new(0, 3));
        assert_eq!(tokens[1].span, Span::new(4, 6));
        assert_eq!(tokens[1].lexeme("set ab = 1"), "ab");
    }
}
