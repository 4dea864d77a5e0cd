//! Number scanning for the Drover lexer.
//!
//! Drover has a single numeric type, so every literal lexes to an `f64`.

use super::Lexer;
use super::tokens::TokenKind;
use crate::ast::Span;
use crate::diagnostics::Diagnostic;

impl<'a> Lexer<'a> {
    pub(super) fn scan_number(&mut self, start: usize, first: char) {
        let mut value = String::from(first);

        // Integer part
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || c == '_' {
                if c != '_' {
                    value.push(c);
                }
                self.advance();
            } else {
                break;
            }
        }

        // Decimal part. `1.floor` style member access does not exist in the
        // grammar, but `list[1].name` lvalues do, so only consume the dot
        // when a digit follows.
        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            value.push('.');
            self.advance();
            while let Some(c) = self.peek() {
                if c.is_ascii_digit() || c == '_' {
                    if c != '_' {
                        value.push(c);
                    }
                    self.advance();
                } else {
                    break;
                }
            }
        }

        // Exponent part
        if self.peek() == Some('e') || self.peek() == Some('E') {
            if self
                .peek_next()
                .is_some_and(|c| c.is_ascii_digit() || c == '+' || c == '-')
            {
                value.push('e');
                self.advance();
                if let Some(sign) = self.peek() {
                    if sign == '+' || sign == '-' {
                        value.push(sign);
                        self.advance();
                    }
                }
                while let Some(c) = self.peek() {
                    if c.is_ascii_digit() {
                        value.push(c);
                        self.advance();
                    } else {
                        break;
                    }
                }
            }
        }

        match value.parse::<f64>() {
            Ok(n) => self.add_token(TokenKind::Number(n), start),
            Err(_) => self.push_error(Diagnostic::fatal(
                format!("Invalid numeric literal `{}`", value),
                Span::new(start, self.current_pos),
            )),
        }
    }
}
