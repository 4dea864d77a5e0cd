/// Token-stream helpers and error recovery.
///
/// This chunk contains the low-level primitives used throughout parsing:
/// - Peeking/consuming tokens (`peek`, `peek_next`, `advance`)
/// - Matching / expecting keywords, operators, and punctuation
/// - Newline handling (`skip_newlines`, `end_of_statement`)
/// - Error collection and recovery (`report`, `synchronize`)
impl<'a> Parser<'a> {
    /// Return `true` if the current token is [`TokenKind::Eof`].
    fn is_at_end(&self) -> bool {
        self.peek().is_eof()
    }

    /// Return the current token without consuming it.
    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// Return the token after the current one without consuming it.
    ///
    /// The stream always ends in `Eof`, so peeking past the end saturates on
    /// the final token.
    fn peek_next(&self) -> &Token {
        if self.pos + 1 < self.tokens.len() {
            &self.tokens[self.pos + 1]
        } else {
            &self.tokens[self.tokens.len() - 1]
        }
    }

    /// Advance to the next token and return the token just consumed.
    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.pos += 1;
        }
        &self.tokens[self.pos - 1]
    }

    fn current_span(&self) -> Span {
        self.peek().span
    }

    /// Span of the most recently consumed token.
    fn previous_span(&self) -> Span {
        if self.pos > 0 {
            self.tokens[self.pos - 1].span
        } else {
            self.current_span()
        }
    }

    fn check_keyword(&self, id: KeywordId) -> bool {
        self.peek().is_keyword(id)
    }

    fn check_op(&self, id: OperatorId) -> bool {
        self.peek().is_operator(id)
    }

    fn check_punct(&self, id: PunctuationId) -> bool {
        self.peek().is_punctuation(id)
    }

    fn match_keyword(&mut self, id: KeywordId) -> bool {
        if self.check_keyword(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_op(&mut self, id: OperatorId) -> bool {
        if self.check_op(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_punct(&mut self, id: PunctuationId) -> bool {
        if self.check_punct(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_keyword(&mut self, id: KeywordId, msg: &str) -> Result<Span, Diagnostic> {
        if self.check_keyword(id) {
            Ok(self.advance().span)
        } else {
            Err(self.unexpected(msg))
        }
    }

    fn expect_op(&mut self, id: OperatorId, msg: &str) -> Result<Span, Diagnostic> {
        if self.check_op(id) {
            Ok(self.advance().span)
        } else {
            Err(self.unexpected(msg))
        }
    }

    fn expect_punct(&mut self, id: PunctuationId, msg: &str) -> Result<Span, Diagnostic> {
        if self.check_punct(id) {
            Ok(self.advance().span)
        } else {
            Err(self.unexpected(msg))
        }
    }

    fn skip_newlines(&mut self) {
        while self.peek().is_newline() {
            self.advance();
        }
    }

    /// Require the current statement to end here: a newline (consumed) or
    /// end of file.
    fn end_of_statement(&mut self) -> Result<(), Diagnostic> {
        if self.peek().is_newline() {
            self.advance();
            Ok(())
        } else if self.is_at_end() {
            Ok(())
        } else {
            Err(self.unexpected("Expected end of line after statement"))
        }
    }

    /// Record a diagnostic, setting the fatal flag for fatal severities.
    ///
    /// Resynchronization guard: a second diagnostic at the same offset as the
    /// previous one is suppressed, so one bad token does not flood the list
    /// while recovery is still repositioning.
    fn report(&mut self, error: Diagnostic) {
        if error.severity == Severity::Fatal {
            self.fatal = true;
        }
        if self
            .errors
            .last()
            .is_some_and(|prev| prev.span.start == error.span.start)
        {
            return;
        }
        self.errors.push(error);
    }

    /// Skip to the next statement boundary after an error: just past the next
    /// newline, or stopping in front of a block terminator keyword.
    fn synchronize(&mut self) {
        while !self.is_at_end() {
            if self.peek().is_newline() {
                self.advance();
                return;
            }
            if self.at_block_boundary() {
                return;
            }
            self.advance();
        }
    }

    /// True when the current token closes some enclosing block.
    fn at_block_boundary(&self) -> bool {
        matches!(
            self.peek().keyword_id(),
            Some(
                KeywordId::Else
                    | KeywordId::EndIf
                    | KeywordId::EndWhile
                    | KeywordId::EndFor
                    | KeywordId::EndFunc
                    | KeywordId::EndOn
                    | KeywordId::EndCommand
            )
        )
    }

    /// Check if the current token can start an expression. Used to decide
    /// whether an optional trailing expression is present.
    fn is_at_expr_start(&self) -> bool {
        matches!(
            self.peek().kind,
            TokenKind::Ident(_)
                | TokenKind::Number(_)
                | TokenKind::Str(_)
                | TokenKind::TripleStr(_)
                | TokenKind::Placeholder(_)
                | TokenKind::Builtin(_)
        ) || self.check_keyword(KeywordId::True)
            || self.check_keyword(KeywordId::False)
            || self.check_keyword(KeywordId::Nil)
            || self.check_keyword(KeywordId::Last)
            || self.check_keyword(KeywordId::Eval)
            || self.check_keyword(KeywordId::Tool)
            || self.check_keyword(KeywordId::Not)
            || self.check_keyword(KeywordId::No)
            || self.check_keyword(KeywordId::Some)
            || self.check_keyword(KeywordId::Typeof)
            || self.check_punct(PunctuationId::LParen)
            || self.check_punct(PunctuationId::LBracket)
            || self.check_punct(PunctuationId::LBrace)
            || self.check_op(OperatorId::Minus)
            || self.check_op(OperatorId::Tilde)
    }

    /// Build an "Expected X, found Y" diagnostic at the current token.
    fn unexpected(&self, expected: &str) -> Diagnostic {
        let tok = self.peek();
        let mut d = Diagnostic::syntax(
            format!("{}, found {}", expected, tok.kind.describe()),
            tok.span,
        );
        if let Some(lexeme) = lexeme_of(&tok.kind) {
            d = d.with_lexeme(lexeme);
        }
        d
    }
}
