/// Statement parsing: simple statements, block statements, and statement
/// lists bounded by block terminators.
impl<'a> Parser<'a> {
    /// Parse the statements of one block up to `terminator` (consumed).
    ///
    /// A wrong terminator or end of file is fatal for the block and is
    /// reported at the opening keyword's span, so the diagnostic points at
    /// the block start rather than the stray token.
    fn statement_list(
        &mut self,
        terminator: KeywordId,
        open_span: Span,
        opener: &str,
    ) -> Result<Vec<Spanned<Statement>>, Diagnostic> {
        let (body, _) = self.statement_list_until(&[terminator], open_span, opener)?;
        Ok(body)
    }

    /// Like [`Self::statement_list`] but with several acceptable terminators;
    /// returns which one was consumed. Used by `if`, whose then-body can end
    /// at `else` or `endif`.
    fn statement_list_until(
        &mut self,
        terminators: &[KeywordId],
        open_span: Span,
        opener: &str,
    ) -> Result<(Vec<Spanned<Statement>>, KeywordId), Diagnostic> {
        let mut stmts = Vec::new();
        loop {
            self.skip_newlines();

            // A `##` line between statements is a comment; metadata only
            // attaches in header and block-prologue positions.
            if matches!(self.peek().kind, TokenKind::MetadataLine(_)) {
                self.advance();
                continue;
            }

            if self.is_at_end() {
                return Err(Diagnostic::fatal(
                    format!(
                        "Unterminated `{}` block, expected `{}`",
                        opener,
                        keywords::as_str(terminators[terminators.len() - 1])
                    ),
                    open_span,
                ));
            }

            if let Some(k) = self.peek().keyword_id() {
                if terminators.contains(&k) {
                    self.advance();
                    return Ok((stmts, k));
                }
                if self.at_block_boundary() {
                    return Err(Diagnostic::fatal(
                        format!(
                            "Mismatched terminator `{}` for `{}` block, expected `{}`",
                            keywords::as_str(k),
                            opener,
                            keywords::as_str(terminators[terminators.len() - 1])
                        ),
                        open_span,
                    )
                    .with_lexeme(keywords::as_str(k)));
                }
            }

            match self.statement() {
                Ok(stmt) => stmts.push(stmt),
                Err(e) => {
                    self.report(e);
                    if self.fatal {
                        // The nested failure already points at its own
                        // opener; stop here instead of cascading.
                        return Ok((stmts, terminators[terminators.len() - 1]));
                    }
                    self.synchronize();
                }
            }
        }
    }

    fn statement(&mut self) -> Result<Spanned<Statement>, Diagnostic> {
        let start = self.current_span();
        let stmt = self.statement_inner()?;
        let span = start.merge(self.previous_span());
        self.end_of_statement()?;
        Ok(Spanned::new(stmt, span))
    }

    fn statement_inner(&mut self) -> Result<Statement, Diagnostic> {
        match self.peek().keyword_id() {
            Some(KeywordId::Set) => self.set_stmt(),
            Some(KeywordId::Call) => {
                self.advance();
                let callee = self.callable_expr()?;
                Ok(Statement::Call(callee))
            }
            Some(KeywordId::Return) => {
                self.advance();
                let values = if self.is_at_expr_start() {
                    self.expression_list()?
                } else {
                    Vec::new()
                };
                Ok(Statement::Return(values))
            }
            Some(KeywordId::Emit) => {
                self.advance();
                let value = self.expression()?;
                let name = if self.match_keyword(KeywordId::Named) {
                    Some(self.string_literal_spanned()?)
                } else {
                    None
                };
                Ok(Statement::Emit(EmitStmt { value, name }))
            }
            Some(KeywordId::Must) => {
                self.advance();
                Ok(Statement::Must(self.expression()?))
            }
            Some(KeywordId::MustBe) => {
                if !self.dialect.mustbe_alias {
                    return Err(Diagnostic::syntax(
                        "`mustbe` was replaced by `must` in this grammar edition",
                        self.current_span(),
                    )
                    .with_lexeme("mustbe")
                    .with_hint("write `must <condition>`"));
                }
                self.advance();
                // Alternate surface syntax; same AST variant as `must`.
                Ok(Statement::Must(self.expression()?))
            }
            Some(KeywordId::Fail) => {
                self.advance();
                let value = if self.is_at_expr_start() {
                    Some(self.expression()?)
                } else {
                    None
                };
                Ok(Statement::Fail(value))
            }
            Some(KeywordId::ClearError) => {
                self.advance();
                Ok(Statement::ClearError)
            }
            Some(KeywordId::ClearEvent) => {
                self.advance();
                let selector = if self.is_at_expr_start() {
                    Some(EventSelector::Value(self.expression()?))
                } else {
                    None
                };
                Ok(Statement::ClearEvent(selector))
            }
            Some(KeywordId::Clear) => {
                // Alternate form: `clear event named "name"`.
                self.advance();
                self.expect_keyword(KeywordId::Event, "Expected `event` after `clear`")?;
                self.expect_keyword(KeywordId::Named, "Expected `named` after `clear event`")?;
                let name = self.string_literal_spanned()?;
                Ok(Statement::ClearEvent(Some(EventSelector::Named(name))))
            }
            Some(KeywordId::Ask) => {
                self.advance();
                if !self.is_at_expr_start() {
                    return Err(Diagnostic::syntax(
                        "Expected an expression after `ask`",
                        self.current_span(),
                    )
                    .with_hint("write the question as an expression, e.g. ask \"proceed?\""));
                }
                Ok(Statement::Ask(self.expression()?))
            }
            Some(KeywordId::Break) => {
                self.advance();
                Ok(Statement::Break)
            }
            Some(KeywordId::Continue) => {
                self.advance();
                Ok(Statement::Continue)
            }
            Some(KeywordId::If) => self.if_stmt(),
            Some(KeywordId::While) => self.while_stmt(),
            Some(KeywordId::For) => self.for_each_stmt(),
            Some(KeywordId::On) => self.handler_stmt(),
            _ => Err(self.unexpected("Expected a statement")),
        }
    }

    fn set_stmt(&mut self) -> Result<Statement, Diagnostic> {
        self.advance(); // set
        let targets = self.lvalue_list()?;
        self.expect_op(OperatorId::Assign, "Expected `=` in `set` statement")?;
        let value = self.expression()?;
        Ok(Statement::Set(SetStmt { targets, value }))
    }

    fn if_stmt(&mut self) -> Result<Statement, Diagnostic> {
        let open_span = self.current_span();
        self.advance(); // if
        let condition = self.expression()?;
        self.end_of_statement()?;

        let (then_body, closed_by) =
            self.statement_list_until(&[KeywordId::Else, KeywordId::EndIf], open_span, "if")?;
        let else_body = if closed_by == KeywordId::Else {
            self.end_of_statement()?;
            let (body, _) = self.statement_list_until(&[KeywordId::EndIf], open_span, "if")?;
            Some(body)
        } else {
            None
        };

        Ok(Statement::If(IfStmt {
            condition,
            then_body,
            else_body,
        }))
    }

    fn while_stmt(&mut self) -> Result<Statement, Diagnostic> {
        let open_span = self.current_span();
        self.advance(); // while
        let condition = self.expression()?;
        self.end_of_statement()?;
        let body = self.statement_list(KeywordId::EndWhile, open_span, "while")?;
        Ok(Statement::While(WhileStmt { condition, body }))
    }

    fn for_each_stmt(&mut self) -> Result<Statement, Diagnostic> {
        let open_span = self.current_span();
        self.advance(); // for
        self.expect_keyword(KeywordId::Each, "Expected `each` after `for`")?;
        let binder = self.identifier_spanned()?;
        self.expect_keyword(KeywordId::In, "Expected `in` after loop variable")?;
        let iterable = self.expression()?;
        self.end_of_statement()?;
        let body = self.statement_list(KeywordId::EndFor, open_span, "for each")?;
        Ok(Statement::ForEach(ForEachStmt {
            binder,
            iterable,
            body,
        }))
    }

    /// Handler in statement position. One legacy edition restricts command
    /// blocks to `on error`; the shared grammar is otherwise identical to the
    /// top-level handler form.
    fn handler_stmt(&mut self) -> Result<Statement, Diagnostic> {
        if self.in_command_block
            && self.dialect.handlers_in_commands_restricted
            && self.peek_next().is_keyword(KeywordId::Event)
        {
            return Err(Diagnostic::syntax(
                "`on event` handlers are not allowed inside command blocks in this grammar edition",
                self.current_span(),
            )
            .with_hint("only `on error do ... endon` is available here"));
        }
        match self.handler()?.node {
            Handler::Error(h) => Ok(Statement::OnError(h)),
            Handler::Event(h) => Ok(Statement::OnEvent(h)),
        }
    }
}
