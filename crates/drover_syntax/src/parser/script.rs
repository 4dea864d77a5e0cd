/// Top-level parsing: file header, script-kind state machine, procedure
/// definitions, handlers, and command blocks.
///
/// The state machine is `FileHeader -> {Library | Command | Empty} -> EOF`,
/// decided by the first non-metadata, non-newline token. Once a file commits
/// to one script kind, a block of the other kind is a fatal
/// grammar-exclusivity error.
impl<'a> Parser<'a> {
    /// Leading metadata lines and blank lines at the top of the file.
    fn file_header(&mut self) -> FileHeader {
        let mut entries = Vec::new();
        loop {
            if self.peek().is_newline() {
                self.advance();
                continue;
            }
            match &self.peek().kind {
                TokenKind::MetadataLine(raw) => {
                    let span = self.current_span();
                    let raw = raw.clone();
                    self.advance();
                    entries.push(Spanned::new(MetadataEntry::new(raw), span));
                }
                _ => break,
            }
        }
        FileHeader { entries }
    }

    fn script_body(&mut self) -> Option<ScriptBody> {
        if self.is_at_end() {
            return None;
        }
        match self.peek().keyword_id() {
            Some(KeywordId::Func | KeywordId::On) => {
                Some(ScriptBody::Library(self.library_script()))
            }
            Some(KeywordId::Command) => {
                if !self.dialect.command_scripts {
                    self.report(Diagnostic::fatal(
                        "Command scripts are not available in this grammar edition",
                        self.current_span(),
                    ));
                    return None;
                }
                Some(ScriptBody::Command(self.command_script()))
            }
            _ => {
                let d = self
                    .unexpected("Expected `func`, `on`, or `command` at top level")
                    .into_fatal();
                self.report(d);
                None
            }
        }
    }

    // ========================================================================
    // Library scripts
    // ========================================================================

    fn library_script(&mut self) -> LibraryScript {
        let mut blocks = Vec::new();
        while !self.is_at_end() && !self.fatal {
            if self.peek().is_newline() {
                self.advance();
                continue;
            }
            // A `##` line between blocks attaches to nothing; it is a comment.
            if matches!(self.peek().kind, TokenKind::MetadataLine(_)) {
                self.advance();
                continue;
            }
            match self.peek().keyword_id() {
                Some(KeywordId::Func) => match self.procedure_definition() {
                    Ok(block) => blocks.push(block),
                    Err(e) => {
                        self.report(e);
                        self.synchronize();
                    }
                },
                Some(KeywordId::On) => match self.handler() {
                    Ok(handler) => {
                        let span = handler.span;
                        blocks.push(Spanned::new(LibraryBlock::Handler(handler.node), span));
                    }
                    Err(e) => {
                        self.report(e);
                        self.synchronize();
                    }
                },
                Some(KeywordId::Command) => {
                    self.report(
                        Diagnostic::fatal(
                            "Cannot mix `command` blocks with library definitions in one file",
                            self.current_span(),
                        )
                        .with_note("a file is either a library script or a command script"),
                    );
                }
                _ => {
                    let d = self.unexpected("Expected `func` or `on` definition");
                    self.report(d);
                    // `synchronize` stops in front of terminators; a stray one
                    // at top level has no block to close, so consume it here
                    // or the loop would never advance.
                    if self.at_block_boundary() {
                        self.advance();
                    }
                    self.synchronize();
                }
            }
        }
        LibraryScript { blocks }
    }

    /// `func NAME` then signature clauses and metadata lines on their own
    /// lines, then a non-empty body, then `endfunc`.
    fn procedure_definition(&mut self) -> Result<Spanned<LibraryBlock>, Diagnostic> {
        let open_span = self.current_span();
        self.advance(); // func
        let name = self.identifier_spanned()?;
        self.end_of_statement()?;

        let mut signature = Signature::default();
        let mut metadata = Vec::new();
        loop {
            if self.peek().is_newline() {
                self.advance();
                continue;
            }
            match &self.peek().kind {
                TokenKind::MetadataLine(raw) => {
                    let span = self.current_span();
                    let raw = raw.clone();
                    self.advance();
                    metadata.push(Spanned::new(MetadataEntry::new(raw), span));
                }
                // A repeated clause extends the list; rejecting repetition is
                // a semantic concern outside this crate.
                TokenKind::Keyword(KeywordId::Needs) => {
                    self.advance();
                    signature.needs.extend(self.identifier_list_spanned()?);
                    self.end_of_statement()?;
                }
                TokenKind::Keyword(KeywordId::Optional) => {
                    self.advance();
                    signature.optional.extend(self.identifier_list_spanned()?);
                    self.end_of_statement()?;
                }
                TokenKind::Keyword(KeywordId::Returns) => {
                    self.advance();
                    signature.returns.extend(self.identifier_list_spanned()?);
                    self.end_of_statement()?;
                }
                _ => break,
            }
        }

        let body = self.statement_list(KeywordId::EndFunc, open_span, "func")?;
        // An empty body after recovery usually means statements were skipped,
        // not that the author wrote none; only flag it on a clean parse.
        if body.is_empty() && self.errors.is_empty() {
            return Err(Diagnostic::syntax(
                format!("Procedure `{}` has an empty body", name.node),
                open_span,
            )
            .with_lexeme(name.node.clone()));
        }

        let span = open_span.merge(self.previous_span());
        Ok(Spanned::new(
            LibraryBlock::Procedure(ProcedureDefinition {
                name,
                signature,
                metadata,
                body,
            }),
            span,
        ))
    }

    /// `on error do ... endon` or
    /// `on event EXPR (named STRING)? (as IDENT)? do ... endon`.
    fn handler(&mut self) -> Result<Spanned<Handler>, Diagnostic> {
        let open_span = self.current_span();
        self.expect_keyword(KeywordId::On, "Expected `on`")?;

        if self.match_keyword(KeywordId::Error) {
            self.expect_keyword(KeywordId::Do, "Expected `do` after `on error`")?;
            self.end_of_statement()?;
            let body = self.statement_list(KeywordId::EndOn, open_span, "on error")?;
            let span = open_span.merge(self.previous_span());
            Ok(Spanned::new(Handler::Error(OnErrorHandler { body }), span))
        } else if self.match_keyword(KeywordId::Event) {
            let event = self.expression()?;
            let name = if self.match_keyword(KeywordId::Named) {
                Some(self.string_literal_spanned()?)
            } else {
                None
            };
            let binder = if self.match_keyword(KeywordId::As) {
                Some(self.identifier_spanned()?)
            } else {
                None
            };
            self.expect_keyword(KeywordId::Do, "Expected `do` after `on event` clause")?;
            self.end_of_statement()?;
            let body = self.statement_list(KeywordId::EndOn, open_span, "on event")?;
            let span = open_span.merge(self.previous_span());
            Ok(Spanned::new(
                Handler::Event(OnEventHandler {
                    event,
                    name,
                    binder,
                    body,
                }),
                span,
            ))
        } else {
            Err(self.unexpected("Expected `error` or `event` after `on`"))
        }
    }

    // ========================================================================
    // Command scripts
    // ========================================================================

    fn command_script(&mut self) -> CommandScript {
        let mut blocks = Vec::new();
        while !self.is_at_end() && !self.fatal {
            if self.peek().is_newline() {
                self.advance();
                continue;
            }
            if matches!(self.peek().kind, TokenKind::MetadataLine(_)) {
                self.advance();
                continue;
            }
            match self.peek().keyword_id() {
                Some(KeywordId::Command) => match self.command_block() {
                    Ok(block) => blocks.push(block),
                    Err(e) => {
                        self.report(e);
                        self.synchronize();
                    }
                },
                Some(KeywordId::Func | KeywordId::On) => {
                    self.report(
                        Diagnostic::fatal(
                            "Cannot mix library definitions with `command` blocks in one file",
                            self.current_span(),
                        )
                        .with_note("a file is either a library script or a command script"),
                    );
                }
                _ => {
                    let d = self.unexpected("Expected a `command` block");
                    self.report(d);
                    if self.at_block_boundary() {
                        self.advance();
                    }
                    self.synchronize();
                }
            }
        }
        CommandScript { blocks }
    }

    /// `command NL metadata-lines body endcommand`.
    fn command_block(&mut self) -> Result<Spanned<CommandBlock>, Diagnostic> {
        let open_span = self.current_span();
        self.advance(); // command
        self.end_of_statement()?;

        let mut metadata = Vec::new();
        loop {
            if self.peek().is_newline() {
                self.advance();
                continue;
            }
            match &self.peek().kind {
                TokenKind::MetadataLine(raw) => {
                    let span = self.current_span();
                    let raw = raw.clone();
                    self.advance();
                    metadata.push(Spanned::new(MetadataEntry::new(raw), span));
                }
                _ => break,
            }
        }

        self.in_command_block = true;
        let body = self.statement_list(KeywordId::EndCommand, open_span, "command");
        self.in_command_block = false;
        let body = body?;

        let span = open_span.merge(self.previous_span());
        Ok(Spanned::new(CommandBlock { metadata, body }, span))
    }
}
