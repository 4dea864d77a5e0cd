/// Miscellaneous parser utilities: identifiers, string literals, lvalues,
/// and expression lists.
impl<'a> Parser<'a> {
    fn identifier(&mut self) -> Result<Ident, Diagnostic> {
        match &self.peek().kind {
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.unexpected("Expected an identifier")),
        }
    }

    fn identifier_spanned(&mut self) -> Result<Spanned<Ident>, Diagnostic> {
        let span = self.current_span();
        let name = self.identifier()?;
        Ok(Spanned::new(name, span))
    }

    fn identifier_list_spanned(&mut self) -> Result<Vec<Spanned<Ident>>, Diagnostic> {
        let mut idents = vec![self.identifier_spanned()?];
        while self.match_punct(PunctuationId::Comma) {
            idents.push(self.identifier_spanned()?);
        }
        Ok(idents)
    }

    fn string_literal_spanned(&mut self) -> Result<Spanned<String>, Diagnostic> {
        match &self.peek().kind {
            TokenKind::Str(s) => {
                let span = self.current_span();
                let s = s.clone();
                self.advance();
                Ok(Spanned::new(s, span))
            }
            _ => Err(self.unexpected("Expected a string literal")),
        }
    }

    fn expression_list(&mut self) -> Result<Vec<Spanned<Expression>>, Diagnostic> {
        let mut exprs = vec![self.expression()?];
        while self.match_punct(PunctuationId::Comma) {
            exprs.push(self.expression()?);
        }
        Ok(exprs)
    }

    /// An assignable target: identifier plus a greedy `[expr]` / `.ident`
    /// accessor chain, in left-to-right application order.
    fn lvalue(&mut self) -> Result<Spanned<Lvalue>, Diagnostic> {
        let base = self.identifier_spanned()?;
        let mut accessors = Vec::new();
        loop {
            let start = self.current_span();
            if self.match_punct(PunctuationId::LBracket) {
                let index = self.expression()?;
                let close = self.expect_punct(
                    PunctuationId::RBracket,
                    "Expected `]` after index expression",
                )?;
                accessors.push(Spanned::new(Accessor::Index(index), start.merge(close)));
            } else if self.match_punct(PunctuationId::Dot) {
                let field = self.identifier_spanned()?;
                let span = start.merge(field.span);
                accessors.push(Spanned::new(Accessor::Field(field), span));
            } else {
                break;
            }
        }
        let span = match accessors.last() {
            Some(last) => base.span.merge(last.span),
            None => base.span,
        };
        Ok(Spanned::new(Lvalue { base, accessors }, span))
    }

    /// Comma-separated lvalues (multi-assignment `set a, b = ...`).
    fn lvalue_list(&mut self) -> Result<Vec<Spanned<Lvalue>>, Diagnostic> {
        let mut targets = vec![self.lvalue()?];
        while self.match_punct(PunctuationId::Comma) {
            targets.push(self.lvalue()?);
        }
        Ok(targets)
    }
}

/// Source-level spelling of a token, for the `lexeme` field of diagnostics.
fn lexeme_of(kind: &TokenKind) -> Option<String> {
    match kind {
        TokenKind::Keyword(k) => Some(keywords::as_str(*k).to_string()),
        TokenKind::Operator(op) => Some(operators::as_str(*op).to_string()),
        TokenKind::Punctuation(p) => Some(punctuation::as_str(*p).to_string()),
        TokenKind::Builtin(b) => Some(builtins::as_str(*b).to_string()),
        TokenKind::Ident(name) => Some(name.clone()),
        TokenKind::Number(n) => Some(n.to_string()),
        TokenKind::Placeholder(name) => Some(format!("{{{{{}}}}}", name)),
        TokenKind::Invalid(c) => Some(c.to_string()),
        _ => None,
    }
}
