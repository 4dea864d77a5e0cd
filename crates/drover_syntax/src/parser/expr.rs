/// Expression parsing: the twelve-level precedence ladder.
///
/// Each level is a rule that tries the next-tighter level on non-match, from
/// `or` down to primary. Power is right-associative over a unary left
/// operand, so prefix operators bind tighter than `**`:
/// `-2 ** 2` parses as `Pow(Neg(2), 2)` and `2 ** 3 ** 2` as `Pow(2, Pow(3, 2))`.
impl<'a> Parser<'a> {
    fn expression(&mut self) -> Result<Spanned<Expression>, Diagnostic> {
        self.or_expr()
    }

    fn binary(
        left: Spanned<Expression>,
        op: BinaryOp,
        right: Spanned<Expression>,
    ) -> Spanned<Expression> {
        let span = left.span.merge(right.span);
        Spanned::new(
            Expression::Binary(Box::new(left), op, Box::new(right)),
            span,
        )
    }

    fn or_expr(&mut self) -> Result<Spanned<Expression>, Diagnostic> {
        let mut left = self.and_expr()?;
        while self.match_keyword(KeywordId::Or) {
            let right = self.and_expr()?;
            left = Self::binary(left, BinaryOp::Or, right);
        }
        Ok(left)
    }

    fn and_expr(&mut self) -> Result<Spanned<Expression>, Diagnostic> {
        let mut left = self.bitor_expr()?;
        while self.match_keyword(KeywordId::And) {
            let right = self.bitor_expr()?;
            left = Self::binary(left, BinaryOp::And, right);
        }
        Ok(left)
    }

    fn bitor_expr(&mut self) -> Result<Spanned<Expression>, Diagnostic> {
        let mut left = self.bitxor_expr()?;
        while self.match_op(OperatorId::Pipe) {
            let right = self.bitxor_expr()?;
            left = Self::binary(left, BinaryOp::BitOr, right);
        }
        Ok(left)
    }

    fn bitxor_expr(&mut self) -> Result<Spanned<Expression>, Diagnostic> {
        let mut left = self.bitand_expr()?;
        while self.match_op(OperatorId::Caret) {
            let right = self.bitand_expr()?;
            left = Self::binary(left, BinaryOp::BitXor, right);
        }
        Ok(left)
    }

    fn bitand_expr(&mut self) -> Result<Spanned<Expression>, Diagnostic> {
        let mut left = self.equality_expr()?;
        while self.match_op(OperatorId::Amp) {
            let right = self.equality_expr()?;
            left = Self::binary(left, BinaryOp::BitAnd, right);
        }
        Ok(left)
    }

    fn equality_expr(&mut self) -> Result<Spanned<Expression>, Diagnostic> {
        let mut left = self.relational_expr()?;
        loop {
            let op = if self.match_op(OperatorId::EqEq) {
                BinaryOp::Eq
            } else if self.match_op(OperatorId::NotEq) {
                BinaryOp::NotEq
            } else {
                return Ok(left);
            };
            let right = self.relational_expr()?;
            left = Self::binary(left, op, right);
        }
    }

    fn relational_expr(&mut self) -> Result<Spanned<Expression>, Diagnostic> {
        let mut left = self.additive_expr()?;
        loop {
            let op = if self.match_op(OperatorId::GtEq) {
                BinaryOp::GtEq
            } else if self.match_op(OperatorId::LtEq) {
                BinaryOp::LtEq
            } else if self.match_op(OperatorId::Gt) {
                BinaryOp::Gt
            } else if self.match_op(OperatorId::Lt) {
                BinaryOp::Lt
            } else {
                return Ok(left);
            };
            let right = self.additive_expr()?;
            left = Self::binary(left, op, right);
        }
    }

    fn additive_expr(&mut self) -> Result<Spanned<Expression>, Diagnostic> {
        let mut left = self.multiplicative_expr()?;
        loop {
            let op = if self.match_op(OperatorId::Plus) {
                BinaryOp::Add
            } else if self.match_op(OperatorId::Minus) {
                BinaryOp::Sub
            } else {
                return Ok(left);
            };
            let right = self.multiplicative_expr()?;
            left = Self::binary(left, op, right);
        }
    }

    fn multiplicative_expr(&mut self) -> Result<Spanned<Expression>, Diagnostic> {
        let mut left = self.power_expr()?;
        loop {
            let op = if self.match_op(OperatorId::Star) {
                BinaryOp::Mul
            } else if self.match_op(OperatorId::Slash) {
                BinaryOp::Div
            } else if self.match_op(OperatorId::Percent) {
                BinaryOp::Mod
            } else {
                return Ok(left);
            };
            let right = self.power_expr()?;
            left = Self::binary(left, op, right);
        }
    }

    /// `base ** exponent`, right-recursive. The base is a unary expression,
    /// which is what makes `-2 ** 2` parse as `Pow(Neg(2), 2)`.
    fn power_expr(&mut self) -> Result<Spanned<Expression>, Diagnostic> {
        let base = self.unary_expr()?;
        if self.match_op(OperatorId::StarStar) {
            let exponent = self.power_expr()?;
            return Ok(Self::binary(base, BinaryOp::Pow, exponent));
        }
        Ok(base)
    }

    fn unary_expr(&mut self) -> Result<Spanned<Expression>, Diagnostic> {
        let start = self.current_span();
        let op = if self.match_op(OperatorId::Minus) {
            UnaryOp::Neg
        } else if self.match_op(OperatorId::Tilde) {
            UnaryOp::BitNot
        } else if self.match_keyword(KeywordId::Not) {
            UnaryOp::Not
        } else if self.match_keyword(KeywordId::No) {
            UnaryOp::No
        } else if self.match_keyword(KeywordId::Some) {
            UnaryOp::Some
        } else if self.match_keyword(KeywordId::Typeof) {
            UnaryOp::Typeof
        } else {
            return self.accessor_expr();
        };
        let operand = self.unary_expr()?;
        let span = start.merge(operand.span);
        Ok(Spanned::new(Expression::Unary(op, Box::new(operand)), span))
    }

    /// Postfix `[expr]` indexing, left-associative and chainable.
    fn accessor_expr(&mut self) -> Result<Spanned<Expression>, Diagnostic> {
        let mut expr = self.primary()?;
        while self.match_punct(PunctuationId::LBracket) {
            let index = self.expression()?;
            let close = self.expect_punct(
                PunctuationId::RBracket,
                "Expected `]` after index expression",
            )?;
            let span = expr.span.merge(close);
            expr = Spanned::new(
                Expression::Index(Box::new(expr), Box::new(index)),
                span,
            );
        }
        Ok(expr)
    }

    fn primary(&mut self) -> Result<Spanned<Expression>, Diagnostic> {
        let span = self.current_span();
        match &self.peek().kind {
            TokenKind::Str(s) => {
                let s = s.clone();
                self.advance();
                Ok(Spanned::new(Expression::Literal(Literal::String(s)), span))
            }
            TokenKind::TripleStr(s) => {
                let s = s.clone();
                self.advance();
                Ok(Spanned::new(
                    Expression::Literal(Literal::TripleString(s)),
                    span,
                ))
            }
            TokenKind::Number(n) => {
                let n = *n;
                self.advance();
                Ok(Spanned::new(Expression::Literal(Literal::Number(n)), span))
            }
            TokenKind::Placeholder(name) => {
                let placeholder = if name == "last" {
                    Placeholder::Last
                } else {
                    Placeholder::Named(name.clone())
                };
                self.advance();
                Ok(Spanned::new(Expression::Placeholder(placeholder), span))
            }
            TokenKind::Keyword(KeywordId::True) => {
                self.advance();
                Ok(Spanned::new(Expression::Literal(Literal::Bool(true)), span))
            }
            TokenKind::Keyword(KeywordId::False) => {
                self.advance();
                Ok(Spanned::new(
                    Expression::Literal(Literal::Bool(false)),
                    span,
                ))
            }
            TokenKind::Keyword(KeywordId::Nil) => {
                self.advance();
                Ok(Spanned::new(Expression::Literal(Literal::Nil), span))
            }
            TokenKind::Keyword(KeywordId::Last) => {
                self.advance();
                Ok(Spanned::new(Expression::Last, span))
            }
            TokenKind::Keyword(KeywordId::Eval) => {
                self.advance();
                self.expect_punct(PunctuationId::LParen, "Expected `(` after `eval`")?;
                let inner = self.expression()?;
                let close = self.expect_punct(
                    PunctuationId::RParen,
                    "Expected `)` to close `eval(...)`",
                )?;
                Ok(Spanned::new(
                    Expression::Eval(Box::new(inner)),
                    span.merge(close),
                ))
            }
            TokenKind::Builtin(BuiltinFn::Len)
                if !self.dialect.len_callable
                    && !self.peek_next().is_punctuation(PunctuationId::LParen) =>
            {
                // Pre-V3 editions read `len` as an ordinary identifier.
                self.advance();
                Ok(Spanned::new(Expression::Ident("len".to_string()), span))
            }
            TokenKind::Keyword(KeywordId::Tool) | TokenKind::Builtin(_) => {
                let call = self.callable_expr()?;
                let span = call.span;
                Ok(Spanned::new(Expression::Call(call.node), span))
            }
            TokenKind::Ident(name) => {
                // One token of lookahead on `(` separates a procedure call
                // from a bare identifier.
                if self.peek_next().is_punctuation(PunctuationId::LParen) {
                    let call = self.callable_expr()?;
                    let span = call.span;
                    Ok(Spanned::new(Expression::Call(call.node), span))
                } else {
                    let name = name.clone();
                    self.advance();
                    Ok(Spanned::new(Expression::Ident(name), span))
                }
            }
            TokenKind::Punctuation(PunctuationId::LParen) => {
                self.advance();
                let inner = self.expression()?;
                let close = self.expect_punct(
                    PunctuationId::RParen,
                    "Expected `)` to close parenthesized expression",
                )?;
                Ok(Spanned::new(
                    Expression::Paren(Box::new(inner)),
                    span.merge(close),
                ))
            }
            TokenKind::Punctuation(PunctuationId::LBracket) => self.list_literal(span),
            TokenKind::Punctuation(PunctuationId::LBrace) => self.map_literal(span),
            _ => Err(self.unexpected("Expected an expression")),
        }
    }

    fn list_literal(&mut self, open: Span) -> Result<Spanned<Expression>, Diagnostic> {
        self.advance(); // [
        let mut items = Vec::new();
        if !self.check_punct(PunctuationId::RBracket) {
            loop {
                items.push(self.expression()?);
                if !self.match_punct(PunctuationId::Comma) {
                    break;
                }
            }
        }
        let close = self.expect_punct(PunctuationId::RBracket, "Expected `]` to close list")?;
        Ok(Spanned::new(
            Expression::Literal(Literal::List(items)),
            open.merge(close),
        ))
    }

    /// `{"key": expr, ...}`. Keys are string literals; duplicates are
    /// syntactically legal.
    fn map_literal(&mut self, open: Span) -> Result<Spanned<Expression>, Diagnostic> {
        self.advance(); // {
        let mut entries = Vec::new();
        if !self.check_punct(PunctuationId::RBrace) {
            loop {
                let key = self.string_literal_spanned()?;
                self.expect_punct(PunctuationId::Colon, "Expected `:` after map key")?;
                let value = self.expression()?;
                entries.push((key, value));
                if !self.match_punct(PunctuationId::Comma) {
                    break;
                }
            }
        }
        let close = self.expect_punct(PunctuationId::RBrace, "Expected `}` to close map")?;
        Ok(Spanned::new(
            Expression::Literal(Literal::Map(entries)),
            open.merge(close),
        ))
    }

    /// A callable: builtin keyword, `tool.<dotted.path>(...)`, or a bare
    /// identifier followed by `(`. Argument parentheses are required.
    fn callable_expr(&mut self) -> Result<Spanned<CallableExpr>, Diagnostic> {
        let start = self.current_span();
        let target = match &self.peek().kind {
            TokenKind::Keyword(KeywordId::Tool) => {
                self.advance();
                let mut segments = Vec::new();
                loop {
                    self.expect_punct(PunctuationId::Dot, "Expected `.` in tool path")?;
                    segments.push(self.identifier()?);
                    if !self.check_punct(PunctuationId::Dot) {
                        break;
                    }
                }
                CallTarget::Tool(ToolPath { segments })
            }
            TokenKind::Builtin(b) => {
                let b = *b;
                if b == BuiltinFn::Len && !self.dialect.len_callable {
                    // In pre-V3 editions `len` is an ordinary identifier.
                    self.advance();
                    CallTarget::Procedure("len".to_string())
                } else {
                    self.advance();
                    CallTarget::Builtin(b)
                }
            }
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.advance();
                CallTarget::Procedure(name)
            }
            _ => return Err(self.unexpected("Expected a callable name")),
        };

        self.expect_punct(PunctuationId::LParen, "Expected `(` after callable name")?;
        let args = self.call_args()?;
        let span = start.merge(self.previous_span());
        Ok(Spanned::new(CallableExpr { target, args }, span))
    }

    fn call_args(&mut self) -> Result<Vec<Spanned<Expression>>, Diagnostic> {
        let mut args = Vec::new();
        if self.match_punct(PunctuationId::RParen) {
            return Ok(args);
        }
        loop {
            args.push(self.expression()?);
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }
        self.expect_punct(PunctuationId::RParen, "Expected `)` after call arguments")?;
        Ok(args)
    }
}
