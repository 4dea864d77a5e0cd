/// Parse a token stream into an AST [`Program`] with the default dialect.
///
/// ## Errors
/// Returns `Err(Vec<Diagnostic>)` if parsing fails; diagnostics are ordered
/// by position and no partial AST is produced.
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse(tokens: &[Token]) -> Result<Program, Vec<Diagnostic>> {
    Parser::new(tokens).parse()
}

/// Parse a token stream under a specific grammar [`Dialect`].
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse_with(tokens: &[Token], dialect: Dialect) -> Result<Program, Vec<Diagnostic>> {
    Parser::with_dialect(tokens, dialect).parse()
}

/// Lex and parse one source unit in a single call.
///
/// This is the main external entrypoint: one in-memory text buffer in, a
/// whole [`Program`] (ownership transferred) or an ordered diagnostic list
/// out. The call owns all of its state, so independent callers may parse
/// concurrently with no coordination.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn parse_source(source: &str) -> Result<Program, Vec<Diagnostic>> {
    let tokens = crate::lexer::lex(source)?;
    parse(&tokens)
}

/// [`parse_source`] under a specific grammar [`Dialect`].
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn parse_source_with(source: &str, dialect: Dialect) -> Result<Program, Vec<Diagnostic>> {
    let tokens = crate::lexer::lex(source)?;
    parse_with(&tokens, dialect)
}
