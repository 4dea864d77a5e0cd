/// Parser core state and entrypoint.
///
/// This chunk defines the [`Parser`] type and its top-level `parse()`
/// entrypoint.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` to keep all parser methods
///   in a single module while avoiding one large source file.
/// - The parser is single-pass and recovers from errors at statement
///   granularity by resynchronizing at the next newline or block terminator.
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    dialect: Dialect,
    errors: Vec<Diagnostic>,
    /// Set once a fatal condition is reported (unterminated block, mixed
    /// script kinds); stops the outer parse loops.
    fatal: bool,
    /// True while parsing the body of a `command` block; gates the legacy
    /// handler restriction.
    in_command_block: bool,
}

impl<'a> Parser<'a> {
    /// Create a parser with the permissive default dialect.
    pub fn new(tokens: &'a [Token]) -> Self {
        Self::with_dialect(tokens, Dialect::default())
    }

    /// Create a parser for a specific grammar dialect.
    pub fn with_dialect(tokens: &'a [Token], dialect: Dialect) -> Self {
        Self {
            tokens,
            pos: 0,
            dialect,
            errors: Vec::new(),
            fatal: false,
            in_command_block: false,
        }
    }

    /// Parse the entire token stream into a [`Program`].
    ///
    /// ## Errors
    /// Returns every collected [`Diagnostic`], ordered by position. On any
    /// error only diagnostics come back; no partial AST is produced.
    pub fn parse(mut self) -> Result<Program, Vec<Diagnostic>> {
        let header = self.file_header();
        let body = self.script_body();

        // A well-formed file has nothing but blank lines after its body.
        self.skip_newlines();
        if !self.fatal && !self.is_at_end() {
            let d = self.unexpected("Expected end of file after script body");
            self.report(d);
        }

        if self.errors.is_empty() {
            Ok(Program { header, body })
        } else {
            self.errors.sort_by_key(|d| d.span.start);
            Err(self.errors)
        }
    }
}
