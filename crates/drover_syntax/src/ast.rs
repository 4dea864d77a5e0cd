//! Abstract Syntax Tree definitions for Drover.
//!
//! The AST is built bottom-up in a single parse pass and handed whole to the
//! caller; nodes are never mutated afterward by this crate. Ownership is
//! strictly tree-shaped (no back-references), and every positioned node
//! carries its [`Span`] by value for diagnostics.

use drover_core::lang::builtins::BuiltinFn;

/// Source location span (byte offsets).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// A node with source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// Identifier spelling.
pub type Ident = String;

// ============================================================================
// Program structure
// ============================================================================

/// A parsed source unit: file header plus at most one script body.
///
/// A file containing only metadata and blank lines parses to a program with
/// `body: None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub header: FileHeader,
    pub body: Option<ScriptBody>,
}

/// Ordered metadata entries at the top of a file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FileHeader {
    pub entries: Vec<Spanned<MetadataEntry>>,
}

/// One `## key: value` line, surfaced verbatim.
///
/// The raw text after the marker is kept as written; semantic interpretation
/// of keys belongs to the consumer. [`MetadataEntry::key`] and
/// [`MetadataEntry::value`] split on the first `:` for convenience.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataEntry {
    pub raw: String,
}

impl MetadataEntry {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// The text before the first `:`, trimmed. The whole line if there is no `:`.
    pub fn key(&self) -> &str {
        match self.raw.split_once(':') {
            Some((k, _)) => k.trim(),
            None => self.raw.trim(),
        }
    }

    /// The text after the first `:`, trimmed. Empty if there is no `:`.
    pub fn value(&self) -> &str {
        match self.raw.split_once(':') {
            Some((_, v)) => v.trim(),
            None => "",
        }
    }
}

/// The two mutually exclusive script kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptBody {
    Library(LibraryScript),
    Command(CommandScript),
}

/// A library script: procedure definitions and top-level event handlers.
#[derive(Debug, Clone, PartialEq)]
pub struct LibraryScript {
    pub blocks: Vec<Spanned<LibraryBlock>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LibraryBlock {
    Procedure(ProcedureDefinition),
    Handler(Handler),
}

/// A command script: one or more `command` / `endcommand` blocks executed
/// sequentially by the consumer.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandScript {
    pub blocks: Vec<Spanned<CommandBlock>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommandBlock {
    pub metadata: Vec<Spanned<MetadataEntry>>,
    pub body: Vec<Spanned<Statement>>,
}

/// `func NAME signature ... endfunc`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcedureDefinition {
    pub name: Spanned<Ident>,
    pub signature: Signature,
    pub metadata: Vec<Spanned<MetadataEntry>>,
    pub body: Vec<Spanned<Statement>>,
}

/// Procedure signature clauses, each optional, any order.
///
/// A repeated clause extends the existing list; whether repetition should be
/// rejected is a semantic concern outside this crate.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Signature {
    pub needs: Vec<Spanned<Ident>>,
    pub optional: Vec<Spanned<Ident>>,
    pub returns: Vec<Spanned<Ident>>,
}

impl Signature {
    pub fn is_empty(&self) -> bool {
        self.needs.is_empty() && self.optional.is_empty() && self.returns.is_empty()
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// An `on error` / `on event` handler. Usable as a statement inside any
/// statement list, and as a first-class block at library-script top level.
#[derive(Debug, Clone, PartialEq)]
pub enum Handler {
    Error(OnErrorHandler),
    Event(OnEventHandler),
}

/// `on error do ... endon`.
#[derive(Debug, Clone, PartialEq)]
pub struct OnErrorHandler {
    pub body: Vec<Spanned<Statement>>,
}

/// `on event EXPR (named STRING)? (as IDENT)? do ... endon`.
#[derive(Debug, Clone, PartialEq)]
pub struct OnEventHandler {
    pub event: Spanned<Expression>,
    pub name: Option<Spanned<String>>,
    pub binder: Option<Spanned<Ident>>,
    pub body: Vec<Spanned<Statement>>,
}

// ============================================================================
// Statements
// ============================================================================

/// Statement forms. `mustbe` is alternate surface syntax for [`Statement::Must`].
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `set a[0].b, c = expr`
    Set(SetStmt),
    /// `call tool.deploy(env)` / `call helper(x)`
    Call(Spanned<CallableExpr>),
    /// `return` / `return a, b`
    Return(Vec<Spanned<Expression>>),
    /// `emit expr (named "channel")?`
    Emit(EmitStmt),
    /// `must expr` (also spelled `mustbe expr` in legacy editions)
    Must(Spanned<Expression>),
    /// `fail` / `fail expr`
    Fail(Option<Spanned<Expression>>),
    /// `clear_error`
    ClearError,
    /// `clear_event` / `clear_event expr` / `clear event named "name"`
    ClearEvent(Option<EventSelector>),
    /// `ask expr`
    Ask(Spanned<Expression>),
    Break,
    Continue,
    If(IfStmt),
    While(WhileStmt),
    ForEach(ForEachStmt),
    OnError(OnErrorHandler),
    OnEvent(OnEventHandler),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetStmt {
    pub targets: Vec<Spanned<Lvalue>>,
    pub value: Spanned<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmitStmt {
    pub value: Spanned<Expression>,
    pub name: Option<Spanned<String>>,
}

/// Which pending event a `clear_event` statement targets.
#[derive(Debug, Clone, PartialEq)]
pub enum EventSelector {
    /// `clear_event expr`
    Value(Spanned<Expression>),
    /// `clear event named "name"`
    Named(Spanned<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Spanned<Expression>,
    pub then_body: Vec<Spanned<Statement>>,
    pub else_body: Option<Vec<Spanned<Statement>>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Spanned<Expression>,
    pub body: Vec<Spanned<Statement>>,
}

/// `for each IDENT in expr ... endfor`. The binder is a fresh loop variable
/// name; binding semantics are the consumer's concern.
#[derive(Debug, Clone, PartialEq)]
pub struct ForEachStmt {
    pub binder: Spanned<Ident>,
    pub iterable: Spanned<Expression>,
    pub body: Vec<Spanned<Statement>>,
}

// ============================================================================
// Lvalues
// ============================================================================

/// An assignable target: base identifier plus an accessor chain in
/// left-to-right application order (`a[i].b[j]`).
#[derive(Debug, Clone, PartialEq)]
pub struct Lvalue {
    pub base: Spanned<Ident>,
    pub accessors: Vec<Spanned<Accessor>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Accessor {
    Index(Spanned<Expression>),
    Field(Spanned<Ident>),
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Literal(Literal),
    Placeholder(Placeholder),
    Ident(Ident),
    /// The `last`-result pseudo-value.
    Last,
    Call(CallableExpr),
    /// `eval(expr)`
    Eval(Box<Spanned<Expression>>),
    /// Explicit parentheses, preserved so printing round-trips.
    Paren(Box<Spanned<Expression>>),
    Unary(UnaryOp, Box<Spanned<Expression>>),
    Binary(Box<Spanned<Expression>>, BinaryOp, Box<Spanned<Expression>>),
    /// Postfix indexing `expr[index]`, chainable.
    Index(Box<Spanned<Expression>>, Box<Spanned<Expression>>),
}

/// `{{name}}` / `{{last}}` embedded in source, resolved by the consumer.
#[derive(Debug, Clone, PartialEq)]
pub enum Placeholder {
    Named(String),
    Last,
}

/// A call to a procedure, an external tool, or a builtin.
#[derive(Debug, Clone, PartialEq)]
pub struct CallableExpr {
    pub target: CallTarget,
    pub args: Vec<Spanned<Expression>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CallTarget {
    /// Bare identifier: a user procedure.
    Procedure(Ident),
    /// `tool.<qualified.name>`.
    Tool(ToolPath),
    /// One of the fixed builtin function keywords.
    Builtin(BuiltinFn),
}

/// Dotted path naming an external tool, e.g. `tool.github.create_issue`.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolPath {
    pub segments: Vec<Ident>,
}

impl ToolPath {
    /// The dotted spelling without the leading `tool.` prefix.
    pub fn dotted(&self) -> String {
        self.segments.join(".")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    /// Raw triple-backtick string, possibly spanning multiple lines.
    TripleString(String),
    Number(f64),
    Bool(bool),
    Nil,
    List(Vec<Spanned<Expression>>),
    /// Ordered key/value pairs; duplicate keys are syntactically legal
    /// (last-wins is a semantic concern outside this crate).
    Map(Vec<(Spanned<String>, Spanned<Expression>)>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
    /// `no expr` - nil/absence test.
    No,
    /// `some expr` - presence test.
    Some,
    BitNot,
    Typeof,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Or,
    And,
    BitOr,
    BitXor,
    BitAnd,
    Eq,
    NotEq,
    Gt,
    Lt,
    GtEq,
    LtEq,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

impl BinaryOp {
    /// Spelling as written in source.
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Or => "or",
            BinaryOp::And => "and",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::BitAnd => "&",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Gt => ">",
            BinaryOp::Lt => "<",
            BinaryOp::GtEq => ">=",
            BinaryOp::LtEq => "<=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Pow => "**",
        }
    }

    /// Binding strength matching the parser's ladder; higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            BinaryOp::Or => 10,
            BinaryOp::And => 20,
            BinaryOp::BitOr => 30,
            BinaryOp::BitXor => 40,
            BinaryOp::BitAnd => 50,
            BinaryOp::Eq | BinaryOp::NotEq => 60,
            BinaryOp::Gt | BinaryOp::Lt | BinaryOp::GtEq | BinaryOp::LtEq => 70,
            BinaryOp::Add | BinaryOp::Sub => 80,
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => 90,
            BinaryOp::Pow => 100,
        }
    }
}

impl UnaryOp {
    /// Spelling as written in source. Word operators need a trailing space
    /// when printed.
    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "not",
            UnaryOp::No => "no",
            UnaryOp::Some => "some",
            UnaryOp::BitNot => "~",
            UnaryOp::Typeof => "typeof",
        }
    }

    pub fn is_word(self) -> bool {
        matches!(self, UnaryOp::Not | UnaryOp::No | UnaryOp::Some | UnaryOp::Typeof)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_entry_split() {
        let e = MetadataEntry::new("author: dana");
        assert_eq!(e.key(), "author");
        assert_eq!(e.value(), "dana");

        let bare = MetadataEntry::new("deprecated");
        assert_eq!(bare.key(), "deprecated");
        assert_eq!(bare.value(), "");

        let colons = MetadataEntry::new("requires: tool.github: >=2");
        assert_eq!(colons.key(), "requires");
        assert_eq!(colons.value(), "tool.github: >=2");
    }

    #[test]
    fn test_signature_is_empty() {
        let mut sig = Signature::default();
        assert!(sig.is_empty());
        sig.returns.push(Spanned::new("total".to_string(), Span::default()));
        assert!(!sig.is_empty());
    }

    #[test]
    fn test_span_merge() {
        let a = Span::new(4, 9);
        let b = Span::new(7, 20);
        assert_eq!(a.merge(b), Span::new(4, 20));
        assert_eq!(b.merge(a), Span::new(4, 20));
    }

    #[test]
    fn test_tool_path_dotted() {
        let path = ToolPath {
            segments: vec!["github".to_string(), "create_issue".to_string()],
        };
        assert_eq!(path.dotted(), "github.create_issue");
    }

    #[test]
    fn test_pow_binds_tightest_of_binaries() {
        for op in [BinaryOp::Or, BinaryOp::Add, BinaryOp::Mul] {
            assert!(BinaryOp::Pow.precedence() > op.precedence());
        }
    }
}
