//! Pretty-printer for the Drover AST.
//!
//! Renders a [`Program`] back to canonical source text: one statement per
//! line, two-space indentation inside blocks, single-quoted strings. Because
//! parentheses are explicit [`Expression::Paren`] nodes, rendering is a
//! direct serialization; the canonical form is a fixed point of
//! `render . parse`, which is what the round-trip tests assert.

use crate::ast::*;
use drover_core::lang::builtins;

/// Render a whole program to canonical source.
pub fn render(program: &Program) -> String {
    let mut p = Printer::new();
    p.program(program);
    p.w.finish()
}

/// Render a single statement (no trailing newline), for diagnostics and
/// tests.
pub fn render_statement(stmt: &Statement) -> String {
    let mut p = Printer::new();
    p.statement(stmt);
    let mut out = p.w.finish();
    while out.ends_with('\n') {
        out.pop();
    }
    out
}

// ============================================================================
// Output writer
// ============================================================================

/// Output buffer with indentation tracking.
struct Writer {
    output: String,
    indent_level: usize,
    at_line_start: bool,
}

const INDENT_WIDTH: usize = 2;

impl Writer {
    fn new() -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
            at_line_start: true,
        }
    }

    fn finish(self) -> String {
        self.output
    }

    fn indent(&mut self) {
        self.indent_level += 1;
    }

    fn dedent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    fn write(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        if self.at_line_start {
            let indent = " ".repeat(self.indent_level * INDENT_WIDTH);
            self.output.push_str(&indent);
            self.at_line_start = false;
        }
        self.output.push_str(s);
    }

    fn writeln(&mut self, s: &str) {
        self.write(s);
        self.newline();
    }

    fn newline(&mut self) {
        self.output.push('\n');
        self.at_line_start = true;
    }
}

// ============================================================================
// Printer
// ============================================================================

struct Printer {
    w: Writer,
}

impl Printer {
    fn new() -> Self {
        Self { w: Writer::new() }
    }

    fn program(&mut self, program: &Program) {
        for entry in &program.header.entries {
            self.metadata_line(&entry.node);
        }
        if !program.header.entries.is_empty() && program.body.is_some() {
            self.w.newline();
        }
        match &program.body {
            Some(ScriptBody::Library(lib)) => {
                for (i, block) in lib.blocks.iter().enumerate() {
                    if i > 0 {
                        self.w.newline();
                    }
                    match &block.node {
                        LibraryBlock::Procedure(p) => self.procedure(p),
                        LibraryBlock::Handler(h) => self.handler(h),
                    }
                }
            }
            Some(ScriptBody::Command(script)) => {
                for (i, block) in script.blocks.iter().enumerate() {
                    if i > 0 {
                        self.w.newline();
                    }
                    self.command_block(&block.node);
                }
            }
            None => {}
        }
    }

    fn metadata_line(&mut self, entry: &MetadataEntry) {
        self.w.write("## ");
        self.w.writeln(&entry.raw);
    }

    fn procedure(&mut self, p: &ProcedureDefinition) {
        self.w.write("func ");
        self.w.writeln(&p.name.node);
        self.ident_clause("needs", &p.signature.needs);
        self.ident_clause("optional", &p.signature.optional);
        self.ident_clause("returns", &p.signature.returns);
        for entry in &p.metadata {
            self.metadata_line(&entry.node);
        }
        self.body(&p.body);
        self.w.writeln("endfunc");
    }

    fn ident_clause(&mut self, keyword: &str, idents: &[Spanned<Ident>]) {
        if idents.is_empty() {
            return;
        }
        self.w.write(keyword);
        self.w.write(" ");
        let names: Vec<&str> = idents.iter().map(|i| i.node.as_str()).collect();
        self.w.write(&names.join(", "));
        self.w.newline();
    }

    fn handler(&mut self, handler: &Handler) {
        match handler {
            Handler::Error(h) => {
                self.w.writeln("on error do");
                self.body(&h.body);
                self.w.writeln("endon");
            }
            Handler::Event(h) => {
                self.w.write("on event ");
                self.expression(&h.event.node);
                if let Some(name) = &h.name {
                    self.w.write(" named ");
                    self.string(&name.node);
                }
                if let Some(binder) = &h.binder {
                    self.w.write(" as ");
                    self.w.write(&binder.node);
                }
                self.w.writeln(" do");
                self.body(&h.body);
                self.w.writeln("endon");
            }
        }
    }

    fn command_block(&mut self, block: &CommandBlock) {
        self.w.writeln("command");
        for entry in &block.metadata {
            self.metadata_line(&entry.node);
        }
        self.body(&block.body);
        self.w.writeln("endcommand");
    }

    fn body(&mut self, stmts: &[Spanned<Statement>]) {
        self.w.indent();
        for stmt in stmts {
            self.statement(&stmt.node);
        }
        self.w.dedent();
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn statement(&mut self, stmt: &Statement) {
        match stmt {
            Statement::Set(set) => {
                self.w.write("set ");
                for (i, target) in set.targets.iter().enumerate() {
                    if i > 0 {
                        self.w.write(", ");
                    }
                    self.lvalue(&target.node);
                }
                self.w.write(" = ");
                self.expression(&set.value.node);
                self.w.newline();
            }
            Statement::Call(call) => {
                self.w.write("call ");
                self.callable(&call.node);
                self.w.newline();
            }
            Statement::Return(values) => {
                self.w.write("return");
                for (i, value) in values.iter().enumerate() {
                    self.w.write(if i == 0 { " " } else { ", " });
                    self.expression(&value.node);
                }
                self.w.newline();
            }
            Statement::Emit(emit) => {
                self.w.write("emit ");
                self.expression(&emit.value.node);
                if let Some(name) = &emit.name {
                    self.w.write(" named ");
                    self.string(&name.node);
                }
                self.w.newline();
            }
            Statement::Must(cond) => {
                self.w.write("must ");
                self.expression(&cond.node);
                self.w.newline();
            }
            Statement::Fail(value) => {
                self.w.write("fail");
                if let Some(value) = value {
                    self.w.write(" ");
                    self.expression(&value.node);
                }
                self.w.newline();
            }
            Statement::ClearError => self.w.writeln("clear_error"),
            Statement::ClearEvent(selector) => match selector {
                None => self.w.writeln("clear_event"),
                Some(EventSelector::Value(e)) => {
                    self.w.write("clear_event ");
                    self.expression(&e.node);
                    self.w.newline();
                }
                Some(EventSelector::Named(name)) => {
                    self.w.write("clear event named ");
                    self.string(&name.node);
                    self.w.newline();
                }
            },
            Statement::Ask(question) => {
                self.w.write("ask ");
                self.expression(&question.node);
                self.w.newline();
            }
            Statement::Break => self.w.writeln("break"),
            Statement::Continue => self.w.writeln("continue"),
            Statement::If(ifs) => {
                self.w.write("if ");
                self.expression(&ifs.condition.node);
                self.w.newline();
                self.body(&ifs.then_body);
                if let Some(else_body) = &ifs.else_body {
                    self.w.writeln("else");
                    self.body(else_body);
                }
                self.w.writeln("endif");
            }
            Statement::While(w) => {
                self.w.write("while ");
                self.expression(&w.condition.node);
                self.w.newline();
                self.body(&w.body);
                self.w.writeln("endwhile");
            }
            Statement::ForEach(f) => {
                self.w.write("for each ");
                self.w.write(&f.binder.node);
                self.w.write(" in ");
                self.expression(&f.iterable.node);
                self.w.newline();
                self.body(&f.body);
                self.w.writeln("endfor");
            }
            Statement::OnError(h) => self.handler(&Handler::Error(h.clone())),
            Statement::OnEvent(h) => self.handler(&Handler::Event(h.clone())),
        }
    }

    fn lvalue(&mut self, lvalue: &Lvalue) {
        self.w.write(&lvalue.base.node);
        for accessor in &lvalue.accessors {
            match &accessor.node {
                Accessor::Index(index) => {
                    self.w.write("[");
                    self.expression(&index.node);
                    self.w.write("]");
                }
                Accessor::Field(field) => {
                    self.w.write(".");
                    self.w.write(&field.node);
                }
            }
        }
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn expression(&mut self, expr: &Expression) {
        match expr {
            Expression::Literal(lit) => self.literal(lit),
            Expression::Placeholder(Placeholder::Named(name)) => {
                self.w.write("{{");
                self.w.write(name);
                self.w.write("}}");
            }
            Expression::Placeholder(Placeholder::Last) => self.w.write("{{last}}"),
            Expression::Ident(name) => self.w.write(name),
            Expression::Last => self.w.write("last"),
            Expression::Call(call) => self.callable(call),
            Expression::Eval(inner) => {
                self.w.write("eval(");
                self.expression(&inner.node);
                self.w.write(")");
            }
            Expression::Paren(inner) => {
                self.w.write("(");
                self.expression(&inner.node);
                self.w.write(")");
            }
            Expression::Unary(op, operand) => {
                self.w.write(op.as_str());
                if op.is_word() {
                    self.w.write(" ");
                }
                self.expression(&operand.node);
            }
            Expression::Binary(left, op, right) => {
                self.expression(&left.node);
                self.w.write(" ");
                self.w.write(op.as_str());
                self.w.write(" ");
                self.expression(&right.node);
            }
            Expression::Index(base, index) => {
                self.expression(&base.node);
                self.w.write("[");
                self.expression(&index.node);
                self.w.write("]");
            }
        }
    }

    fn callable(&mut self, call: &CallableExpr) {
        match &call.target {
            CallTarget::Procedure(name) => self.w.write(name),
            CallTarget::Tool(path) => {
                self.w.write("tool.");
                self.w.write(&path.dotted());
            }
            CallTarget::Builtin(b) => self.w.write(builtins::as_str(*b)),
        }
        self.w.write("(");
        for (i, arg) in call.args.iter().enumerate() {
            if i > 0 {
                self.w.write(", ");
            }
            self.expression(&arg.node);
        }
        self.w.write(")");
    }

    fn literal(&mut self, lit: &Literal) {
        match lit {
            Literal::String(s) => self.string(s),
            Literal::TripleString(s) => {
                self.w.write("```");
                // Raw body; must not re-indent embedded lines.
                self.w.output.push_str(s);
                self.w.write("```");
            }
            Literal::Number(n) => self.w.write(&format_number(*n)),
            Literal::Bool(true) => self.w.write("true"),
            Literal::Bool(false) => self.w.write("false"),
            Literal::Nil => self.w.write("nil"),
            Literal::List(items) => {
                self.w.write("[");
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.w.write(", ");
                    }
                    self.expression(&item.node);
                }
                self.w.write("]");
            }
            Literal::Map(entries) => {
                self.w.write("{");
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        self.w.write(", ");
                    }
                    self.string(&key.node);
                    self.w.write(": ");
                    self.expression(&value.node);
                }
                self.w.write("}");
            }
        }
    }

    /// Single-quoted string with escapes matching the lexer.
    fn string(&mut self, s: &str) {
        let mut out = String::with_capacity(s.len() + 2);
        out.push('\'');
        for c in s.chars() {
            match c {
                '\\' => out.push_str("\\\\"),
                '\'' => out.push_str("\\'"),
                '\n' => out.push_str("\\n"),
                '\t' => out.push_str("\\t"),
                '\r' => out.push_str("\\r"),
                _ => out.push(c),
            }
        }
        out.push('\'');
        self.w.write(&out);
    }
}

/// `f64` in the shortest form the lexer reads back to the same value.
fn format_number(n: f64) -> String {
    if n == n.trunc() && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_source;

    fn canonical(source: &str) -> String {
        render(&parse_source(source).expect("test source should parse"))
    }

    #[test]
    fn test_render_is_fixed_point_of_parse() {
        let sources = [
            "func add\nneeds a, b\nreturns total\nset total = a + b\nreturn total\nendfunc\n",
            "## version: 3\ncommand\n## name: restock\nset a = [1, 2]\ncall tool.inventory.check(a)\nendcommand\n",
            "on event sensor named 'alarm' as payload do\nif payload > 10\nemit payload named 'metrics'\nelse\nclear_event\nendif\nendon\n",
            "func t\nmust -2 ** 2 == 4 or not done\nask 'proceed?'\nendfunc\n",
        ];
        for source in sources {
            let once = canonical(source);
            let twice = canonical(&once);
            assert_eq!(once, twice, "canonical form should be stable for {:?}", source);
        }
    }

    #[test]
    fn test_render_statement_shapes() {
        let program = parse_source("func t\nset a[0].b, c = 1 + 2 * 3\nendfunc\n").unwrap();
        let Some(ScriptBody::Library(lib)) = &program.body else {
            panic!("expected library script");
        };
        let LibraryBlock::Procedure(p) = &lib.blocks[0].node else {
            panic!("expected procedure");
        };
        assert_eq!(
            render_statement(&p.body[0].node),
            "set a[0].b, c = 1 + 2 * 3"
        );
    }

    #[test]
    fn test_string_escapes_round_trip() {
        let source = "func t\nemit 'it\\'s\\na test'\nendfunc\n";
        let once = canonical(source);
        assert!(once.contains("\\'"));
        assert_eq!(once, canonical(&once));
    }

    #[test]
    fn test_number_formatting() {
        assert_eq!(format_number(42.0), "42");
        assert_eq!(format_number(3.5), "3.5");
        assert_eq!(format_number(-1.0), "-1");
    }
}
