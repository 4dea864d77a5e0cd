//! Property-based tests for the Drover frontend
//!
//! These tests use proptest to verify invariants across many randomly
//! generated inputs, catching edge cases that hand-written tests might miss.

use drover_core::lang::{builtins, keywords};
use drover_syntax::parser;
use drover_syntax::printer::render;
use proptest::prelude::*;

fn canonical(source: &str) -> String {
    render(&parser::parse_source(source).expect("source should parse"))
}

// =============================================================================
// Render Properties
// =============================================================================

/// Property: Rendering is idempotent (render(parse(render(parse(x)))) is stable)
#[test]
fn render_is_idempotent_simple() {
    let source = "\
## version: 3
func restock
needs item, count
optional warehouse
returns receipt
## owner: logistics
set receipt = tool.inventory.add(item, count)
if receipt['status'] != 'ok'
fail 'restock rejected'
endif
return receipt
endfunc

on event low_stock named 'alerts' as payload do
emit payload named 'audit'
clear_event
endon
";

    let rendered1 = canonical(source);
    let rendered2 = canonical(&rendered1);

    assert_eq!(rendered1, rendered2, "Rendering should be idempotent");
}

/// Property: Rendering preserves structure (same block and statement counts)
#[test]
fn render_preserves_structure() {
    use drover_syntax::ast::ScriptBody;

    let source = "\
func first
return 1
endfunc

func second
set a = [1, 2, {'k': 3}]
emit a
endfunc
";

    let before = parser::parse_source(source).expect("parse original failed");
    let after = parser::parse_source(&render(&before)).expect("parse rendered failed");

    let blocks = |p: &drover_syntax::ast::Program| match &p.body {
        Some(ScriptBody::Library(lib)) => lib.blocks.len(),
        Some(ScriptBody::Command(script)) => script.blocks.len(),
        None => 0,
    };
    assert_eq!(blocks(&before), blocks(&after), "Rendering changed block count");
}

/// Property: Empty or metadata-only input renders without error
#[test]
fn render_handles_empty_input() {
    for source in ["", "\n\n\n", "## title: notes\n", "## a\n## b\n\n"] {
        let program = parser::parse_source(source).expect("empty-ish input should parse");
        let rendered = render(&program);
        let reparsed = parser::parse_source(&rendered).expect("rendered output should parse");
        assert_eq!(
            program.header.entries.len(),
            reparsed.header.entries.len(),
            "Rendering changed header of {:?}",
            source
        );
    }
}

// =============================================================================
// Proptest Strategies
// =============================================================================

// Strategy for generating valid Drover identifiers
fn ident_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,8}".prop_filter("Not a reserved word", |s| {
        keywords::from_str(s).is_none() && builtins::from_str(s).is_none()
    })
}

// Strategy for generating leaf expressions
fn leaf_expr_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        ident_strategy(),
        (0u32..10_000).prop_map(|n| n.to_string()),
        "[a-z ]{0,12}".prop_map(|s| format!("'{}'", s)),
        Just("true".to_string()),
        Just("false".to_string()),
        Just("nil".to_string()),
        Just("last".to_string()),
    ]
}

// Strategy for generating expressions one operator deep
fn expr_strategy() -> impl Strategy<Value = String> {
    let op = prop_oneof![
        Just("+"),
        Just("-"),
        Just("*"),
        Just("/"),
        Just("%"),
        Just("**"),
        Just("=="),
        Just("!="),
        Just("<"),
        Just(">="),
        Just("and"),
        Just("or"),
        Just("&"),
        Just("|"),
        Just("^"),
    ];
    prop_oneof![
        leaf_expr_strategy(),
        (leaf_expr_strategy(), op, leaf_expr_strategy())
            .prop_map(|(l, op, r)| format!("{} {} {}", l, op, r)),
        leaf_expr_strategy().prop_map(|e| format!("not {}", e)),
        leaf_expr_strategy().prop_map(|e| format!("-{}", e)),
        (leaf_expr_strategy(), leaf_expr_strategy())
            .prop_map(|(a, b)| format!("[{}, {}]", a, b)),
        ident_strategy().prop_map(|name| format!("{{{{{}}}}}", name)),
    ]
}

// Strategy for generating single statements
fn statement_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        (ident_strategy(), expr_strategy()).prop_map(|(name, e)| format!("set {} = {}", name, e)),
        expr_strategy().prop_map(|e| format!("emit {}", e)),
        expr_strategy().prop_map(|e| format!("must {}", e)),
        expr_strategy().prop_map(|e| format!("return {}", e)),
        (ident_strategy(), ident_strategy(), expr_strategy())
            .prop_map(|(a, b, e)| format!("call tool.{}.{}({})", a, b, e)),
        Just("clear_error".to_string()),
        Just("fail".to_string()),
    ]
}

// Strategy for generating complete procedure definitions
fn procedure_strategy() -> impl Strategy<Value = String> {
    (
        ident_strategy(),
        ident_strategy(),
        prop::collection::vec(statement_strategy(), 1..5),
    )
        .prop_map(|(name, param, stmts)| {
            format!("func {}\nneeds {}\n{}\nendfunc\n", name, param, stmts.join("\n"))
        })
}

proptest! {
    /// Property: Generated procedures parse, render, and re-parse
    #[test]
    fn generated_procedures_round_trip(source in procedure_strategy()) {
        let program = parser::parse_source(&source).expect("parse failed");
        let rendered = render(&program);
        let reparsed = parser::parse_source(&rendered).expect("parse rendered failed");
        prop_assert_eq!(render(&reparsed), rendered, "canonical form should be stable");
    }

    /// Property: Generated expressions keep their structure through a round trip
    #[test]
    fn generated_expressions_round_trip(expr in expr_strategy()) {
        let source = format!("func t\nmust {}\nendfunc\n", expr);
        let program = parser::parse_source(&source).expect("parse failed");
        let rendered = render(&program);
        let reparsed = parser::parse_source(&rendered).expect("parse rendered failed");
        prop_assert_eq!(render(&reparsed), rendered, "canonical form should be stable");
    }

    /// Property: Identifiers survive lexing intact
    #[test]
    fn identifiers_survive_lexing(ident in ident_strategy()) {
        use drover_syntax::lexer::{self, tokens::TokenKind};

        let source = format!("set {} = 1\n", ident);
        let tokens = lexer::lex(&source).expect("lex failed");
        prop_assert!(
            tokens.iter().any(|t| matches!(&t.kind, TokenKind::Ident(name) if *name == ident))
        );
    }
}
