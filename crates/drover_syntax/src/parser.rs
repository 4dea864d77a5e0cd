//! Parser for Drover source code.
//!
//! Converts a token stream into a [`Program`] AST: a file header followed by
//! either a library script (procedure and handler definitions) or a command
//! script (sequential `command` blocks).
//!
//! ## Examples
//!
//! ```rust,no_run
//! use drover_syntax::{lexer, parser};
//!
//! let source = "func greet\nemit \"hello\"\nendfunc\n";
//! let tokens = lexer::lex(source).unwrap();
//! let ast = parser::parse(&tokens).unwrap();
//! assert!(ast.body.is_some());
//! ```

use crate::ast::*;
use crate::diagnostics::{Diagnostic, Severity};
use crate::dialect::Dialect;
use crate::lexer::{Token, TokenKind};
use drover_core::lang::builtins::BuiltinFn;
use drover_core::lang::keywords::KeywordId;
use drover_core::lang::operators::OperatorId;
use drover_core::lang::punctuation::PunctuationId;
use drover_core::lang::{builtins, keywords, operators, punctuation};

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/script.rs");
include!("parser/stmts.rs");
include!("parser/expr.rs");
include!("parser/util.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
