//! Shared syntax frontend for the Drover language: lexer, parser, AST, diagnostics.
//!
//! This crate is dependency-light and intended for reuse across the interpreter, formatter, and future interactive
//! tooling.
//!
//! ## Notes
//! - This crate is intentionally “syntax-only”: it does not do name resolution, evaluation, or tool dispatch.
//! - Vocabulary identity (keywords/operators/punctuation/builtins) comes from `drover_core::lang` registries.
//! - Grammar editions are selected through [`dialect::Dialect`]; the default accepts every construct.
//!
//! ## Examples
//! ```rust,no_run
//! use drover_syntax::{lexer, parser};
//!
//! let tokens = lexer::lex("func greet\nemit 'hello'\nendfunc\n").unwrap();
//! let program = parser::parse(&tokens).unwrap();
//! assert!(program.body.is_some());
//! ```
//!
//! ## See also
//! - `drover_core::lang` for registry-backed language vocabulary (keywords/operators/punctuation/builtins).

pub mod ast;
pub mod diagnostics;
pub mod dialect;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod token_helpers;

pub use dialect::Dialect;
pub use parser::{parse_source, parse_source_with};
