//! Provide the canonical, pure language vocabulary for the Drover frontend and tooling.
//!
//! This crate is intentionally small and dependency-free. It contains the
//! registry-backed vocabularies (keywords, operators, punctuation, builtin
//! callables) plus the grammar-edition tags that the parser's dialect layer is
//! derived from.
//!
//! ## Notes
//!
//! - This is a "vocabulary core" crate: **no IO**, no global state, and no
//!   AST or parser types.
//! - The lexer/parser enforce syntax; registries provide spellings and
//!   metadata for shared use (diagnostics, docs, highlighting).

pub mod lang;
