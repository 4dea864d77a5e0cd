//! Drover language vocabulary registries.
//!
//! This module is the front door for language-level vocabulary: reserved
//! keywords, operators, punctuation, and builtin callable functions.
//!
//! The design goal is to avoid stringly-typed checks scattered across the
//! frontend and tooling. Callers work with **stable IDs** (e.g. [`keywords::KeywordId`],
//! [`operators::OperatorId`]) and look up spellings/metadata via registry tables.
//!
//! ## Notes
//! - Registries are intentionally **pure**: no AST types, no IO, no side effects.
//! - Every registry entry records the grammar [`editions::Edition`] that
//!   introduced it; the parser's dialect layer derives its capability flags
//!   from these tags.
//!
//! ## Examples
//! ```rust
//! use drover_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("endfor"), Some(KeywordId::EndFor));
//! assert_eq!(keywords::as_str(KeywordId::EndFor), "endfor");
//! ```

pub mod builtins;
pub mod editions;
pub mod keywords;
pub mod operators;
pub mod punctuation;
