//! Define the reserved keyword vocabulary for the Drover language.
//!
//! This module is the single source of truth for reserved words: a stable
//! identifier ([`KeywordId`]) plus a const metadata table ([`KEYWORDS`]) that
//! records canonical spellings, categories, and edition provenance.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - This registry is intentionally **pure** (no AST/IO/side effects).
//! - Some reserved words are also "word operators" (e.g. `and`, `typeof`). If
//!   you need operator precedence/fixity, use [`crate::lang::operators`].
//!
//! ## Examples
//! ```rust
//! use drover_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("func"), Some(KeywordId::Func));
//! assert_eq!(keywords::as_str(KeywordId::Func), "func");
//! ```

use super::editions::Edition;

/// Stable identifier for every reserved keyword.
///
/// ## Notes
/// - The canonical spelling is accessible via [`as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    // Control flow
    If,
    Else,
    EndIf,
    While,
    EndWhile,
    For,
    Each,
    In,
    EndFor,
    Break,
    Continue,
    Return,

    // Simple statements
    Set,
    Call,
    Ask,
    Emit,
    Must,
    MustBe,
    Fail,
    ClearError,
    ClearEvent,
    Clear,

    // Blocks and handlers
    Func,
    EndFunc,
    Command,
    EndCommand,
    On,
    EndOn,
    Error,
    Event,
    Do,
    Named,
    As,

    // Procedure signatures
    Needs,
    Optional,
    Returns,

    // Word operators
    And,
    Or,
    Not,
    No,
    Some,
    Typeof,

    // Expression values
    Eval,
    Last,
    Tool,

    // Literals
    True,
    False,
    Nil,
}

/// High-level grouping for documentation and tooling.
///
/// ## Notes
/// - Categories are metadata only; they do not enforce parsing context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    ControlFlow,
    Statement,
    Block,
    Signature,
    Operator,
    Value,
    Literal,
}

/// Metadata for a keyword.
///
/// ## Notes
/// - `introduced` is the grammar edition that added the word.
/// - `superseded_in` marks legacy spellings that later editions reject
///   (e.g. `mustbe`, replaced by `must`).
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
    pub category: KeywordCategory,
    pub introduced: Edition,
    pub superseded_in: Option<Edition>,
}

/// Registry of all keywords.
///
/// ## Notes
/// - The ordering is not semantically meaningful, but is grouped for readability.
pub const KEYWORDS: &[KeywordInfo] = &[
    // Control flow
    info(KeywordId::If, "if", KeywordCategory::ControlFlow, Edition::V1),
    info(KeywordId::Else, "else", KeywordCategory::ControlFlow, Edition::V1),
    info(KeywordId::EndIf, "endif", KeywordCategory::ControlFlow, Edition::V1),
    info(KeywordId::While, "while", KeywordCategory::ControlFlow, Edition::V1),
    info(KeywordId::EndWhile, "endwhile", KeywordCategory::ControlFlow, Edition::V1),
    info(KeywordId::For, "for", KeywordCategory::ControlFlow, Edition::V1),
    info(KeywordId::Each, "each", KeywordCategory::ControlFlow, Edition::V1),
    info(KeywordId::In, "in", KeywordCategory::ControlFlow, Edition::V1),
    info(KeywordId::EndFor, "endfor", KeywordCategory::ControlFlow, Edition::V1),
    info(KeywordId::Break, "break", KeywordCategory::ControlFlow, Edition::V1),
    info(KeywordId::Continue, "continue", KeywordCategory::ControlFlow, Edition::V1),
    info(KeywordId::Return, "return", KeywordCategory::ControlFlow, Edition::V1),
    // Simple statements
    info(KeywordId::Set, "set", KeywordCategory::Statement, Edition::V1),
    info(KeywordId::Call, "call", KeywordCategory::Statement, Edition::V1),
    info(KeywordId::Ask, "ask", KeywordCategory::Statement, Edition::V1),
    info(KeywordId::Emit, "emit", KeywordCategory::Statement, Edition::V1),
    info(KeywordId::Must, "must", KeywordCategory::Statement, Edition::V1),
    superseded(
        KeywordId::MustBe,
        "mustbe",
        KeywordCategory::Statement,
        Edition::V1,
        Edition::V3,
    ),
    info(KeywordId::Fail, "fail", KeywordCategory::Statement, Edition::V1),
    info(KeywordId::ClearError, "clear_error", KeywordCategory::Statement, Edition::V1),
    info(KeywordId::ClearEvent, "clear_event", KeywordCategory::Statement, Edition::V1),
    info(KeywordId::Clear, "clear", KeywordCategory::Statement, Edition::V1),
    // Blocks and handlers
    info(KeywordId::Func, "func", KeywordCategory::Block, Edition::V1),
    info(KeywordId::EndFunc, "endfunc", KeywordCategory::Block, Edition::V1),
    info(KeywordId::Command, "command", KeywordCategory::Block, Edition::V2),
    info(KeywordId::EndCommand, "endcommand", KeywordCategory::Block, Edition::V2),
    info(KeywordId::On, "on", KeywordCategory::Block, Edition::V1),
    info(KeywordId::EndOn, "endon", KeywordCategory::Block, Edition::V1),
    info(KeywordId::Error, "error", KeywordCategory::Block, Edition::V1),
    info(KeywordId::Event, "event", KeywordCategory::Block, Edition::V1),
    info(KeywordId::Do, "do", KeywordCategory::Block, Edition::V1),
    info(KeywordId::Named, "named", KeywordCategory::Block, Edition::V1),
    info(KeywordId::As, "as", KeywordCategory::Block, Edition::V1),
    // Procedure signatures
    info(KeywordId::Needs, "needs", KeywordCategory::Signature, Edition::V1),
    info(KeywordId::Optional, "optional", KeywordCategory::Signature, Edition::V1),
    info(KeywordId::Returns, "returns", KeywordCategory::Signature, Edition::V1),
    // Word operators
    info(KeywordId::And, "and", KeywordCategory::Operator, Edition::V1),
    info(KeywordId::Or, "or", KeywordCategory::Operator, Edition::V1),
    info(KeywordId::Not, "not", KeywordCategory::Operator, Edition::V1),
    info(KeywordId::No, "no", KeywordCategory::Operator, Edition::V1),
    info(KeywordId::Some, "some", KeywordCategory::Operator, Edition::V1),
    info(KeywordId::Typeof, "typeof", KeywordCategory::Operator, Edition::V1),
    // Expression values
    info(KeywordId::Eval, "eval", KeywordCategory::Value, Edition::V1),
    info(KeywordId::Last, "last", KeywordCategory::Value, Edition::V1),
    info(KeywordId::Tool, "tool", KeywordCategory::Value, Edition::V1),
    // Literals
    info(KeywordId::True, "true", KeywordCategory::Literal, Edition::V1),
    info(KeywordId::False, "false", KeywordCategory::Literal, Edition::V1),
    info(KeywordId::Nil, "nil", KeywordCategory::Literal, Edition::V1),
];

/// Return the canonical spelling for a keyword.
pub fn as_str(id: KeywordId) -> &'static str {
    info_for(id).canonical
}

/// Return the category for a keyword.
pub fn category(id: KeywordId) -> KeywordCategory {
    info_for(id).category
}

/// Return the full metadata entry for a keyword.
///
/// ## Panics
/// Panics if the registry is missing an entry, which would be a bug caught by
/// the parity test below.
pub fn info_for(id: KeywordId) -> &'static KeywordInfo {
    KEYWORDS
        .iter()
        .find(|k| k.id == id)
        .unwrap_or_else(|| panic!("keyword registry is missing an entry for {:?}", id))
}

/// Resolve a spelling to a keyword id, if reserved.
pub fn from_str(s: &str) -> Option<KeywordId> {
    KEYWORDS.iter().find(|k| k.canonical == s).map(|k| k.id)
}

const fn info(
    id: KeywordId,
    canonical: &'static str,
    category: KeywordCategory,
    introduced: Edition,
) -> KeywordInfo {
    KeywordInfo {
        id,
        canonical,
        category,
        introduced,
        superseded_in: None,
    }
}

const fn superseded(
    id: KeywordId,
    canonical: &'static str,
    category: KeywordCategory,
    introduced: Edition,
    superseded_in: Edition,
) -> KeywordInfo {
    KeywordInfo {
        id,
        canonical,
        category,
        introduced,
        superseded_in: Some(superseded_in),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_every_entry() {
        for k in KEYWORDS {
            assert_eq!(from_str(k.canonical), Some(k.id), "spelling {:?}", k.canonical);
            assert_eq!(as_str(k.id), k.canonical);
        }
    }

    #[test]
    fn test_no_duplicate_spellings() {
        for (i, a) in KEYWORDS.iter().enumerate() {
            for b in &KEYWORDS[i + 1..] {
                assert_ne!(a.canonical, b.canonical, "duplicate spelling {:?}", a.canonical);
            }
        }
    }

    #[test]
    fn test_legacy_spelling_is_superseded() {
        let mustbe = info_for(KeywordId::MustBe);
        assert_eq!(mustbe.superseded_in, Some(Edition::V3));
        assert!(info_for(KeywordId::Must).superseded_in.is_none());
    }

    #[test]
    fn test_command_blocks_are_second_generation() {
        assert_eq!(info_for(KeywordId::Command).introduced, Edition::V2);
        assert_eq!(info_for(KeywordId::EndCommand).introduced, Edition::V2);
    }

    #[test]
    fn test_non_keywords() {
        assert_eq!(from_str("function"), None);
        assert_eq!(from_str("SET"), None, "lookup is case-sensitive");
        assert_eq!(from_str(""), None);
    }
}
