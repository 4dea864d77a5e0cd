//! Punctuation vocabulary.
//!
//! This module defines the canonical set of non-operator punctuation tokens
//! used by the lexer/parser: delimiters, separators, and the field-access
//! marker.
//!
//! ## Notes
//! - This module is vocabulary only (spellings + metadata). It does not
//!   tokenize source text.
//!
//! ## Examples
//! ```rust
//! use drover_core::lang::punctuation::{self, PunctuationId};
//!
//! assert_eq!(punctuation::from_str("["), Some(PunctuationId::LBracket));
//! assert_eq!(punctuation::as_str(PunctuationId::Comma), ",");
//! ```

use super::editions::Edition;

/// Broad syntactic grouping for punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationCategory {
    /// Brackets and braces.
    Delimiter,
    /// Separators like `,` and `:`.
    Separator,
    /// Access markers like `.`.
    Access,
}

/// Stable identifier for punctuation tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationId {
    Comma,
    Colon,
    Dot,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
}

/// Metadata for a punctuation token.
#[derive(Debug, Clone, Copy)]
pub struct PunctuationInfo {
    pub id: PunctuationId,
    pub spelling: &'static str,
    pub category: PunctuationCategory,
    pub introduced: Edition,
}

/// Registry of all punctuation tokens.
pub const PUNCTUATION: &[PunctuationInfo] = &[
    info(PunctuationId::Comma, ",", PunctuationCategory::Separator),
    info(PunctuationId::Colon, ":", PunctuationCategory::Separator),
    info(PunctuationId::Dot, ".", PunctuationCategory::Access),
    info(PunctuationId::LParen, "(", PunctuationCategory::Delimiter),
    info(PunctuationId::RParen, ")", PunctuationCategory::Delimiter),
    info(PunctuationId::LBracket, "[", PunctuationCategory::Delimiter),
    info(PunctuationId::RBracket, "]", PunctuationCategory::Delimiter),
    info(PunctuationId::LBrace, "{", PunctuationCategory::Delimiter),
    info(PunctuationId::RBrace, "}", PunctuationCategory::Delimiter),
];

/// Return the canonical spelling for a punctuation token.
pub fn as_str(id: PunctuationId) -> &'static str {
    info_for(id).spelling
}

/// Return the category for a punctuation token.
pub fn category(id: PunctuationId) -> PunctuationCategory {
    info_for(id).category
}

/// Return the full metadata entry for a punctuation token.
///
/// ## Panics
/// Panics if the registry is missing an entry, which would be a bug caught by
/// the parity test below.
pub fn info_for(id: PunctuationId) -> &'static PunctuationInfo {
    PUNCTUATION
        .iter()
        .find(|p| p.id == id)
        .unwrap_or_else(|| panic!("punctuation registry is missing an entry for {:?}", id))
}

/// Resolve a spelling to a punctuation id.
pub fn from_str(s: &str) -> Option<PunctuationId> {
    PUNCTUATION.iter().find(|p| p.spelling == s).map(|p| p.id)
}

const fn info(id: PunctuationId, spelling: &'static str, category: PunctuationCategory) -> PunctuationInfo {
    PunctuationInfo {
        id,
        spelling,
        category,
        introduced: Edition::V1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_every_entry() {
        for p in PUNCTUATION {
            assert_eq!(from_str(p.spelling), Some(p.id));
            assert_eq!(as_str(p.id), p.spelling);
        }
    }

    #[test]
    fn test_delimiters_come_in_pairs() {
        let delims: Vec<_> = PUNCTUATION
            .iter()
            .filter(|p| p.category == PunctuationCategory::Delimiter)
            .collect();
        assert_eq!(delims.len() % 2, 0);
    }
}
