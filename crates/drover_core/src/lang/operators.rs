//! Operator vocabulary.
//!
//! This module defines the canonical operator set (symbol operators like `+`
//! and word operators like `and`) along with precedence, associativity, and
//! fixity metadata. The parser's expression ladder must stay consistent with
//! the precedence recorded here; a parity test on the syntax crate asserts it.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - Word-operator spellings (`and`, `or`, `not`, `no`, `some`, `typeof`)
//!   also appear in the keyword registry ([`crate::lang::keywords`]); use this
//!   module when you need operator semantics like precedence.
//!
//! ## Examples
//! ```rust
//! use drover_core::lang::operators::{self, OperatorId};
//!
//! assert_eq!(operators::from_str("**"), Some(OperatorId::StarStar));
//! assert!(operators::info_for(OperatorId::StarStar).precedence
//!     > operators::info_for(OperatorId::Star).precedence);
//! ```

use super::editions::Edition;

/// Define how operators associate when chained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
    Right,
    None,
}

/// Define whether an operator is infix (binary) or prefix (unary).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fixity {
    Infix,
    Prefix,
}

/// Stable identifier for every operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorId {
    // Arithmetic
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    StarStar,

    // Comparison
    EqEq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,

    // Bitwise
    Pipe,
    Caret,
    Amp,
    Tilde,

    // Assignment (statement context only, via `set`)
    Assign,

    // Word operators
    And,
    Or,
    Not,
    No,
    Some,
    Typeof,
}

/// Metadata for an operator.
///
/// ## Notes
/// - `precedence` is a relative ordering where higher binds tighter. The
///   absolute scale is an implementation detail, but must be consistent with
///   the parser's expression ladder.
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub id: OperatorId,
    pub spelling: &'static str,
    pub precedence: u8,
    pub associativity: Associativity,
    pub fixity: Fixity,
    pub is_keyword_spelling: bool,
    pub introduced: Edition,
}

/// Registry of all operators, grouped by the expression ladder's levels.
pub const OPERATORS: &[OperatorInfo] = &[
    // Logical (levels 1-2)
    word(OperatorId::Or, "or", 10, Associativity::Left, Fixity::Infix),
    word(OperatorId::And, "and", 20, Associativity::Left, Fixity::Infix),
    // Bitwise (levels 3-5)
    op(OperatorId::Pipe, "|", 30, Associativity::Left, Fixity::Infix),
    op(OperatorId::Caret, "^", 40, Associativity::Left, Fixity::Infix),
    op(OperatorId::Amp, "&", 50, Associativity::Left, Fixity::Infix),
    // Equality (level 6)
    op(OperatorId::EqEq, "==", 60, Associativity::Left, Fixity::Infix),
    op(OperatorId::NotEq, "!=", 60, Associativity::Left, Fixity::Infix),
    // Relational (level 7)
    op(OperatorId::Gt, ">", 70, Associativity::Left, Fixity::Infix),
    op(OperatorId::Lt, "<", 70, Associativity::Left, Fixity::Infix),
    op(OperatorId::GtEq, ">=", 70, Associativity::Left, Fixity::Infix),
    op(OperatorId::LtEq, "<=", 70, Associativity::Left, Fixity::Infix),
    // Additive (level 8)
    op(OperatorId::Plus, "+", 80, Associativity::Left, Fixity::Infix),
    op(OperatorId::Minus, "-", 80, Associativity::Left, Fixity::Infix),
    // Multiplicative (level 9)
    op(OperatorId::Star, "*", 90, Associativity::Left, Fixity::Infix),
    op(OperatorId::Slash, "/", 90, Associativity::Left, Fixity::Infix),
    op(OperatorId::Percent, "%", 90, Associativity::Left, Fixity::Infix),
    // Power (level 11) - right-associative, over a unary left operand
    op(OperatorId::StarStar, "**", 100, Associativity::Right, Fixity::Infix),
    // Unary prefix (level 10); Minus is listed above with its infix identity,
    // the parser reuses the token in prefix position.
    op(OperatorId::Tilde, "~", 110, Associativity::Right, Fixity::Prefix),
    word(OperatorId::Not, "not", 110, Associativity::Right, Fixity::Prefix),
    word(OperatorId::No, "no", 110, Associativity::Right, Fixity::Prefix),
    word(OperatorId::Some, "some", 110, Associativity::Right, Fixity::Prefix),
    word(OperatorId::Typeof, "typeof", 110, Associativity::Right, Fixity::Prefix),
    // Assignment is not part of the expression grammar; it only appears in
    // `set` statements.
    op(OperatorId::Assign, "=", 0, Associativity::None, Fixity::Infix),
];

/// Return the full metadata entry for an operator.
///
/// ## Panics
/// Panics if the registry is missing an entry, which would be a bug caught by
/// the parity test below.
pub fn info_for(id: OperatorId) -> &'static OperatorInfo {
    OPERATORS
        .iter()
        .find(|o| o.id == id)
        .unwrap_or_else(|| panic!("operator registry is missing an entry for {:?}", id))
}

/// Return the canonical spelling for an operator.
pub fn as_str(id: OperatorId) -> &'static str {
    info_for(id).spelling
}

/// Resolve a spelling to an operator id.
pub fn from_str(spelling: &str) -> Option<OperatorId> {
    OPERATORS.iter().find(|o| o.spelling == spelling).map(|o| o.id)
}

const fn op(
    id: OperatorId,
    spelling: &'static str,
    precedence: u8,
    associativity: Associativity,
    fixity: Fixity,
) -> OperatorInfo {
    OperatorInfo {
        id,
        spelling,
        precedence,
        associativity,
        fixity,
        is_keyword_spelling: false,
        introduced: Edition::V1,
    }
}

const fn word(
    id: OperatorId,
    spelling: &'static str,
    precedence: u8,
    associativity: Associativity,
    fixity: Fixity,
) -> OperatorInfo {
    OperatorInfo {
        id,
        spelling,
        precedence,
        associativity,
        fixity,
        is_keyword_spelling: true,
        introduced: Edition::V1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_every_entry() {
        for o in OPERATORS {
            assert_eq!(from_str(o.spelling), Some(o.id), "spelling {:?}", o.spelling);
            assert_eq!(as_str(o.id), o.spelling);
        }
    }

    #[test]
    fn test_power_is_right_associative_and_tighter_than_multiplicative() {
        let pow = info_for(OperatorId::StarStar);
        assert_eq!(pow.associativity, Associativity::Right);
        assert!(pow.precedence > info_for(OperatorId::Star).precedence);
    }

    #[test]
    fn test_ladder_ordering() {
        // or < and < | < ^ < & < == < relational < additive < multiplicative < **
        let ladder = [
            OperatorId::Or,
            OperatorId::And,
            OperatorId::Pipe,
            OperatorId::Caret,
            OperatorId::Amp,
            OperatorId::EqEq,
            OperatorId::Lt,
            OperatorId::Plus,
            OperatorId::Star,
            OperatorId::StarStar,
        ];
        for pair in ladder.windows(2) {
            assert!(
                info_for(pair[0]).precedence < info_for(pair[1]).precedence,
                "{:?} should bind looser than {:?}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_word_operators_are_flagged() {
        for id in [
            OperatorId::And,
            OperatorId::Or,
            OperatorId::Not,
            OperatorId::No,
            OperatorId::Some,
            OperatorId::Typeof,
        ] {
            assert!(info_for(id).is_keyword_spelling, "{:?} is spelled as a word", id);
        }
        assert!(!info_for(OperatorId::Plus).is_keyword_spelling);
    }
}
