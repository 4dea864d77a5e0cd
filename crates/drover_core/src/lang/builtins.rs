//! Builtin callable vocabulary.
//!
//! Drover reserves a fixed set of function-like keywords for builtin math
//! helpers plus `len`. They are callable only (always followed by an argument
//! list) and are distinct from user procedures and external tools.
//!
//! ## Notes
//! - Arity here is metadata for diagnostics and docs; the parser accepts any
//!   argument count and leaves arity checking to later stages.
//! - `len` joined the vocabulary in [`Edition::V3`]; in earlier editions the
//!   spelling is an ordinary identifier.
//!
//! ## Examples
//! ```rust
//! use drover_core::lang::builtins::{self, BuiltinFn};
//! use drover_core::lang::editions::Edition;
//!
//! assert_eq!(builtins::from_str("sqrt"), Some(BuiltinFn::Sqrt));
//! assert!(!builtins::available_in(BuiltinFn::Len, Edition::V2));
//! assert!(builtins::available_in(BuiltinFn::Len, Edition::V3));
//! ```

use super::editions::Edition;

/// Stable identifier for every builtin callable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinFn {
    Abs,
    Ceil,
    Floor,
    Round,
    Sqrt,
    Min,
    Max,
    Sum,
    Rand,
    Len,
}

/// Expected argument count, for diagnostics and documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    Exact(u8),
    AtLeast(u8),
}

/// Metadata for a builtin callable.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinInfo {
    pub id: BuiltinFn,
    pub canonical: &'static str,
    pub arity: Arity,
    pub introduced: Edition,
}

/// Registry of all builtin callables.
pub const BUILTINS: &[BuiltinInfo] = &[
    info(BuiltinFn::Abs, "abs", Arity::Exact(1), Edition::V1),
    info(BuiltinFn::Ceil, "ceil", Arity::Exact(1), Edition::V1),
    info(BuiltinFn::Floor, "floor", Arity::Exact(1), Edition::V1),
    info(BuiltinFn::Round, "round", Arity::Exact(1), Edition::V1),
    info(BuiltinFn::Sqrt, "sqrt", Arity::Exact(1), Edition::V1),
    info(BuiltinFn::Min, "min", Arity::AtLeast(1), Edition::V1),
    info(BuiltinFn::Max, "max", Arity::AtLeast(1), Edition::V1),
    info(BuiltinFn::Sum, "sum", Arity::AtLeast(1), Edition::V1),
    info(BuiltinFn::Rand, "rand", Arity::Exact(0), Edition::V1),
    info(BuiltinFn::Len, "len", Arity::Exact(1), Edition::V3),
];

/// Return the canonical spelling for a builtin.
pub fn as_str(id: BuiltinFn) -> &'static str {
    info_for(id).canonical
}

/// Return the full metadata entry for a builtin.
///
/// ## Panics
/// Panics if the registry is missing an entry, which would be a bug caught by
/// the parity test below.
pub fn info_for(id: BuiltinFn) -> &'static BuiltinInfo {
    BUILTINS
        .iter()
        .find(|b| b.id == id)
        .unwrap_or_else(|| panic!("builtin registry is missing an entry for {:?}", id))
}

/// Resolve a spelling to a builtin id.
pub fn from_str(s: &str) -> Option<BuiltinFn> {
    BUILTINS.iter().find(|b| b.canonical == s).map(|b| b.id)
}

/// Return `true` if the builtin exists in the given grammar edition.
pub fn available_in(id: BuiltinFn, edition: Edition) -> bool {
    edition.includes(info_for(id).introduced)
}

const fn info(id: BuiltinFn, canonical: &'static str, arity: Arity, introduced: Edition) -> BuiltinInfo {
    BuiltinInfo {
        id,
        canonical,
        arity,
        introduced,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_every_entry() {
        for b in BUILTINS {
            assert_eq!(from_str(b.canonical), Some(b.id));
            assert_eq!(as_str(b.id), b.canonical);
        }
    }

    #[test]
    fn test_len_is_third_generation() {
        assert!(!available_in(BuiltinFn::Len, Edition::V1));
        assert!(!available_in(BuiltinFn::Len, Edition::V2));
        assert!(available_in(BuiltinFn::Len, Edition::V3));
    }

    #[test]
    fn test_math_builtins_available_everywhere() {
        for b in BUILTINS.iter().filter(|b| b.id != BuiltinFn::Len) {
            assert!(available_in(b.id, Edition::V1), "{:?}", b.id);
        }
    }

    #[test]
    fn test_builtins_do_not_shadow_keywords() {
        use crate::lang::keywords;
        for b in BUILTINS {
            assert_eq!(keywords::from_str(b.canonical), None, "{:?}", b.canonical);
        }
    }
}
