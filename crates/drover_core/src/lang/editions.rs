//! Grammar editions of the Drover language.
//!
//! Drover's surface grammar evolved in three generations. Rather than keeping
//! three parsers, the frontend implements the superset grammar and gates
//! generation-specific constructs behind a dialect configuration. Each
//! vocabulary registry records the edition that introduced an item so the
//! gates stay anchored to one source of truth.
//!
//! ## Notes
//! - Editions are totally ordered: `V1 < V2 < V3`.
//! - [`Edition::LATEST`] is the default edition for new scripts.

use std::fmt;

/// A grammar generation of the Drover language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Edition {
    /// First generation: library scripts only, `mustbe` assertion spelling.
    V1,
    /// Second generation: adds command scripts; command blocks accept only
    /// `on error` handlers.
    V2,
    /// Third generation: adds the `len` builtin callable and lifts the
    /// command-block handler restriction.
    V3,
}

impl Edition {
    /// The newest grammar edition.
    pub const LATEST: Edition = Edition::V3;

    /// Canonical spelling used in diagnostics and metadata headers.
    pub fn as_str(self) -> &'static str {
        match self {
            Edition::V1 => "v1",
            Edition::V2 => "v2",
            Edition::V3 => "v3",
        }
    }

    /// Parse an edition tag as written in script metadata.
    pub fn from_str(s: &str) -> Option<Edition> {
        match s {
            "v1" | "1" => Some(Edition::V1),
            "v2" | "2" => Some(Edition::V2),
            "v3" | "3" => Some(Edition::V3),
            _ => None,
        }
    }

    /// Return `true` if an item introduced in `introduced` is available here.
    pub fn includes(self, introduced: Edition) -> bool {
        self >= introduced
    }
}

impl fmt::Display for Edition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edition_ordering() {
        assert!(Edition::V1 < Edition::V2);
        assert!(Edition::V2 < Edition::V3);
        assert_eq!(Edition::LATEST, Edition::V3);
    }

    #[test]
    fn test_edition_round_trip() {
        for e in [Edition::V1, Edition::V2, Edition::V3] {
            assert_eq!(Edition::from_str(e.as_str()), Some(e));
        }
        assert_eq!(Edition::from_str("v4"), None);
    }

    #[test]
    fn test_includes() {
        assert!(Edition::V3.includes(Edition::V1));
        assert!(!Edition::V1.includes(Edition::V2));
        assert!(Edition::V2.includes(Edition::V2));
    }
}
