//! Grammar dialect configuration.
//!
//! The Drover grammar has shipped in three editions, and the parser accepts
//! all of them through one code path. A [`Dialect`] is the set of capability
//! switches the parser consults; it can be derived from an
//! [`Edition`](drover_core::lang::editions::Edition) or built by hand for
//! tooling that wants a particular mix.

use drover_core::lang::editions::Edition;

/// Capability switches for the parser.
///
/// The default dialect is the permissive superset: every construct from every
/// edition is accepted, and no edition-specific restriction applies. This is
/// what editors and formatters want; execution environments pin an edition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    /// Accept `command ... endcommand` scripts.
    pub command_scripts: bool,
    /// Accept `mustbe` as an alias for `must`.
    pub mustbe_alias: bool,
    /// Treat `len` as a builtin callable rather than a plain identifier.
    pub len_callable: bool,
    /// Restrict handler blocks inside command blocks to `on error` only.
    pub handlers_in_commands_restricted: bool,
}

impl Dialect {
    /// The dialect of a specific grammar edition.
    pub fn edition(edition: Edition) -> Self {
        Self {
            command_scripts: edition >= Edition::V2,
            mustbe_alias: edition < Edition::V3,
            len_callable: edition >= Edition::V3,
            handlers_in_commands_restricted: edition == Edition::V2,
        }
    }
}

impl Default for Dialect {
    fn default() -> Self {
        Self {
            command_scripts: true,
            mustbe_alias: true,
            len_callable: true,
            handlers_in_commands_restricted: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edition_capabilities() {
        let v1 = Dialect::edition(Edition::V1);
        assert!(!v1.command_scripts);
        assert!(v1.mustbe_alias);
        assert!(!v1.len_callable);

        let v2 = Dialect::edition(Edition::V2);
        assert!(v2.command_scripts);
        assert!(v2.handlers_in_commands_restricted);

        let v3 = Dialect::edition(Edition::V3);
        assert!(v3.len_callable);
        assert!(!v3.mustbe_alias);
        assert!(!v3.handlers_in_commands_restricted);
    }

    #[test]
    fn test_default_is_permissive() {
        let d = Dialect::default();
        assert!(d.command_scripts && d.mustbe_alias && d.len_callable);
        assert!(!d.handlers_in_commands_restricted);
    }
}
