//! Store mode resolution and composite precedence.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::DeclarativeResourcesConfig;

/// Which store(s) back a resource kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreMode {
    /// Database only.
    Mutable,
    /// File-defined resources only; every write is rejected.
    Declarative,
    /// Both stores composed into one view.
    Composite,
}

impl StoreMode {
    /// Parse a configured mode. Surrounding whitespace and case are ignored;
    /// unknown values yield `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "mutable" => Some(Self::Mutable),
            "declarative" => Some(Self::Declarative),
            "composite" => Some(Self::Composite),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mutable => "mutable",
            Self::Declarative => "declarative",
            Self::Composite => "composite",
        }
    }

    /// Whether the declarative store has to be built for this mode.
    #[must_use]
    pub fn uses_declarative(self) -> bool {
        matches!(self, Self::Declarative | Self::Composite)
    }

    /// Whether the mutable store has to be built for this mode.
    #[must_use]
    pub fn uses_mutable(self) -> bool {
        matches!(self, Self::Mutable | Self::Composite)
    }
}

impl fmt::Display for StoreMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which source wins when both stores are consulted.
///
/// - `MutableFirst` reads the database first and falls back to the files;
///   on identifier collision in listings the database copy is kept.
/// - `DeclarativeFirst` reads the files first; declarative items are listed
///   before database items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Precedence {
    MutableFirst,
    #[default]
    DeclarativeFirst,
}

/// Resolves the [`StoreMode`] of a resource kind.
///
/// Resolution order:
/// 1. an explicitly configured, recognized per-kind mode;
/// 2. `Declarative` when declarative resources are globally enabled;
/// 3. `Mutable`.
///
/// A configured but unrecognized value is treated as absent.
#[derive(Debug, Clone)]
pub struct StoreModeResolver {
    config: DeclarativeResourcesConfig,
}

impl StoreModeResolver {
    #[must_use]
    pub fn new(config: DeclarativeResourcesConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &DeclarativeResourcesConfig {
        &self.config
    }

    #[must_use]
    pub fn resolve(&self, kind: &str) -> StoreMode {
        if let Some(raw) = self.config.store_modes.get(kind) {
            if let Some(mode) = StoreMode::parse(raw) {
                return mode;
            }
            warn!(kind, configured = %raw, "Unrecognized store mode, falling back to global setting");
        }

        if self.config.enabled {
            StoreMode::Declarative
        } else {
            StoreMode::Mutable
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn resolver(enabled: bool, modes: &[(&str, &str)]) -> StoreModeResolver {
        StoreModeResolver::new(DeclarativeResourcesConfig {
            enabled,
            store_modes: modes
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
            ..Default::default()
        })
    }

    #[test]
    fn parse_normalizes_case_and_whitespace() {
        assert_eq!(StoreMode::parse("  Composite "), Some(StoreMode::Composite));
        assert_eq!(StoreMode::parse("DECLARATIVE"), Some(StoreMode::Declarative));
        assert_eq!(StoreMode::parse("mutable"), Some(StoreMode::Mutable));
        assert_eq!(StoreMode::parse("hybrid"), None);
        assert_eq!(StoreMode::parse(""), None);
    }

    #[test]
    fn explicit_mode_wins_over_global_flag() {
        let r = resolver(true, &[("organization_units", "mutable")]);
        assert_eq!(r.resolve("organization_units"), StoreMode::Mutable);

        let r = resolver(false, &[("organization_units", " Composite")]);
        assert_eq!(r.resolve("organization_units"), StoreMode::Composite);
    }

    #[test]
    fn global_flag_applies_to_unconfigured_kinds() {
        let r = resolver(true, &[("organization_units", "composite")]);
        assert_eq!(r.resolve("layouts"), StoreMode::Declarative);

        let r = resolver(false, &[]);
        assert_eq!(r.resolve("layouts"), StoreMode::Mutable);
    }

    #[test]
    fn unrecognized_mode_falls_through() {
        let r = resolver(true, &[("layouts", "sideways")]);
        assert_eq!(r.resolve("layouts"), StoreMode::Declarative);

        let r = resolver(false, &[("layouts", "sideways")]);
        assert_eq!(r.resolve("layouts"), StoreMode::Mutable);
    }

    #[test]
    fn mode_store_requirements() {
        assert!(StoreMode::Composite.uses_mutable());
        assert!(StoreMode::Composite.uses_declarative());
        assert!(!StoreMode::Mutable.uses_declarative());
        assert!(!StoreMode::Declarative.uses_mutable());
    }
}
