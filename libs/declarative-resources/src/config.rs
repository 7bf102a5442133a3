//! Configuration for declarative resources.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Process-wide declarative resources configuration.
///
/// Passed explicitly to [`StoreModeResolver`](crate::StoreModeResolver) and to
/// the [`DirectorySource`](crate::DirectorySource); nothing reads it from
/// global state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeclarativeResourcesConfig {
    /// Global switch. When no per-kind mode is configured, `true` selects the
    /// declarative store and `false` the mutable one.
    pub enabled: bool,

    /// Root directory holding one sub-directory per resource kind.
    pub root_dir: PathBuf,

    /// Per-kind store mode (`mutable`, `declarative` or `composite`).
    pub store_modes: HashMap<String, String>,
}

impl Default for DeclarativeResourcesConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            root_dir: PathBuf::from("resources"),
            store_modes: HashMap::new(),
        }
    }
}
