use std::path::Path;

use anyhow::Context;
use declarative_resources::DeclarativeResourcesConfig;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use layouts::LayoutsConfig;
use organization_units::OrganizationUnitsConfig;
use serde::{Deserialize, Serialize};

/// Environment variables with this prefix override the file, `__` nests
/// (`IAM__DATABASE__URL` sets `database.url`).
pub const ENV_PREFIX: &str = "IAM__";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_conns: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite::memory:".to_owned(),
            max_conns: 1,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub declarative_resources: DeclarativeResourcesConfig,
    pub organization_units: OrganizationUnitsConfig,
    pub layouts: LayoutsConfig,
}

impl AppConfig {
    /// Defaults, then the YAML file (if given), then `IAM__*` variables.
    ///
    /// # Errors
    /// Missing config file or values that do not fit the schema.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            anyhow::ensure!(
                path.is_file(),
                "config file '{}' does not exist",
                path.display()
            );
            figment = figment.merge(Yaml::file(path));
        }
        Self::extract(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    fn extract(figment: Figment) -> anyhow::Result<Self> {
        figment.extract().context("invalid configuration")
    }
}
