use serde::{Deserialize, Serialize};

/// Configuration for the layouts module.
///
/// The store mode comes from `declarative_resources.store_modes.layouts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutsConfig {
    pub deployment_id: String,
    /// Directory, relative to the declarative resources root.
    pub resource_dir: String,
    pub default_page_size: u64,
    pub max_page_size: u64,
    pub max_name_length: usize,
}

impl Default for LayoutsConfig {
    fn default() -> Self {
        Self {
            deployment_id: "default".to_owned(),
            resource_dir: "layouts".to_owned(),
            default_page_size: 30,
            max_page_size: 100,
            max_name_length: 256,
        }
    }
}
