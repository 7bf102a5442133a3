use declarative_resources::{DEFAULT_MAX_COMPOSITE_RECORDS, Precedence};
use serde::{Deserialize, Serialize};

/// Configuration for the organization units module.
///
/// The store mode itself comes from the shared declarative resources
/// configuration (`declarative_resources.store_modes.organization_units`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OrganizationUnitsConfig {
    /// Deployment identifier stamped on (and filtering) every database row.
    pub deployment_id: String,

    /// Which store wins in composite mode.
    pub precedence: Precedence,

    /// Ceiling on the merged candidate set of a composite listing.
    pub max_composite_records: u64,

    /// Directory, relative to the declarative resources root.
    pub resource_dir: String,

    pub default_page_size: u64,
    pub max_page_size: u64,
    pub max_handle_length: usize,
    pub max_name_length: usize,
}

impl Default for OrganizationUnitsConfig {
    fn default() -> Self {
        Self {
            deployment_id: "default".to_owned(),
            precedence: Precedence::DeclarativeFirst,
            max_composite_records: DEFAULT_MAX_COMPOSITE_RECORDS,
            resource_dir: "organization_units".to_owned(),
            default_page_size: 30,
            max_page_size: 100,
            max_handle_length: 64,
            max_name_length: 256,
        }
    }
}
