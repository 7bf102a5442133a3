use serde::{Deserialize, Serialize};

/// An organization unit.
///
/// `parent` is the identifier of the parent unit; `None` marks a root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationUnit {
    pub id: String,
    pub handle: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

/// List projection of an organization unit.
///
/// `is_read_only` is computed when the listing is composed: it is `true` for
/// units defined in declarative resource files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationUnitBasic {
    pub id: String,
    pub handle: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_read_only: bool,
}

impl OrganizationUnitBasic {
    #[must_use]
    pub fn from_unit(unit: &OrganizationUnit, is_read_only: bool) -> Self {
        Self {
            id: unit.id.clone(),
            handle: unit.handle.clone(),
            name: unit.name.clone(),
            description: unit.description.clone(),
            is_read_only,
        }
    }
}

/// Data for creating a new organization unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrganizationUnit {
    /// Optional caller-chosen identifier; generated when absent.
    #[serde(default)]
    pub id: Option<String>,
    pub handle: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parent: Option<String>,
}

/// Full replacement of the mutable fields of an organization unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationUnitUpdate {
    pub handle: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parent: Option<String>,
}

/// A user assigned to an organization unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationUnitUser {
    pub id: String,
}

/// A group assigned to an organization unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationUnitGroup {
    pub id: String,
    pub name: String,
}

/// Offset-paginated result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Total number of items across all pages.
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}
