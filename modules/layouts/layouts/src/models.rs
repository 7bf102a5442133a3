use serde::{Deserialize, Serialize};

/// A named layout document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Opaque layout definition; only required to be valid JSON.
    pub layout: serde_json::Value,
    /// `true` for layouts defined in resource files.
    #[serde(default)]
    pub is_read_only: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewLayout {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub layout: serde_json::Value,
}

/// Full replacement of a layout's mutable fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutUpdate {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub layout: serde_json::Value,
}

/// Offset-paginated list of layouts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutPage {
    pub items: Vec<Layout>,
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}
