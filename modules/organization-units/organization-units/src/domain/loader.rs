//! Declarative organization unit definitions.
//!
//! One YAML document per file under `<root_dir>/organization_units/`:
//!
//! ```yaml
//! id: ou-platform
//! handle: platform
//! name: Platform
//! description: Shared infrastructure
//! parent: ou-eng
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use declarative_resources::loader::ParseError;
use declarative_resources::{
    DeclarativeCollection, LoaderError, RawResource, ResourceHandler, ResourceLoaderConfig,
    ResourceSource, ValidationError, load_resources,
};
use organization_units_sdk::OrganizationUnit;
use serde::Deserialize;
use tracing::info;

use super::declarative::DeclarativeOrganizationUnitStore;
use super::error::DomainError;
use super::store::OrganizationUnitStore;

pub const RESOURCE_KIND: &str = "organization_unit";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct OrganizationUnitDocument {
    id: String,
    handle: String,
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    parent: Option<String>,
}

impl From<OrganizationUnitDocument> for OrganizationUnit {
    fn from(doc: OrganizationUnitDocument) -> Self {
        Self {
            id: doc.id.trim().to_owned(),
            handle: doc.handle.trim().to_owned(),
            name: doc.name.trim().to_owned(),
            description: doc.description,
            parent: doc
                .parent
                .map(|p| p.trim().to_owned())
                .filter(|p| !p.is_empty()),
        }
    }
}

/// Parses and validates organization unit definitions.
///
/// With a mutable store attached (composite mode) identifiers that already
/// exist in the database are rejected, as are handles and names already
/// used by a database sibling under the same parent.
#[derive(Default)]
pub struct OrganizationUnitResourceHandler {
    mutable: Option<Arc<dyn OrganizationUnitStore>>,
}

impl OrganizationUnitResourceHandler {
    #[must_use]
    pub fn new(mutable: Option<Arc<dyn OrganizationUnitStore>>) -> Self {
        Self { mutable }
    }
}

#[async_trait]
impl ResourceHandler for OrganizationUnitResourceHandler {
    type Resource = OrganizationUnit;

    fn parse(&self, raw: &RawResource) -> Result<OrganizationUnit, ParseError> {
        let doc: OrganizationUnitDocument =
            serde_saphyr::from_str(std::str::from_utf8(&raw.content)?)?;
        Ok(doc.into())
    }

    async fn validate(
        &self,
        unit: &OrganizationUnit,
        loaded: &DeclarativeCollection<OrganizationUnit>,
    ) -> Result<(), ValidationError> {
        for (field, value) in [("id", &unit.id), ("handle", &unit.handle), ("name", &unit.name)] {
            if value.is_empty() {
                return Err(ValidationError::missing_field(field));
            }
        }

        if unit.handle.contains('/') || unit.handle.chars().any(char::is_whitespace) {
            return Err(ValidationError::Invalid(format!(
                "handle '{}' must not contain '/' or whitespace",
                unit.handle
            )));
        }

        if loaded.contains(&unit.id) {
            return Err(ValidationError::duplicate_id(&unit.id));
        }

        if let Some(parent) = &unit.parent
            && !loaded.contains(parent)
        {
            return Err(ValidationError::UnknownParent {
                parent: parent.clone(),
            });
        }

        for sibling in loaded.iter().filter(|ou| ou.parent == unit.parent) {
            if sibling.handle == unit.handle {
                return Err(ValidationError::conflict("handle", &unit.handle));
            }
            if sibling.name == unit.name {
                return Err(ValidationError::conflict("name", &unit.name));
            }
        }

        if let Some(mutable) = &self.mutable {
            let lookup_failed =
                |e: DomainError| ValidationError::Invalid(format!("mutable store lookup failed: {e}"));
            if mutable.exists(&unit.id).await.map_err(lookup_failed)? {
                return Err(ValidationError::Invalid(format!(
                    "id '{}' already exists in the database",
                    unit.id
                )));
            }
            let parent = unit.parent.as_deref();
            if mutable
                .has_handle_conflict(&unit.handle, parent, None)
                .await
                .map_err(lookup_failed)?
            {
                return Err(ValidationError::conflict("handle", &unit.handle));
            }
            if mutable
                .has_name_conflict(&unit.name, parent, None)
                .await
                .map_err(lookup_failed)?
            {
                return Err(ValidationError::conflict("name", &unit.name));
            }
        }

        Ok(())
    }

    fn resource_id(&self, unit: &OrganizationUnit) -> String {
        unit.id.clone()
    }

    fn parent_id(&self, unit: &OrganizationUnit) -> Option<String> {
        unit.parent.clone()
    }
}

/// Load every organization unit definition found in `directory`.
///
/// # Errors
/// Any [`LoaderError`]; callers treat it as fatal for startup.
pub async fn load_declarative_organization_units(
    source: &dyn ResourceSource,
    directory: &str,
    mutable: Option<Arc<dyn OrganizationUnitStore>>,
) -> Result<DeclarativeOrganizationUnitStore, LoaderError> {
    let handler = OrganizationUnitResourceHandler::new(mutable);
    let mut units = DeclarativeCollection::new();
    let count = load_resources(
        &ResourceLoaderConfig::new(RESOURCE_KIND, directory),
        source,
        &handler,
        &mut units,
    )
    .await?;
    info!(count, directory, "Declarative organization units ready");
    Ok(DeclarativeOrganizationUnitStore::new(units))
}
