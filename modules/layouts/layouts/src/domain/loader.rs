//! Declarative layout definitions, one YAML document per file:
//!
//! ```yaml
//! id: dashboard-default
//! name: Default dashboard
//! layout:
//!   columns: 2
//!   widgets: [clock, inbox]
//! ```

use async_trait::async_trait;
use declarative_resources::loader::ParseError;
use declarative_resources::{
    DeclarativeCollection, LoaderError, RawResource, ResourceHandler, ResourceLoaderConfig,
    ResourceSource, ValidationError, load_resources,
};
use serde::Deserialize;

use super::declarative::DeclarativeLayoutStore;
use crate::models::Layout;

pub const RESOURCE_KIND: &str = "layout";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LayoutDocument {
    id: String,
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    layout: serde_json::Value,
}

#[derive(Debug, Default)]
pub struct LayoutResourceHandler;

#[async_trait]
impl ResourceHandler for LayoutResourceHandler {
    type Resource = Layout;

    fn parse(&self, raw: &RawResource) -> Result<Layout, ParseError> {
        let doc: LayoutDocument = serde_saphyr::from_str(std::str::from_utf8(&raw.content)?)?;
        Ok(Layout {
            id: doc.id.trim().to_owned(),
            name: doc.name.trim().to_owned(),
            description: doc.description,
            layout: doc.layout,
            is_read_only: true,
        })
    }

    async fn validate(
        &self,
        layout: &Layout,
        loaded: &DeclarativeCollection<Layout>,
    ) -> Result<(), ValidationError> {
        if layout.id.is_empty() {
            return Err(ValidationError::missing_field("id"));
        }
        if layout.name.is_empty() {
            return Err(ValidationError::missing_field("name"));
        }
        if layout.layout.is_null() {
            return Err(ValidationError::missing_field("layout"));
        }
        if loaded.contains(&layout.id) {
            return Err(ValidationError::duplicate_id(&layout.id));
        }
        if loaded.iter().any(|l| l.name == layout.name) {
            return Err(ValidationError::conflict("name", &layout.name));
        }
        Ok(())
    }

    fn resource_id(&self, layout: &Layout) -> String {
        layout.id.clone()
    }
}

/// # Errors
/// Any [`LoaderError`]; callers treat it as fatal for startup.
pub async fn load_declarative_layouts(
    source: &dyn ResourceSource,
    directory: &str,
) -> Result<DeclarativeLayoutStore, LoaderError> {
    let mut layouts = DeclarativeCollection::new();
    load_resources(
        &ResourceLoaderConfig::new(RESOURCE_KIND, directory),
        source,
        &LayoutResourceHandler,
        &mut layouts,
    )
    .await?;
    Ok(DeclarativeLayoutStore::new(layouts))
}
