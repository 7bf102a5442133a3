use std::sync::Arc;

use tracing::instrument;
use uuid::Uuid;

use super::error::DomainError;
use super::store::LayoutStore;
use crate::config::LayoutsConfig;
use crate::models::{Layout, LayoutPage, LayoutUpdate, NewLayout};

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub default_page_size: u64,
    pub max_page_size: u64,
    pub max_name_length: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::from(&LayoutsConfig::default())
    }
}

impl From<&LayoutsConfig> for ServiceConfig {
    fn from(cfg: &LayoutsConfig) -> Self {
        Self {
            default_page_size: cfg.default_page_size,
            max_page_size: cfg.max_page_size.max(1),
            max_name_length: cfg.max_name_length,
        }
    }
}

pub struct Service {
    store: Arc<dyn LayoutStore>,
    config: ServiceConfig,
}

impl Service {
    #[must_use]
    pub fn new(store: Arc<dyn LayoutStore>, config: ServiceConfig) -> Self {
        Self { store, config }
    }

    #[instrument(skip(self))]
    pub async fn list(
        &self,
        limit: Option<u64>,
        offset: Option<u64>,
    ) -> Result<LayoutPage, DomainError> {
        let limit = limit
            .unwrap_or(self.config.default_page_size)
            .clamp(1, self.config.max_page_size);
        let offset = offset.unwrap_or(0);
        Ok(LayoutPage {
            total: self.store.count().await?,
            items: self.store.list(limit, offset).await?,
            limit,
            offset,
        })
    }

    #[instrument(skip(self), fields(layout_id = %id))]
    pub async fn get(&self, id: &str) -> Result<Layout, DomainError> {
        self.store.get(id).await
    }

    #[instrument(skip(self, new_layout), fields(name = %new_layout.name))]
    pub async fn create(&self, new_layout: NewLayout) -> Result<Layout, DomainError> {
        let id = new_layout
            .id
            .map(|id| id.trim().to_owned())
            .filter(|id| !id.is_empty());
        if self.store.is_read_only() {
            return Err(DomainError::immutable(
                id.unwrap_or_else(|| new_layout.name.clone()),
            ));
        }

        let name = self.validate_name(&new_layout.name)?;
        validate_document(&new_layout.layout)?;

        let id = match id {
            Some(id) => {
                if self.store.exists(&id).await? {
                    return Err(DomainError::id_conflict(id));
                }
                id
            }
            None => Uuid::now_v7().to_string(),
        };
        if self.store.has_name_conflict(&name, None).await? {
            return Err(DomainError::name_conflict(name));
        }

        let created = self
            .store
            .create(Layout {
                id,
                name,
                description: new_layout.description,
                layout: new_layout.layout,
                is_read_only: false,
            })
            .await?;
        tracing::info!(layout_id = %created.id, "Created layout");
        Ok(created)
    }

    #[instrument(skip(self, update), fields(layout_id = %id))]
    pub async fn update(&self, id: &str, update: LayoutUpdate) -> Result<Layout, DomainError> {
        if self.store.is_read_only() {
            return Err(DomainError::immutable(id));
        }
        self.store.get(id).await?;

        let name = self.validate_name(&update.name)?;
        validate_document(&update.layout)?;
        if self.store.has_name_conflict(&name, Some(id)).await? {
            return Err(DomainError::name_conflict(name));
        }

        let updated = self
            .store
            .update(Layout {
                id: id.to_owned(),
                name,
                description: update.description,
                layout: update.layout,
                is_read_only: false,
            })
            .await?;
        tracing::info!("Updated layout");
        Ok(updated)
    }

    #[instrument(skip(self), fields(layout_id = %id))]
    pub async fn delete(&self, id: &str) -> Result<(), DomainError> {
        if self.store.is_read_only() {
            return Err(DomainError::immutable(id));
        }
        self.store.delete(id).await?;
        tracing::info!("Deleted layout");
        Ok(())
    }

    fn validate_name(&self, name: &str) -> Result<String, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("name", "must not be empty"));
        }
        if name.chars().count() > self.config.max_name_length {
            return Err(DomainError::validation(
                "name",
                format!("exceeds maximum length of {}", self.config.max_name_length),
            ));
        }
        Ok(name.to_owned())
    }
}

fn validate_document(layout: &serde_json::Value) -> Result<(), DomainError> {
    if layout.is_null() {
        return Err(DomainError::validation("layout", "must not be empty"));
    }
    Ok(())
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::domain::declarative::DeclarativeLayoutStore;
    use crate::test_support::{inmem_store, layout, new_layout};
    use declarative_resources::DeclarativeCollection;

    fn svc(store: Arc<dyn LayoutStore>) -> Service {
        Service::new(store, ServiceConfig::default())
    }

    #[tokio::test]
    async fn crud_against_database() {
        let s = svc(Arc::new(inmem_store().await));

        let created = s.create(new_layout("Main")).await.unwrap();
        assert!(!created.is_read_only);

        let err = s.create(new_layout("Main")).await.unwrap_err();
        assert!(matches!(err, DomainError::NameConflict { .. }));

        let updated = s
            .update(
                &created.id,
                LayoutUpdate {
                    name: "Main".to_owned(),
                    description: Some("kept name".to_owned()),
                    layout: serde_json::json!({"rows": 3}),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.layout["rows"], 3);

        let page = s.list(None, None).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].description.as_deref(), Some("kept name"));

        s.delete(&created.id).await.unwrap();
        assert!(s.get(&created.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn declarative_store_rejects_every_write() {
        let mut c = DeclarativeCollection::new();
        c.insert("dash", layout("dash", "Dashboard")).unwrap();
        let s = svc(Arc::new(DeclarativeLayoutStore::new(c)));

        assert!(matches!(
            s.delete("dash").await.unwrap_err(),
            DomainError::Immutable { .. }
        ));
        assert!(matches!(
            s.create(new_layout("Other")).await.unwrap_err(),
            DomainError::Immutable { .. }
        ));
        assert_eq!(s.list(None, None).await.unwrap().total, 1);
    }

    #[tokio::test]
    async fn null_document_is_invalid() {
        let s = svc(Arc::new(inmem_store().await));
        let err = s
            .create(NewLayout {
                layout: serde_json::Value::Null,
                ..new_layout("Empty")
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation { ref field, .. } if field == "layout"));
    }
}
