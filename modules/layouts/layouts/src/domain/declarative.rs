use std::sync::Arc;

use async_trait::async_trait;
use declarative_resources::{DeclarativeCollection, paginate};

use super::error::DomainError;
use super::store::LayoutStore;
use crate::models::Layout;

/// Layouts loaded from resource files. Read-only.
#[derive(Debug, Clone, Default)]
pub struct DeclarativeLayoutStore {
    layouts: Arc<DeclarativeCollection<Layout>>,
}

impl DeclarativeLayoutStore {
    #[must_use]
    pub fn new(layouts: DeclarativeCollection<Layout>) -> Self {
        Self {
            layouts: Arc::new(layouts),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }
}

#[async_trait]
impl LayoutStore for DeclarativeLayoutStore {
    fn is_read_only(&self) -> bool {
        true
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(self.layouts.len() as u64)
    }

    async fn list(&self, limit: u64, offset: u64) -> Result<Vec<Layout>, DomainError> {
        let mut all: Vec<Layout> = self.layouts.iter().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(paginate(all, limit, offset))
    }

    async fn get(&self, id: &str) -> Result<Layout, DomainError> {
        self.layouts
            .get(id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(id))
    }

    async fn exists(&self, id: &str) -> Result<bool, DomainError> {
        Ok(self.layouts.contains(id))
    }

    async fn has_name_conflict(
        &self,
        name: &str,
        exclude_id: Option<&str>,
    ) -> Result<bool, DomainError> {
        Ok(self
            .layouts
            .iter()
            .any(|l| l.name == name && Some(l.id.as_str()) != exclude_id))
    }

    async fn create(&self, layout: Layout) -> Result<Layout, DomainError> {
        Err(DomainError::immutable(layout.id))
    }

    async fn update(&self, layout: Layout) -> Result<Layout, DomainError> {
        Err(DomainError::immutable(layout.id))
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        Err(DomainError::immutable(id))
    }
}
