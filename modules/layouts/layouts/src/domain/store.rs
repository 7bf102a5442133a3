use async_trait::async_trait;

use super::error::DomainError;
use crate::models::Layout;

/// Storage contract for layouts. Lists are ordered by `(name, id)`.
#[async_trait]
pub trait LayoutStore: Send + Sync {
    /// Whether every write through this store is rejected.
    fn is_read_only(&self) -> bool;

    async fn count(&self) -> Result<u64, DomainError>;

    async fn list(&self, limit: u64, offset: u64) -> Result<Vec<Layout>, DomainError>;

    /// # Errors
    /// [`DomainError::NotFound`] when the identifier is unknown.
    async fn get(&self, id: &str) -> Result<Layout, DomainError>;

    async fn exists(&self, id: &str) -> Result<bool, DomainError>;

    async fn has_name_conflict(
        &self,
        name: &str,
        exclude_id: Option<&str>,
    ) -> Result<bool, DomainError>;

    async fn create(&self, layout: Layout) -> Result<Layout, DomainError>;

    async fn update(&self, layout: Layout) -> Result<Layout, DomainError>;

    async fn delete(&self, id: &str) -> Result<(), DomainError>;
}
