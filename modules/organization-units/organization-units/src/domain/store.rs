//! Store contract shared by the mutable, declarative and composite stores.
//!
//! The service layer only ever talks to an `Arc<dyn OrganizationUnitStore>`;
//! which implementation sits behind it is decided once at startup from the
//! resolved store mode.

use std::collections::HashSet;

use async_trait::async_trait;
use organization_units_sdk::{
    OrganizationUnit, OrganizationUnitBasic, OrganizationUnitGroup, OrganizationUnitUser,
};

use super::error::DomainError;

#[async_trait]
pub trait OrganizationUnitStore: Send + Sync {
    /// Number of root units.
    async fn count_root(&self) -> Result<u64, DomainError>;

    /// Root units ordered by `(name, id)`.
    async fn list_root(
        &self,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<OrganizationUnitBasic>, DomainError>;

    /// # Errors
    /// [`DomainError::NotFound`] when the identifier is unknown to this store.
    async fn get(&self, id: &str) -> Result<OrganizationUnit, DomainError>;

    /// The child of `parent` (`None` for roots) with the given handle.
    async fn find_child_by_handle(
        &self,
        parent: Option<&str>,
        handle: &str,
    ) -> Result<Option<OrganizationUnit>, DomainError>;

    /// Resolve a handle path level by level.
    ///
    /// # Errors
    /// [`DomainError::PathNotFound`] as soon as one segment does not resolve
    /// under the previously resolved unit.
    async fn get_by_path(&self, handles: &[String]) -> Result<OrganizationUnit, DomainError> {
        let mut current: Option<OrganizationUnit> = None;
        for handle in handles {
            let parent = current.as_ref().map(|ou| ou.id.as_str());
            match self.find_child_by_handle(parent, handle).await? {
                Some(ou) => current = Some(ou),
                None => return Err(DomainError::path_not_found(handles.join("/"))),
            }
        }
        current.ok_or_else(|| DomainError::path_not_found(""))
    }

    async fn exists(&self, id: &str) -> Result<bool, DomainError>;

    /// The subset of `ids` that are children of `parent` (`None` for roots)
    /// in this store.
    async fn existing_ids_under(
        &self,
        parent: Option<&str>,
        ids: &[String],
    ) -> Result<HashSet<String>, DomainError>;

    /// Whether the unit is defined declaratively (and is therefore read-only).
    async fn is_declarative(&self, id: &str) -> Result<bool, DomainError>;

    /// Whether a sibling under `parent` already uses `name`.
    /// `exclude_id` skips the unit being updated.
    async fn has_name_conflict(
        &self,
        name: &str,
        parent: Option<&str>,
        exclude_id: Option<&str>,
    ) -> Result<bool, DomainError>;

    /// Whether a sibling under `parent` already uses `handle`.
    /// `exclude_id` skips the unit being updated.
    async fn has_handle_conflict(
        &self,
        handle: &str,
        parent: Option<&str>,
        exclude_id: Option<&str>,
    ) -> Result<bool, DomainError>;

    async fn create(&self, unit: OrganizationUnit) -> Result<OrganizationUnit, DomainError>;

    async fn update(&self, unit: OrganizationUnit) -> Result<OrganizationUnit, DomainError>;

    async fn delete(&self, id: &str) -> Result<(), DomainError>;

    async fn count_children(&self, parent: &str) -> Result<u64, DomainError>;

    /// Children of `parent` ordered by `(name, id)`.
    async fn list_children(
        &self,
        parent: &str,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<OrganizationUnitBasic>, DomainError>;

    async fn has_children(&self, id: &str) -> Result<bool, DomainError>;

    async fn count_users(&self, id: &str) -> Result<u64, DomainError>;

    async fn list_users(
        &self,
        id: &str,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<OrganizationUnitUser>, DomainError>;

    async fn count_groups(&self, id: &str) -> Result<u64, DomainError>;

    async fn list_groups(
        &self,
        id: &str,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<OrganizationUnitGroup>, DomainError>;
}
