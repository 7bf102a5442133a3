use std::collections::HashSet;
use std::sync::Arc;

use organization_units_sdk::{
    NewOrganizationUnit, OrganizationUnit, OrganizationUnitBasic, OrganizationUnitGroup,
    OrganizationUnitUpdate, OrganizationUnitUser, Page,
};
use tracing::instrument;
use uuid::Uuid;

use super::error::DomainError;
use super::store::OrganizationUnitStore;
use crate::config::OrganizationUnitsConfig;

// ============================================================================
// Service Configuration
// ============================================================================

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub default_page_size: u64,
    pub max_page_size: u64,
    pub max_handle_length: usize,
    pub max_name_length: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::from(&OrganizationUnitsConfig::default())
    }
}

impl From<&OrganizationUnitsConfig> for ServiceConfig {
    fn from(cfg: &OrganizationUnitsConfig) -> Self {
        Self {
            default_page_size: cfg.default_page_size,
            max_page_size: cfg.max_page_size.max(1),
            max_handle_length: cfg.max_handle_length,
            max_name_length: cfg.max_name_length,
        }
    }
}

// ============================================================================
// Service Implementation
// ============================================================================

/// Organization unit business rules on top of whichever store the module
/// resolved at startup.
pub struct Service {
    store: Arc<dyn OrganizationUnitStore>,
    config: ServiceConfig,
}

impl Service {
    #[must_use]
    pub fn new(store: Arc<dyn OrganizationUnitStore>, config: ServiceConfig) -> Self {
        Self { store, config }
    }

    #[instrument(skip(self))]
    pub async fn list_root(
        &self,
        limit: Option<u64>,
        offset: Option<u64>,
    ) -> Result<Page<OrganizationUnitBasic>, DomainError> {
        let (limit, offset) = self.window(limit, offset);
        let total = self.store.count_root().await?;
        let items = self.store.list_root(limit, offset).await?;
        Ok(Page {
            items,
            total,
            limit,
            offset,
        })
    }

    #[instrument(skip(self), fields(ou_id = %id))]
    pub async fn get(&self, id: &str) -> Result<OrganizationUnit, DomainError> {
        self.store.get(id).await
    }

    #[instrument(skip(self))]
    pub async fn get_by_path(&self, path: &str) -> Result<OrganizationUnit, DomainError> {
        let handles = split_path(path)?;
        self.store.get_by_path(&handles).await
    }

    #[instrument(skip(self), fields(ou_id = %id))]
    pub async fn list_children(
        &self,
        id: &str,
        limit: Option<u64>,
        offset: Option<u64>,
    ) -> Result<Page<OrganizationUnitBasic>, DomainError> {
        self.ensure_exists(id).await?;
        let (limit, offset) = self.window(limit, offset);
        let total = self.store.count_children(id).await?;
        let items = self.store.list_children(id, limit, offset).await?;
        Ok(Page {
            items,
            total,
            limit,
            offset,
        })
    }

    #[instrument(skip(self))]
    pub async fn list_children_by_path(
        &self,
        path: &str,
        limit: Option<u64>,
        offset: Option<u64>,
    ) -> Result<Page<OrganizationUnitBasic>, DomainError> {
        let parent = self.get_by_path(path).await?;
        self.list_children(&parent.id, limit, offset).await
    }

    #[instrument(skip(self), fields(ou_id = %id))]
    pub async fn list_users(
        &self,
        id: &str,
        limit: Option<u64>,
        offset: Option<u64>,
    ) -> Result<Page<OrganizationUnitUser>, DomainError> {
        self.ensure_exists(id).await?;
        let (limit, offset) = self.window(limit, offset);
        let total = self.store.count_users(id).await?;
        let items = self.store.list_users(id, limit, offset).await?;
        Ok(Page {
            items,
            total,
            limit,
            offset,
        })
    }

    #[instrument(skip(self), fields(ou_id = %id))]
    pub async fn list_groups(
        &self,
        id: &str,
        limit: Option<u64>,
        offset: Option<u64>,
    ) -> Result<Page<OrganizationUnitGroup>, DomainError> {
        self.ensure_exists(id).await?;
        let (limit, offset) = self.window(limit, offset);
        let total = self.store.count_groups(id).await?;
        let items = self.store.list_groups(id, limit, offset).await?;
        Ok(Page {
            items,
            total,
            limit,
            offset,
        })
    }

    /// Create a new organization unit in the mutable store.
    #[instrument(skip(self, new_unit), fields(handle = %new_unit.handle))]
    pub async fn create(
        &self,
        new_unit: NewOrganizationUnit,
    ) -> Result<OrganizationUnit, DomainError> {
        tracing::info!("Creating organization unit");

        let handle = self.validate_handle(&new_unit.handle)?;
        let name = self.validate_name(&new_unit.name)?;
        let parent = normalize(new_unit.parent);

        let id = match normalize(new_unit.id) {
            Some(id) => {
                if self.store.exists(&id).await? {
                    return Err(DomainError::id_conflict(id));
                }
                id
            }
            None => Uuid::now_v7().to_string(),
        };

        if let Some(parent) = parent.as_deref()
            && !self.store.exists(parent).await?
        {
            return Err(DomainError::parent_not_found(parent));
        }

        self.check_conflicts(&handle, &name, parent.as_deref(), None)
            .await?;

        let created = self
            .store
            .create(OrganizationUnit {
                id,
                handle,
                name,
                description: normalize(new_unit.description),
                parent,
            })
            .await?;

        tracing::info!(ou_id = %created.id, "Created organization unit");
        Ok(created)
    }

    /// Replace the mutable fields of an organization unit.
    #[instrument(skip(self, update), fields(ou_id = %id))]
    pub async fn update(
        &self,
        id: &str,
        update: OrganizationUnitUpdate,
    ) -> Result<OrganizationUnit, DomainError> {
        tracing::info!("Updating organization unit");

        if self.store.is_declarative(id).await? {
            return Err(DomainError::immutable(id));
        }
        self.store.get(id).await?;

        let handle = self.validate_handle(&update.handle)?;
        let name = self.validate_name(&update.name)?;
        let parent = normalize(update.parent);

        if let Some(parent) = parent.as_deref() {
            if !self.store.exists(parent).await? {
                return Err(DomainError::parent_not_found(parent));
            }
            self.ensure_not_descendant(id, parent).await?;
        }

        self.check_conflicts(&handle, &name, parent.as_deref(), Some(id))
            .await?;

        let updated = self
            .store
            .update(OrganizationUnit {
                id: id.to_owned(),
                handle,
                name,
                description: normalize(update.description),
                parent,
            })
            .await?;

        tracing::info!("Updated organization unit");
        Ok(updated)
    }

    #[instrument(skip(self), fields(ou_id = %id))]
    pub async fn delete(&self, id: &str) -> Result<(), DomainError> {
        tracing::info!("Deleting organization unit");

        if self.store.is_declarative(id).await? {
            return Err(DomainError::immutable(id));
        }
        self.ensure_exists(id).await?;

        if self.store.has_children(id).await?
            || self.store.count_users(id).await? > 0
            || self.store.count_groups(id).await? > 0
        {
            return Err(DomainError::HasChildResources { id: id.to_owned() });
        }

        self.store.delete(id).await?;
        tracing::info!("Deleted organization unit");
        Ok(())
    }

    fn window(&self, limit: Option<u64>, offset: Option<u64>) -> (u64, u64) {
        let limit = limit
            .unwrap_or(self.config.default_page_size)
            .clamp(1, self.config.max_page_size);
        (limit, offset.unwrap_or(0))
    }

    async fn ensure_exists(&self, id: &str) -> Result<(), DomainError> {
        if self.store.exists(id).await? {
            Ok(())
        } else {
            Err(DomainError::not_found(id))
        }
    }

    /// Walk up from `new_parent`; reaching `id` means the move would create a loop.
    async fn ensure_not_descendant(&self, id: &str, new_parent: &str) -> Result<(), DomainError> {
        let mut seen = HashSet::new();
        let mut cursor = Some(new_parent.to_owned());
        while let Some(current) = cursor {
            if current == id || !seen.insert(current.clone()) {
                return Err(DomainError::CircularReference { id: id.to_owned() });
            }
            cursor = self.store.get(&current).await?.parent;
        }
        Ok(())
    }

    async fn check_conflicts(
        &self,
        handle: &str,
        name: &str,
        parent: Option<&str>,
        exclude_id: Option<&str>,
    ) -> Result<(), DomainError> {
        if self
            .store
            .has_handle_conflict(handle, parent, exclude_id)
            .await?
        {
            return Err(DomainError::handle_conflict(handle));
        }
        if self
            .store
            .has_name_conflict(name, parent, exclude_id)
            .await?
        {
            return Err(DomainError::name_conflict(name));
        }
        Ok(())
    }

    fn validate_handle(&self, handle: &str) -> Result<String, DomainError> {
        let handle = required("handle", handle, self.config.max_handle_length)?;
        if handle.contains('/') || handle.chars().any(char::is_whitespace) {
            return Err(DomainError::validation(
                "handle",
                "must not contain '/' or whitespace",
            ));
        }
        Ok(handle)
    }

    fn validate_name(&self, name: &str) -> Result<String, DomainError> {
        required("name", name, self.config.max_name_length)
    }
}

fn required(field: &str, value: &str, max_len: usize) -> Result<String, DomainError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DomainError::validation(field, "must not be empty"));
    }
    if value.chars().count() > max_len {
        return Err(DomainError::validation(
            field,
            format!("exceeds maximum length of {max_len}"),
        ));
    }
    Ok(value.to_owned())
}

fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// Split `a/b/c` into handles, ignoring empty segments.
fn split_path(path: &str) -> Result<Vec<String>, DomainError> {
    let handles: Vec<String> = path
        .split('/')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect();
    if handles.is_empty() {
        return Err(DomainError::validation("path", "must contain at least one handle"));
    }
    Ok(handles)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn split_path_ignores_empty_segments() {
        assert_eq!(
            split_path("/engineering//platform/").unwrap(),
            vec!["engineering", "platform"]
        );
        assert!(matches!(
            split_path(" / "),
            Err(DomainError::Validation { ref field, .. }) if field == "path"
        ));
    }

    #[test]
    fn required_trims_and_bounds_length() {
        assert_eq!(required("name", "  Sales ", 10).unwrap(), "Sales");
        assert!(required("name", "   ", 10).is_err());
        assert!(required("name", "abcdef", 5).is_err());
    }
}
