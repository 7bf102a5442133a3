//! Read-only store over organization units loaded from resource files.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use declarative_resources::{DeclarativeCollection, paginate};
use organization_units_sdk::{
    OrganizationUnit, OrganizationUnitBasic, OrganizationUnitGroup, OrganizationUnitUser,
};

use super::error::DomainError;
use super::store::OrganizationUnitStore;

/// In-memory store backed by a [`DeclarativeCollection`].
///
/// Every unit it returns is read-only; writes are rejected with
/// [`DomainError::Unsupported`]. Users and groups are never assigned to
/// declarative units, so those listings are always empty.
#[derive(Debug, Clone, Default)]
pub struct DeclarativeOrganizationUnitStore {
    units: Arc<DeclarativeCollection<OrganizationUnit>>,
}

impl DeclarativeOrganizationUnitStore {
    #[must_use]
    pub fn new(units: DeclarativeCollection<OrganizationUnit>) -> Self {
        Self {
            units: Arc::new(units),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    fn children_of<'a>(
        &'a self,
        parent: Option<&'a str>,
    ) -> impl Iterator<Item = &'a OrganizationUnit> + 'a {
        self.units
            .iter()
            .filter(move |ou| ou.parent.as_deref() == parent)
    }

    fn sorted_page(
        &self,
        parent: Option<&str>,
        limit: u64,
        offset: u64,
    ) -> Vec<OrganizationUnitBasic> {
        let mut units: Vec<&OrganizationUnit> = self.children_of(parent).collect();
        units.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        let basics = units
            .into_iter()
            .map(|ou| OrganizationUnitBasic::from_unit(ou, true))
            .collect();
        paginate(basics, limit, offset)
    }

    fn sibling_conflict<F>(&self, parent: Option<&str>, exclude_id: Option<&str>, hit: F) -> bool
    where
        F: Fn(&OrganizationUnit) -> bool,
    {
        self.children_of(parent)
            .any(|ou| Some(ou.id.as_str()) != exclude_id && hit(ou))
    }
}

#[async_trait]
impl OrganizationUnitStore for DeclarativeOrganizationUnitStore {
    async fn count_root(&self) -> Result<u64, DomainError> {
        Ok(self.children_of(None).count() as u64)
    }

    async fn list_root(
        &self,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<OrganizationUnitBasic>, DomainError> {
        Ok(self.sorted_page(None, limit, offset))
    }

    async fn get(&self, id: &str) -> Result<OrganizationUnit, DomainError> {
        self.units
            .get(id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(id))
    }

    async fn find_child_by_handle(
        &self,
        parent: Option<&str>,
        handle: &str,
    ) -> Result<Option<OrganizationUnit>, DomainError> {
        Ok(self
            .children_of(parent)
            .find(|ou| ou.handle == handle)
            .cloned())
    }

    async fn exists(&self, id: &str) -> Result<bool, DomainError> {
        Ok(self.units.contains(id))
    }

    async fn existing_ids_under(
        &self,
        parent: Option<&str>,
        ids: &[String],
    ) -> Result<HashSet<String>, DomainError> {
        Ok(ids
            .iter()
            .filter(|id| {
                self.units
                    .get(id)
                    .is_some_and(|ou| ou.parent.as_deref() == parent)
            })
            .cloned()
            .collect())
    }

    async fn is_declarative(&self, id: &str) -> Result<bool, DomainError> {
        Ok(self.units.contains(id))
    }

    async fn has_name_conflict(
        &self,
        name: &str,
        parent: Option<&str>,
        exclude_id: Option<&str>,
    ) -> Result<bool, DomainError> {
        Ok(self.sibling_conflict(parent, exclude_id, |ou| ou.name == name))
    }

    async fn has_handle_conflict(
        &self,
        handle: &str,
        parent: Option<&str>,
        exclude_id: Option<&str>,
    ) -> Result<bool, DomainError> {
        Ok(self.sibling_conflict(parent, exclude_id, |ou| ou.handle == handle))
    }

    async fn create(&self, unit: OrganizationUnit) -> Result<OrganizationUnit, DomainError> {
        Err(DomainError::unsupported("create", unit.id))
    }

    async fn update(&self, unit: OrganizationUnit) -> Result<OrganizationUnit, DomainError> {
        Err(DomainError::unsupported("update", unit.id))
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        Err(DomainError::unsupported("delete", id))
    }

    async fn count_children(&self, parent: &str) -> Result<u64, DomainError> {
        Ok(self.children_of(Some(parent)).count() as u64)
    }

    async fn list_children(
        &self,
        parent: &str,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<OrganizationUnitBasic>, DomainError> {
        Ok(self.sorted_page(Some(parent), limit, offset))
    }

    async fn has_children(&self, id: &str) -> Result<bool, DomainError> {
        Ok(self.children_of(Some(id)).next().is_some())
    }

    async fn count_users(&self, _id: &str) -> Result<u64, DomainError> {
        Ok(0)
    }

    async fn list_users(
        &self,
        _id: &str,
        _limit: u64,
        _offset: u64,
    ) -> Result<Vec<OrganizationUnitUser>, DomainError> {
        Ok(Vec::new())
    }

    async fn count_groups(&self, _id: &str) -> Result<u64, DomainError> {
        Ok(0)
    }

    async fn list_groups(
        &self,
        _id: &str,
        _limit: u64,
        _offset: u64,
    ) -> Result<Vec<OrganizationUnitGroup>, DomainError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn ou(id: &str, handle: &str, name: &str, parent: Option<&str>) -> OrganizationUnit {
        OrganizationUnit {
            id: id.to_owned(),
            handle: handle.to_owned(),
            name: name.to_owned(),
            description: None,
            parent: parent.map(str::to_owned),
        }
    }

    fn store() -> DeclarativeOrganizationUnitStore {
        let mut c = DeclarativeCollection::new();
        for unit in [
            ou("ou-sales", "sales", "Sales", None),
            ou("ou-eng", "engineering", "Engineering", None),
            ou("ou-platform", "platform", "Platform", Some("ou-eng")),
        ] {
            let id = unit.id.clone();
            c.insert(id, unit).unwrap();
        }
        DeclarativeOrganizationUnitStore::new(c)
    }

    #[tokio::test]
    async fn lists_roots_by_name_and_marks_read_only() {
        let s = store();
        let roots = s.list_root(10, 0).await.unwrap();
        let ids: Vec<_> = roots.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["ou-eng", "ou-sales"]);
        assert!(roots.iter().all(|b| b.is_read_only));
        assert_eq!(s.count_root().await.unwrap(), 2);
        assert_eq!(s.count_children("ou-eng").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn resolves_paths_level_by_level() {
        let s = store();
        let found = s
            .get_by_path(&["engineering".to_owned(), "platform".to_owned()])
            .await
            .unwrap();
        assert_eq!(found.id, "ou-platform");

        let err = s
            .get_by_path(&["platform".to_owned()])
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::PathNotFound { .. }));
    }

    #[tokio::test]
    async fn writes_are_unsupported() {
        let s = store();
        let err = s.delete("ou-eng").await.unwrap_err();
        assert!(err.is_immutable());
        let err = s
            .create(ou("ou-new", "new", "New", None))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Unsupported { operation: "create", .. }));
        assert_eq!(s.len(), 3);
    }

    #[tokio::test]
    async fn conflicts_are_scoped_to_siblings() {
        let s = store();
        assert!(s.has_handle_conflict("engineering", None, None).await.unwrap());
        assert!(!s
            .has_handle_conflict("engineering", Some("ou-sales"), None)
            .await
            .unwrap());
        assert!(!s
            .has_name_conflict("Engineering", None, Some("ou-eng"))
            .await
            .unwrap());
    }
}
