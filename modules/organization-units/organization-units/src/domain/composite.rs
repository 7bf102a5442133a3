//! Composite store: one database-backed store plus one declarative store,
//! exposed through the single [`OrganizationUnitStore`] contract.
//!
//! Reads consult the primary store (chosen by [`Precedence`]) and fall back
//! to the secondary one. Listings materialize both sides, merge by
//! identifier and paginate the merged sequence, so they are bounded by a
//! record ceiling. Writes only ever reach the mutable store, and anything the
//! declarative store knows about is rejected before they get there.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use declarative_resources::{Precedence, ensure_within_ceiling, merge_by_id, paginate};
use organization_units_sdk::{
    OrganizationUnit, OrganizationUnitBasic, OrganizationUnitGroup, OrganizationUnitUser,
};
use tracing::{debug, warn};

use super::error::DomainError;
use super::store::OrganizationUnitStore;

pub struct CompositeOrganizationUnitStore {
    mutable: Arc<dyn OrganizationUnitStore>,
    declarative: Arc<dyn OrganizationUnitStore>,
    precedence: Precedence,
    max_records: u64,
}

impl CompositeOrganizationUnitStore {
    #[must_use]
    pub fn new(
        mutable: Arc<dyn OrganizationUnitStore>,
        declarative: Arc<dyn OrganizationUnitStore>,
        precedence: Precedence,
        max_records: u64,
    ) -> Self {
        Self {
            mutable,
            declarative,
            precedence,
            max_records,
        }
    }

    #[must_use]
    pub fn precedence(&self) -> Precedence {
        self.precedence
    }

    fn primary(&self) -> &dyn OrganizationUnitStore {
        match self.precedence {
            Precedence::MutableFirst => self.mutable.as_ref(),
            Precedence::DeclarativeFirst => self.declarative.as_ref(),
        }
    }

    fn secondary(&self) -> &dyn OrganizationUnitStore {
        match self.precedence {
            Precedence::MutableFirst => self.declarative.as_ref(),
            Precedence::DeclarativeFirst => self.mutable.as_ref(),
        }
    }

    async fn count_level(&self, parent: Option<&str>) -> Result<(u64, u64), DomainError> {
        match parent {
            None => Ok((
                self.mutable.count_root().await?,
                self.declarative.count_root().await?,
            )),
            Some(p) => Ok((
                self.mutable.count_children(p).await?,
                self.declarative.count_children(p).await?,
            )),
        }
    }

    async fn list_level(
        store: &dyn OrganizationUnitStore,
        parent: Option<&str>,
        limit: u64,
    ) -> Result<Vec<OrganizationUnitBasic>, DomainError> {
        match parent {
            None => store.list_root(limit, 0).await,
            Some(p) => store.list_children(p, limit, 0).await,
        }
    }

    /// Identifiers present in both stores under `parent`.
    async fn overlap(
        &self,
        parent: Option<&str>,
        declarative_count: u64,
    ) -> Result<HashSet<String>, DomainError> {
        if declarative_count == 0 {
            return Ok(HashSet::new());
        }
        let declarative_ids: Vec<String> =
            Self::list_level(self.declarative.as_ref(), parent, declarative_count)
                .await?
                .into_iter()
                .map(|b| b.id)
                .collect();
        let overlap = self
            .mutable
            .existing_ids_under(parent, &declarative_ids)
            .await?;
        if !overlap.is_empty() {
            warn!(
                count = overlap.len(),
                "organization unit identifiers present in both stores"
            );
        }
        Ok(overlap)
    }

    async fn merged_count(&self, parent: Option<&str>) -> Result<u64, DomainError> {
        let (mutable_count, declarative_count) = self.count_level(parent).await?;
        let overlap = self.overlap(parent, declarative_count).await?;
        Ok((mutable_count + declarative_count).saturating_sub(overlap.len() as u64))
    }

    async fn merged_list(
        &self,
        parent: Option<&str>,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<OrganizationUnitBasic>, DomainError> {
        let (mutable_count, declarative_count) = self.count_level(parent).await?;
        ensure_within_ceiling(mutable_count + declarative_count, self.max_records)?;

        let mutable_items = tag(
            Self::list_level(self.mutable.as_ref(), parent, mutable_count).await?,
            false,
        );
        let declarative_items = tag(
            Self::list_level(self.declarative.as_ref(), parent, declarative_count).await?,
            true,
        );

        let merged = match self.precedence {
            Precedence::MutableFirst => {
                merge_by_id(mutable_items, declarative_items, |b| b.id.as_str())
            }
            Precedence::DeclarativeFirst => {
                merge_by_id(declarative_items, mutable_items, |b| b.id.as_str())
            }
        };
        debug!(
            mutable_count,
            declarative_count,
            merged = merged.len(),
            "merged organization unit listing"
        );
        Ok(paginate(merged, limit, offset))
    }

    async fn reject_declarative_siblings(
        &self,
        unit: &OrganizationUnit,
        exclude_id: Option<&str>,
    ) -> Result<(), DomainError> {
        let parent = unit.parent.as_deref();
        if self
            .declarative
            .has_handle_conflict(&unit.handle, parent, exclude_id)
            .await?
        {
            return Err(DomainError::handle_conflict(&unit.handle));
        }
        if self
            .declarative
            .has_name_conflict(&unit.name, parent, exclude_id)
            .await?
        {
            return Err(DomainError::name_conflict(&unit.name));
        }
        Ok(())
    }
}

fn tag(mut items: Vec<OrganizationUnitBasic>, is_read_only: bool) -> Vec<OrganizationUnitBasic> {
    for item in &mut items {
        item.is_read_only = is_read_only;
    }
    items
}

#[async_trait]
impl OrganizationUnitStore for CompositeOrganizationUnitStore {
    async fn count_root(&self) -> Result<u64, DomainError> {
        self.merged_count(None).await
    }

    async fn list_root(
        &self,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<OrganizationUnitBasic>, DomainError> {
        self.merged_list(None, limit, offset).await
    }

    async fn get(&self, id: &str) -> Result<OrganizationUnit, DomainError> {
        match self.primary().get(id).await {
            Err(e) if e.is_not_found() => self.secondary().get(id).await,
            other => other,
        }
    }

    async fn find_child_by_handle(
        &self,
        parent: Option<&str>,
        handle: &str,
    ) -> Result<Option<OrganizationUnit>, DomainError> {
        if let Some(found) = self.primary().find_child_by_handle(parent, handle).await? {
            return Ok(Some(found));
        }
        self.secondary().find_child_by_handle(parent, handle).await
    }

    // The default `get_by_path` walks `find_child_by_handle` above, so every
    // segment may resolve in either store.

    async fn exists(&self, id: &str) -> Result<bool, DomainError> {
        Ok(self.primary().exists(id).await? || self.secondary().exists(id).await?)
    }

    async fn existing_ids_under(
        &self,
        parent: Option<&str>,
        ids: &[String],
    ) -> Result<HashSet<String>, DomainError> {
        let mut found = self.primary().existing_ids_under(parent, ids).await?;
        found.extend(self.secondary().existing_ids_under(parent, ids).await?);
        Ok(found)
    }

    async fn is_declarative(&self, id: &str) -> Result<bool, DomainError> {
        self.declarative.exists(id).await
    }

    async fn has_name_conflict(
        &self,
        name: &str,
        parent: Option<&str>,
        exclude_id: Option<&str>,
    ) -> Result<bool, DomainError> {
        Ok(self
            .declarative
            .has_name_conflict(name, parent, exclude_id)
            .await?
            || self
                .mutable
                .has_name_conflict(name, parent, exclude_id)
                .await?)
    }

    async fn has_handle_conflict(
        &self,
        handle: &str,
        parent: Option<&str>,
        exclude_id: Option<&str>,
    ) -> Result<bool, DomainError> {
        Ok(self
            .declarative
            .has_handle_conflict(handle, parent, exclude_id)
            .await?
            || self
                .mutable
                .has_handle_conflict(handle, parent, exclude_id)
                .await?)
    }

    async fn create(&self, unit: OrganizationUnit) -> Result<OrganizationUnit, DomainError> {
        if self.declarative.exists(&unit.id).await? {
            return Err(DomainError::id_conflict(&unit.id));
        }
        self.reject_declarative_siblings(&unit, None).await?;
        self.mutable.create(unit).await
    }

    async fn update(&self, unit: OrganizationUnit) -> Result<OrganizationUnit, DomainError> {
        if self.declarative.exists(&unit.id).await? {
            return Err(DomainError::immutable(&unit.id));
        }
        self.reject_declarative_siblings(&unit, Some(&unit.id))
            .await?;
        self.mutable.update(unit).await
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        if self.declarative.exists(id).await? {
            return Err(DomainError::immutable(id));
        }
        self.mutable.delete(id).await
    }

    async fn count_children(&self, parent: &str) -> Result<u64, DomainError> {
        self.merged_count(Some(parent)).await
    }

    async fn list_children(
        &self,
        parent: &str,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<OrganizationUnitBasic>, DomainError> {
        self.merged_list(Some(parent), limit, offset).await
    }

    async fn has_children(&self, id: &str) -> Result<bool, DomainError> {
        Ok(self.mutable.has_children(id).await? || self.declarative.has_children(id).await?)
    }

    async fn count_users(&self, id: &str) -> Result<u64, DomainError> {
        self.mutable.count_users(id).await
    }

    async fn list_users(
        &self,
        id: &str,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<OrganizationUnitUser>, DomainError> {
        self.mutable.list_users(id, limit, offset).await
    }

    async fn count_groups(&self, id: &str) -> Result<u64, DomainError> {
        self.mutable.count_groups(id).await
    }

    async fn list_groups(
        &self,
        id: &str,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<OrganizationUnitGroup>, DomainError> {
        self.mutable.list_groups(id, limit, offset).await
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::domain::declarative::DeclarativeOrganizationUnitStore;
    use crate::test_support::{declarative_units, inmem_store, ou, seed_unit};

    async fn composite(
        precedence: Precedence,
        max_records: u64,
    ) -> (CompositeOrganizationUnitStore, Arc<dyn OrganizationUnitStore>) {
        let mutable: Arc<dyn OrganizationUnitStore> = Arc::new(inmem_store().await);
        let declarative: Arc<dyn OrganizationUnitStore> =
            Arc::new(DeclarativeOrganizationUnitStore::new(declarative_units(&[
                ou("ou-eng", "engineering", "Engineering", None),
                ou("ou-platform", "platform", "Platform", Some("ou-eng")),
            ])));
        (
            CompositeOrganizationUnitStore::new(
                mutable.clone(),
                declarative,
                precedence,
                max_records,
            ),
            mutable,
        )
    }

    #[tokio::test]
    async fn declarative_first_lists_declarative_items_before_mutable_ones() {
        let (store, mutable) = composite(Precedence::DeclarativeFirst, 1000).await;
        seed_unit(mutable.as_ref(), ou("ou-ann", "ann", "Annex", None)).await;

        let roots = store.list_root(10, 0).await.unwrap();
        let view: Vec<_> = roots.iter().map(|b| (b.id.as_str(), b.is_read_only)).collect();
        assert_eq!(view, vec![("ou-eng", true), ("ou-ann", false)]);
        assert_eq!(store.count_root().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn mutable_first_lists_mutable_items_first() {
        let (store, mutable) = composite(Precedence::MutableFirst, 1000).await;
        seed_unit(mutable.as_ref(), ou("ou-ann", "ann", "Annex", None)).await;

        let roots = store.list_root(10, 0).await.unwrap();
        let ids: Vec<_> = roots.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["ou-ann", "ou-eng"]);
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn overlapping_identifier_is_listed_once_with_primary_copy() {
        let (store, mutable) = composite(Precedence::MutableFirst, 1000).await;
        seed_unit(
            mutable.as_ref(),
            ou("ou-eng", "engineering-db", "Engineering (db)", None),
        )
        .await;

        let roots = store.list_root(10, 0).await.unwrap();
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].handle, "engineering-db");
        assert!(!roots[0].is_read_only);
        assert_eq!(store.count_root().await.unwrap(), 1);
        assert!(logs_contain("present in both stores"));
    }

    #[tokio::test]
    async fn ceiling_is_checked_before_pagination() {
        let (store, mutable) = composite(Precedence::DeclarativeFirst, 2).await;
        seed_unit(mutable.as_ref(), ou("ou-a", "a", "A", None)).await;
        seed_unit(mutable.as_ref(), ou("ou-b", "b", "B", None)).await;

        let err = store.list_root(10, 999).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::ResultLimitExceeded(e) if e.ceiling == 2 && e.candidates == 3
        ));
    }

    #[tokio::test]
    async fn mixed_path_crosses_stores() {
        let (store, mutable) = composite(Precedence::DeclarativeFirst, 1000).await;
        seed_unit(
            mutable.as_ref(),
            ou("ou-sre", "sre", "SRE", Some("ou-platform")),
        )
        .await;

        let found = store
            .get_by_path(&[
                "engineering".to_owned(),
                "platform".to_owned(),
                "sre".to_owned(),
            ])
            .await
            .unwrap();
        assert_eq!(found.id, "ou-sre");
        assert_eq!(store.count_children("ou-platform").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn declarative_units_are_never_writable() {
        let (store, mutable) = composite(Precedence::MutableFirst, 1000).await;

        let err = store.delete("ou-eng").await.unwrap_err();
        assert!(matches!(err, DomainError::Immutable { ref id } if id == "ou-eng"));

        let err = store
            .update(ou("ou-eng", "eng", "Eng", None))
            .await
            .unwrap_err();
        assert!(err.is_immutable());

        let err = store
            .create(ou("ou-x", "engineering", "Other", None))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::HandleConflict { .. }));
        assert_eq!(mutable.count_root().await.unwrap(), 0);
    }
}
