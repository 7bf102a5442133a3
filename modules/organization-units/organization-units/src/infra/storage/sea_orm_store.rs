use std::collections::HashSet;

use async_trait::async_trait;
use organization_units_sdk::{
    OrganizationUnit, OrganizationUnitBasic, OrganizationUnitGroup, OrganizationUnitUser,
};
use sea_orm::sea_query::SimpleExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set, TransactionTrait,
};
use tracing::debug;

use crate::domain::error::DomainError;
use crate::domain::store::OrganizationUnitStore;

use super::entity::organization_unit::{
    ActiveModel as UnitAM, Column, Entity as UnitEntity, Model as UnitModel,
};
use super::entity::{unit_group, unit_user};

/// Database-backed organization unit store.
///
/// Every row carries the deployment identifier and every query is filtered
/// by it, so several deployments can share one database.
#[derive(Clone)]
pub struct SeaOrmOrganizationUnitStore {
    db: DatabaseConnection,
    deployment_id: String,
}

impl SeaOrmOrganizationUnitStore {
    #[must_use]
    pub fn new(db: DatabaseConnection, deployment_id: impl Into<String>) -> Self {
        Self {
            db,
            deployment_id: deployment_id.into(),
        }
    }

    fn scoped(&self) -> Select<UnitEntity> {
        UnitEntity::find().filter(Column::DeploymentId.eq(self.deployment_id.as_str()))
    }

    fn under(&self, parent: Option<&str>) -> Select<UnitEntity> {
        self.scoped().filter(parent_is(parent))
    }

    async fn find(&self, id: &str) -> Result<Option<UnitModel>, DomainError> {
        Ok(self.scoped().filter(Column::Id.eq(id)).one(&self.db).await?)
    }

    async fn page(
        &self,
        parent: Option<&str>,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<OrganizationUnitBasic>, DomainError> {
        let rows = self
            .under(parent)
            .order_by_asc(Column::Name)
            .order_by_asc(Column::Id)
            .limit(limit)
            .offset(offset)
            .all(&self.db)
            .await?;
        Ok(rows
            .into_iter()
            .map(|m| OrganizationUnitBasic::from_unit(&m.into(), false))
            .collect())
    }

    async fn sibling_exists(
        &self,
        column: Column,
        value: &str,
        parent: Option<&str>,
        exclude_id: Option<&str>,
    ) -> Result<bool, DomainError> {
        let mut query = self.under(parent).filter(column.eq(value));
        if let Some(id) = exclude_id {
            query = query.filter(Column::Id.ne(id));
        }
        Ok(query.count(&self.db).await? > 0)
    }

    /// Assign a user to a unit.
    ///
    /// # Errors
    /// [`DomainError::NotFound`] when the unit is not stored here.
    pub async fn assign_user(&self, ou_id: &str, user_id: &str) -> Result<(), DomainError> {
        if self.find(ou_id).await?.is_none() {
            return Err(DomainError::not_found(ou_id));
        }
        unit_user::ActiveModel {
            ou_id: Set(ou_id.to_owned()),
            user_id: Set(user_id.to_owned()),
            deployment_id: Set(self.deployment_id.clone()),
        }
        .insert(&self.db)
        .await?;
        Ok(())
    }

    /// Assign a group to a unit.
    ///
    /// # Errors
    /// [`DomainError::NotFound`] when the unit is not stored here.
    pub async fn assign_group(
        &self,
        ou_id: &str,
        group_id: &str,
        name: &str,
    ) -> Result<(), DomainError> {
        if self.find(ou_id).await?.is_none() {
            return Err(DomainError::not_found(ou_id));
        }
        unit_group::ActiveModel {
            ou_id: Set(ou_id.to_owned()),
            group_id: Set(group_id.to_owned()),
            deployment_id: Set(self.deployment_id.clone()),
            name: Set(name.to_owned()),
        }
        .insert(&self.db)
        .await?;
        Ok(())
    }
}

fn parent_is(parent: Option<&str>) -> SimpleExpr {
    match parent {
        Some(p) => Column::ParentId.eq(p),
        None => Column::ParentId.is_null(),
    }
}

#[async_trait]
impl OrganizationUnitStore for SeaOrmOrganizationUnitStore {
    async fn count_root(&self) -> Result<u64, DomainError> {
        Ok(self.under(None).count(&self.db).await?)
    }

    async fn list_root(
        &self,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<OrganizationUnitBasic>, DomainError> {
        self.page(None, limit, offset).await
    }

    async fn get(&self, id: &str) -> Result<OrganizationUnit, DomainError> {
        self.find(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| DomainError::not_found(id))
    }

    async fn find_child_by_handle(
        &self,
        parent: Option<&str>,
        handle: &str,
    ) -> Result<Option<OrganizationUnit>, DomainError> {
        let found = self
            .under(parent)
            .filter(Column::Handle.eq(handle))
            .one(&self.db)
            .await?;
        Ok(found.map(Into::into))
    }

    async fn exists(&self, id: &str) -> Result<bool, DomainError> {
        Ok(self.find(id).await?.is_some())
    }

    async fn existing_ids_under(
        &self,
        parent: Option<&str>,
        ids: &[String],
    ) -> Result<HashSet<String>, DomainError> {
        if ids.is_empty() {
            return Ok(HashSet::new());
        }
        let found: Vec<String> = self
            .under(parent)
            .filter(Column::Id.is_in(ids.iter().cloned()))
            .select_only()
            .column(Column::Id)
            .into_tuple()
            .all(&self.db)
            .await?;
        Ok(found.into_iter().collect())
    }

    async fn is_declarative(&self, _id: &str) -> Result<bool, DomainError> {
        Ok(false)
    }

    async fn has_name_conflict(
        &self,
        name: &str,
        parent: Option<&str>,
        exclude_id: Option<&str>,
    ) -> Result<bool, DomainError> {
        self.sibling_exists(Column::Name, name, parent, exclude_id)
            .await
    }

    async fn has_handle_conflict(
        &self,
        handle: &str,
        parent: Option<&str>,
        exclude_id: Option<&str>,
    ) -> Result<bool, DomainError> {
        self.sibling_exists(Column::Handle, handle, parent, exclude_id)
            .await
    }

    async fn create(&self, unit: OrganizationUnit) -> Result<OrganizationUnit, DomainError> {
        let txn = self.db.begin().await?;

        if UnitEntity::find_by_id(unit.id.clone())
            .one(&txn)
            .await?
            .is_some()
        {
            return Err(DomainError::id_conflict(&unit.id));
        }

        let handle_taken = UnitEntity::find()
            .filter(Column::DeploymentId.eq(self.deployment_id.as_str()))
            .filter(parent_is(unit.parent.as_deref()))
            .filter(Column::Handle.eq(unit.handle.as_str()))
            .count(&txn)
            .await?
            > 0;
        if handle_taken {
            return Err(DomainError::handle_conflict(&unit.handle));
        }

        UnitAM {
            id: Set(unit.id.clone()),
            deployment_id: Set(self.deployment_id.clone()),
            handle: Set(unit.handle.clone()),
            name: Set(unit.name.clone()),
            description: Set(unit.description.clone()),
            parent_id: Set(unit.parent.clone()),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        debug!(ou_id = %unit.id, "Inserted organization unit");
        Ok(unit)
    }

    async fn update(&self, unit: OrganizationUnit) -> Result<OrganizationUnit, DomainError> {
        let existing = self
            .find(&unit.id)
            .await?
            .ok_or_else(|| DomainError::not_found(&unit.id))?;

        let mut am = existing.into_active_model();
        am.handle = Set(unit.handle.clone());
        am.name = Set(unit.name.clone());
        am.description = Set(unit.description.clone());
        am.parent_id = Set(unit.parent.clone());
        am.update(&self.db).await?;

        Ok(unit)
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let result = UnitEntity::delete_many()
            .filter(Column::DeploymentId.eq(self.deployment_id.as_str()))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found(id));
        }
        Ok(())
    }

    async fn count_children(&self, parent: &str) -> Result<u64, DomainError> {
        Ok(self.under(Some(parent)).count(&self.db).await?)
    }

    async fn list_children(
        &self,
        parent: &str,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<OrganizationUnitBasic>, DomainError> {
        self.page(Some(parent), limit, offset).await
    }

    async fn has_children(&self, id: &str) -> Result<bool, DomainError> {
        Ok(self.count_children(id).await? > 0)
    }

    async fn count_users(&self, id: &str) -> Result<u64, DomainError> {
        Ok(unit_user::Entity::find()
            .filter(unit_user::Column::DeploymentId.eq(self.deployment_id.as_str()))
            .filter(unit_user::Column::OuId.eq(id))
            .count(&self.db)
            .await?)
    }

    async fn list_users(
        &self,
        id: &str,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<OrganizationUnitUser>, DomainError> {
        let rows = unit_user::Entity::find()
            .filter(unit_user::Column::DeploymentId.eq(self.deployment_id.as_str()))
            .filter(unit_user::Column::OuId.eq(id))
            .order_by_asc(unit_user::Column::UserId)
            .limit(limit)
            .offset(offset)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count_groups(&self, id: &str) -> Result<u64, DomainError> {
        Ok(unit_group::Entity::find()
            .filter(unit_group::Column::DeploymentId.eq(self.deployment_id.as_str()))
            .filter(unit_group::Column::OuId.eq(id))
            .count(&self.db)
            .await?)
    }

    async fn list_groups(
        &self,
        id: &str,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<OrganizationUnitGroup>, DomainError> {
        let rows = unit_group::Entity::find()
            .filter(unit_group::Column::DeploymentId.eq(self.deployment_id.as_str()))
            .filter(unit_group::Column::OuId.eq(id))
            .order_by_asc(unit_group::Column::Name)
            .order_by_asc(unit_group::Column::GroupId)
            .limit(limit)
            .offset(offset)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
