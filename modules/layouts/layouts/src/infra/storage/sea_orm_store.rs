use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select, Set,
};

use super::entity::{ActiveModel, Column, Entity};
use crate::domain::error::DomainError;
use crate::domain::store::LayoutStore;
use crate::models::Layout;

#[derive(Clone)]
pub struct SeaOrmLayoutStore {
    db: DatabaseConnection,
    deployment_id: String,
}

impl SeaOrmLayoutStore {
    #[must_use]
    pub fn new(db: DatabaseConnection, deployment_id: impl Into<String>) -> Self {
        Self {
            db,
            deployment_id: deployment_id.into(),
        }
    }

    fn scoped(&self) -> Select<Entity> {
        Entity::find().filter(Column::DeploymentId.eq(self.deployment_id.as_str()))
    }

    fn active_model(&self, layout: &Layout) -> ActiveModel {
        ActiveModel {
            id: Set(layout.id.clone()),
            deployment_id: Set(self.deployment_id.clone()),
            name: Set(layout.name.clone()),
            description: Set(layout.description.clone()),
            layout: Set(layout.layout.to_string()),
        }
    }
}

#[async_trait]
impl LayoutStore for SeaOrmLayoutStore {
    fn is_read_only(&self) -> bool {
        false
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(self.scoped().count(&self.db).await?)
    }

    async fn list(&self, limit: u64, offset: u64) -> Result<Vec<Layout>, DomainError> {
        self.scoped()
            .order_by_asc(Column::Name)
            .order_by_asc(Column::Id)
            .limit(limit)
            .offset(offset)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Layout::try_from)
            .collect()
    }

    async fn get(&self, id: &str) -> Result<Layout, DomainError> {
        self.scoped()
            .filter(Column::Id.eq(id))
            .one(&self.db)
            .await?
            .ok_or_else(|| DomainError::not_found(id))?
            .try_into()
    }

    async fn exists(&self, id: &str) -> Result<bool, DomainError> {
        Ok(Entity::find_by_id(id.to_owned())
            .one(&self.db)
            .await?
            .is_some())
    }

    async fn has_name_conflict(
        &self,
        name: &str,
        exclude_id: Option<&str>,
    ) -> Result<bool, DomainError> {
        let mut query = self.scoped().filter(Column::Name.eq(name));
        if let Some(id) = exclude_id {
            query = query.filter(Column::Id.ne(id));
        }
        Ok(query.count(&self.db).await? > 0)
    }

    async fn create(&self, layout: Layout) -> Result<Layout, DomainError> {
        self.active_model(&layout).insert(&self.db).await?;
        Ok(layout)
    }

    async fn update(&self, layout: Layout) -> Result<Layout, DomainError> {
        let result = Entity::update_many()
            .set(self.active_model(&layout))
            .filter(Column::DeploymentId.eq(self.deployment_id.as_str()))
            .filter(Column::Id.eq(layout.id.as_str()))
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found(&layout.id));
        }
        Ok(layout)
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let result = Entity::delete_many()
            .filter(Column::DeploymentId.eq(self.deployment_id.as_str()))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found(id));
        }
        Ok(())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::test_support::{inmem_db, layout};
    use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

    #[tokio::test]
    async fn malformed_stored_json_is_a_conversion_error() {
        let db = inmem_db().await;
        let store = SeaOrmLayoutStore::new(db.clone(), "default");
        store.create(layout("l1", "Broken")).await.unwrap();

        db.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            "UPDATE layouts SET layout = '{not json' WHERE id = 'l1'",
        ))
        .await
        .unwrap();

        let err = store.get("l1").await.unwrap_err();
        assert!(matches!(err, DomainError::Internal(ref m) if m.contains("not valid JSON")));
    }

    #[tokio::test]
    async fn deployments_do_not_see_each_other() {
        let db = inmem_db().await;
        let a = SeaOrmLayoutStore::new(db.clone(), "a");
        let b = SeaOrmLayoutStore::new(db, "b");
        a.create(layout("l1", "Main")).await.unwrap();

        assert_eq!(a.count().await.unwrap(), 1);
        assert_eq!(b.count().await.unwrap(), 0);
        assert!(!b.has_name_conflict("Main", None).await.unwrap());
        assert!(b.update(layout("l1", "Main")).await.unwrap_err().is_not_found());
    }
}
