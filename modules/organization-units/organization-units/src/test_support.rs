#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use declarative_resources::DeclarativeCollection;
use organization_units_sdk::OrganizationUnit;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use crate::domain::service::{Service, ServiceConfig};
use crate::domain::store::OrganizationUnitStore;
use crate::infra::storage::SeaOrmOrganizationUnitStore;
use crate::infra::storage::migrations::Migrator;

/// Create an in-memory database with the schema applied.
pub async fn inmem_db() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opts)
        .await
        .expect("Failed to connect to in-memory database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

pub async fn inmem_store() -> SeaOrmOrganizationUnitStore {
    SeaOrmOrganizationUnitStore::new(inmem_db().await, "default")
}

#[must_use]
pub fn ou(id: &str, handle: &str, name: &str, parent: Option<&str>) -> OrganizationUnit {
    OrganizationUnit {
        id: id.to_owned(),
        handle: handle.to_owned(),
        name: name.to_owned(),
        description: None,
        parent: parent.map(str::to_owned),
    }
}

#[must_use]
pub fn declarative_units(units: &[OrganizationUnit]) -> DeclarativeCollection<OrganizationUnit> {
    let mut c = DeclarativeCollection::new();
    for unit in units {
        c.insert(unit.id.clone(), unit.clone())
            .expect("duplicate declarative id in fixture");
    }
    c
}

pub async fn seed_unit(store: &dyn OrganizationUnitStore, unit: OrganizationUnit) {
    store.create(unit).await.expect("seed organization unit");
}

pub fn service(store: Arc<dyn OrganizationUnitStore>) -> Service {
    Service::new(store, ServiceConfig::default())
}
