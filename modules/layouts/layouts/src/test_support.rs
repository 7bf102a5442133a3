#![allow(clippy::unwrap_used, clippy::expect_used)]

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use crate::infra::storage::SeaOrmLayoutStore;
use crate::infra::storage::migrations::Migrator;
use crate::models::{Layout, NewLayout};

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

pub async fn inmem_store() -> SeaOrmLayoutStore {
    SeaOrmLayoutStore::new(inmem_db().await, "default")
}

#[must_use]
pub fn layout(id: &str, name: &str) -> Layout {
    Layout {
        id: id.to_owned(),
        name: name.to_owned(),
        description: None,
        layout: serde_json::json!({"columns": 1}),
        is_read_only: false,
    }
}

#[must_use]
pub fn new_layout(name: &str) -> NewLayout {
    NewLayout {
        id: None,
        name: name.to_owned(),
        description: None,
        layout: serde_json::json!({"columns": 1}),
    }
}
