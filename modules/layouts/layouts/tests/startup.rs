#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use declarative_resources::{
    DeclarativeResourcesConfig, DirectorySource, StoreMode, StoreModeResolver,
};
use layouts::module::{LayoutsModule, ModuleDeps};
use layouts::{LayoutsConfig, NewLayout};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::{MigrationTrait, MigratorTrait};

struct TestMigrator;

#[async_trait::async_trait]
impl MigratorTrait for TestMigrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        LayoutsModule::migrations()
    }
}

async fn database() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await.unwrap();
    TestMigrator::up(&db, None).await.unwrap();
    db
}

fn resolver(root: &Path, enabled: bool, mode: Option<&str>) -> StoreModeResolver {
    StoreModeResolver::new(DeclarativeResourcesConfig {
        enabled,
        root_dir: root.to_path_buf(),
        store_modes: mode
            .map(|m| HashMap::from([("layouts".to_owned(), m.to_owned())]))
            .unwrap_or_default(),
    })
}

#[tokio::test]
async fn global_flag_selects_declarative_layouts() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("layouts");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("default.yml"),
        "id: default\nname: Default\nlayout:\n  columns: 3\n",
    )
    .unwrap();

    let module = LayoutsModule::default();
    let report = module
        .init(
            &LayoutsConfig::default(),
            ModuleDeps {
                db: database().await,
                resolver: &resolver(tmp.path(), true, None),
                source: &DirectorySource::new(tmp.path()),
            },
        )
        .await
        .unwrap();
    assert_eq!(report.mode, StoreMode::Declarative);
    assert_eq!(report.declarative_count, 1);

    let svc = module.service().unwrap();
    let layout = svc.get("default").await.unwrap();
    assert_eq!(layout.layout["columns"], 3);
    assert!(svc.delete("default").await.is_err());
}

#[tokio::test]
async fn mutable_layouts_are_writable() {
    let tmp = tempfile::tempdir().unwrap();
    let module = LayoutsModule::default();
    module
        .init(
            &LayoutsConfig::default(),
            ModuleDeps {
                db: database().await,
                resolver: &resolver(tmp.path(), false, Some("mutable")),
                source: &DirectorySource::new(tmp.path()),
            },
        )
        .await
        .unwrap();

    let svc = module.service().unwrap();
    let created = svc
        .create(NewLayout {
            id: Some("wide".to_owned()),
            name: "Wide".to_owned(),
            description: None,
            layout: serde_json::json!({"columns": 4}),
        })
        .await
        .unwrap();
    assert_eq!(svc.get(&created.id).await.unwrap().name, "Wide");
}
