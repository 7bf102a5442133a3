#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Module startup against an on-disk resource tree and an in-memory database.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use declarative_resources::{
    DeclarativeResourcesConfig, DirectorySource, StoreMode, StoreModeResolver,
};
use organization_units::module::{ModuleDeps, OrganizationUnitsModule};
use organization_units::{NewOrganizationUnit, OrganizationUnitsConfig, OrganizationUnitsError};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::{MigrationTrait, MigratorTrait};

struct TestMigrator;

#[async_trait::async_trait]
impl MigratorTrait for TestMigrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        OrganizationUnitsModule::migrations()
    }
}

async fn database() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await.unwrap();
    TestMigrator::up(&db, None).await.unwrap();
    db
}

fn write_units(root: &Path, files: &[(&str, &str)]) {
    let dir = root.join("organization_units");
    fs::create_dir_all(&dir).unwrap();
    for (name, body) in files {
        fs::write(dir.join(name), body).unwrap();
    }
}

fn resolver(root: &Path, mode: &str) -> StoreModeResolver {
    StoreModeResolver::new(DeclarativeResourcesConfig {
        enabled: false,
        root_dir: root.to_path_buf(),
        store_modes: HashMap::from([("organization_units".to_owned(), mode.to_owned())]),
    })
}

#[tokio::test]
async fn composite_mode_serves_both_stores() {
    let tmp = tempfile::tempdir().unwrap();
    write_units(
        tmp.path(),
        &[
            (
                "10-platform.yaml",
                "id: ou-platform\nhandle: platform\nname: Platform\nparent: ou-eng\n",
            ),
            (
                "20-eng.yaml",
                "id: ou-eng\nhandle: engineering\nname: Engineering\n",
            ),
        ],
    );

    let module = OrganizationUnitsModule::default();
    let report = module
        .init(
            &OrganizationUnitsConfig::default(),
            ModuleDeps {
                db: database().await,
                resolver: &resolver(tmp.path(), " Composite "),
                source: &DirectorySource::new(tmp.path()),
            },
        )
        .await
        .unwrap();
    assert_eq!(report.mode, StoreMode::Composite);
    assert_eq!(report.declarative_count, 2);

    let client = module.client().unwrap();
    let created = client
        .create_unit(NewOrganizationUnit {
            handle: "sre".to_owned(),
            name: "SRE".to_owned(),
            parent: Some("ou-platform".to_owned()),
            ..Default::default()
        })
        .await
        .unwrap();

    let found = client
        .get_unit_by_path("engineering/platform/sre")
        .await
        .unwrap();
    assert_eq!(found.id, created.id);

    let err = client.delete_unit("ou-platform").await.unwrap_err();
    assert_eq!(err, OrganizationUnitsError::immutable("ou-platform"));
}

#[tokio::test]
async fn declarative_mode_rejects_writes() {
    let tmp = tempfile::tempdir().unwrap();
    write_units(
        tmp.path(),
        &[("eng.yaml", "id: ou-eng\nhandle: engineering\nname: Engineering\n")],
    );

    let module = OrganizationUnitsModule::default();
    module
        .init(
            &OrganizationUnitsConfig::default(),
            ModuleDeps {
                db: database().await,
                resolver: &resolver(tmp.path(), "declarative"),
                source: &DirectorySource::new(tmp.path()),
            },
        )
        .await
        .unwrap();

    let client = module.client().unwrap();
    let page = client.list_root_units(None, None).await.unwrap();
    assert_eq!(page.total, 1);
    assert!(page.items[0].is_read_only);

    let err = client
        .create_unit(NewOrganizationUnit {
            handle: "sales".to_owned(),
            name: "Sales".to_owned(),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, OrganizationUnitsError::Immutable { .. }));
}

#[tokio::test]
async fn invalid_definition_aborts_startup() {
    let tmp = tempfile::tempdir().unwrap();
    write_units(
        tmp.path(),
        &[("orphan.yaml", "id: ou-x\nhandle: x\nname: X\nparent: ou-missing\n")],
    );

    let module = OrganizationUnitsModule::default();
    let err = module
        .init(
            &OrganizationUnitsConfig::default(),
            ModuleDeps {
                db: database().await,
                resolver: &resolver(tmp.path(), "composite"),
                source: &DirectorySource::new(tmp.path()),
            },
        )
        .await
        .unwrap_err();

    assert!(format!("{err:#}").contains("parent 'ou-missing' is not defined"));
    assert!(module.service().is_err());
}

#[tokio::test]
async fn unrecognized_mode_falls_back_to_mutable() {
    let tmp = tempfile::tempdir().unwrap();
    let module = OrganizationUnitsModule::default();
    let report = module
        .init(
            &OrganizationUnitsConfig::default(),
            ModuleDeps {
                db: database().await,
                resolver: &resolver(tmp.path(), "hybrid"),
                source: &DirectorySource::new(tmp.path()),
            },
        )
        .await
        .unwrap();
    assert_eq!(report.mode, StoreMode::Mutable);
    assert_eq!(report.declarative_count, 0);
}
