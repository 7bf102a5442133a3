//! Process startup: database, schema, then the modules.

use anyhow::Context;
use declarative_resources::{DirectorySource, StoreModeResolver};
use layouts::LayoutsModule;
use organization_units::OrganizationUnitsModule;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::{MigrationTrait, MigratorTrait};
use serde::Serialize;
use tracing::info;

use crate::config::{AppConfig, DatabaseConfig};

/// Every module's migrations, applied as one ordered set.
pub struct AppMigrator;

#[async_trait::async_trait]
impl MigratorTrait for AppMigrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        let mut migrations = OrganizationUnitsModule::migrations();
        migrations.extend(LayoutsModule::migrations());
        migrations
    }
}

/// Store mode and declarative record count for one resource kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KindReport {
    pub kind: &'static str,
    pub mode: String,
    pub declarative_count: usize,
}

pub struct App {
    pub organization_units: OrganizationUnitsModule,
    pub layouts: LayoutsModule,
    pub reports: Vec<KindReport>,
}

/// # Errors
/// Unreachable database, failed migrations or invalid declarative resources.
pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new(cfg.url.clone());
    opts.max_connections(cfg.max_conns.max(1))
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(opts)
        .await
        .context("failed to connect to database")?;
    AppMigrator::up(&db, None)
        .await
        .context("failed to apply migrations")?;
    Ok(db)
}

/// # Errors
/// Any module that fails to initialize aborts startup.
pub async fn start(cfg: &AppConfig) -> anyhow::Result<App> {
    let db = connect(&cfg.database).await?;
    let resolver = StoreModeResolver::new(cfg.declarative_resources.clone());
    let source = DirectorySource::new(cfg.declarative_resources.root_dir.clone());

    let organization_units = OrganizationUnitsModule::default();
    let ou_report = organization_units
        .init(
            &cfg.organization_units,
            organization_units::module::ModuleDeps {
                db: db.clone(),
                resolver: &resolver,
                source: &source,
            },
        )
        .await?;

    let layouts = LayoutsModule::default();
    let layout_report = layouts
        .init(
            &cfg.layouts,
            layouts::module::ModuleDeps {
                db,
                resolver: &resolver,
                source: &source,
            },
        )
        .await?;

    let reports = vec![
        KindReport {
            kind: organization_units::module::STORE_MODE_KEY,
            mode: ou_report.mode.to_string(),
            declarative_count: ou_report.declarative_count,
        },
        KindReport {
            kind: layouts::module::STORE_MODE_KEY,
            mode: layout_report.mode.to_string(),
            declarative_count: layout_report.declarative_count,
        },
    ];
    info!(kinds = reports.len(), "All modules initialized");

    Ok(App {
        organization_units,
        layouts,
        reports,
    })
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use std::fs;

    use super::*;

    fn resource_tree() -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        let ou_dir = tmp.path().join("organization_units");
        let layout_dir = tmp.path().join("layouts");
        fs::create_dir_all(&ou_dir).unwrap();
        fs::create_dir_all(&layout_dir).unwrap();
        fs::write(
            ou_dir.join("eng.yaml"),
            "id: ou-eng\nhandle: engineering\nname: Engineering\n",
        )
        .unwrap();
        fs::write(
            layout_dir.join("default.yaml"),
            "id: layout-default\nname: Default\nlayout:\n  columns: 2\n",
        )
        .unwrap();
        tmp
    }

    #[tokio::test]
    async fn starts_every_module_against_a_fresh_database() {
        let tmp = resource_tree();
        let mut cfg = AppConfig::default();
        cfg.declarative_resources.root_dir = tmp.path().to_path_buf();
        cfg.declarative_resources
            .store_modes
            .insert("organization_units".to_owned(), "composite".to_owned());
        cfg.declarative_resources
            .store_modes
            .insert("layouts".to_owned(), "composite".to_owned());

        let app = start(&cfg).await.unwrap();
        assert_eq!(
            app.reports,
            vec![
                KindReport {
                    kind: "organization_units",
                    mode: "composite".to_owned(),
                    declarative_count: 1,
                },
                KindReport {
                    kind: "layouts",
                    mode: "declarative".to_owned(),
                    declarative_count: 1,
                },
            ]
        );

        let svc = app.organization_units.service().unwrap();
        assert_eq!(svc.list_root(None, None).await.unwrap().total, 1);
        let layouts = app.layouts.service().unwrap();
        assert_eq!(layouts.get("layout-default").await.unwrap().name, "Default");
    }

    #[tokio::test]
    async fn invalid_declarative_resources_abort_startup() {
        let tmp = resource_tree();
        fs::write(
            tmp.path().join("organization_units").join("broken.yaml"),
            "id: ou-x\nhandle: x\nname: X\nparent: ou-missing\n",
        )
        .unwrap();
        let mut cfg = AppConfig::default();
        cfg.declarative_resources.enabled = true;
        cfg.declarative_resources.root_dir = tmp.path().to_path_buf();

        let err = start(&cfg).await.err().unwrap();
        assert!(format!("{err:#}").contains("organization units"));
    }
}
