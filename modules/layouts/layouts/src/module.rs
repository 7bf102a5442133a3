use std::sync::Arc;

use anyhow::Context;
use arc_swap::ArcSwapOption;
use declarative_resources::{ResourceSource, StoreMode, StoreModeResolver};
use sea_orm::DatabaseConnection;
use sea_orm_migration::{MigrationTrait, MigratorTrait};
use tracing::{info, warn};

use crate::config::LayoutsConfig;
use crate::domain::loader::load_declarative_layouts;
use crate::domain::service::{Service, ServiceConfig};
use crate::domain::store::LayoutStore;
use crate::infra::storage::SeaOrmLayoutStore;

/// Key of this kind under `declarative_resources.store_modes`.
pub const STORE_MODE_KEY: &str = "layouts";

pub struct ModuleDeps<'a> {
    pub db: DatabaseConnection,
    pub resolver: &'a StoreModeResolver,
    pub source: &'a dyn ResourceSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitReport {
    pub mode: StoreMode,
    pub declarative_count: usize,
}

#[derive(Default)]
pub struct LayoutsModule {
    service: ArcSwapOption<Service>,
}

impl LayoutsModule {
    #[must_use]
    pub fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        crate::infra::storage::migrations::Migrator::migrations()
    }

    /// Layouts have no composite view: `composite` is served declaratively.
    #[must_use]
    pub fn effective_mode(resolved: StoreMode) -> StoreMode {
        match resolved {
            StoreMode::Composite => {
                warn!("Composite store mode is not supported for layouts; using declarative");
                StoreMode::Declarative
            }
            other => other,
        }
    }

    /// # Errors
    /// Declarative loading failures; the host must not start serving.
    pub async fn init(
        &self,
        cfg: &LayoutsConfig,
        deps: ModuleDeps<'_>,
    ) -> anyhow::Result<InitReport> {
        let mode = Self::effective_mode(deps.resolver.resolve(STORE_MODE_KEY));
        info!(mode = %mode, "Initializing layouts module");

        let (store, declarative_count): (Arc<dyn LayoutStore>, usize) = match mode {
            StoreMode::Mutable => (
                Arc::new(SeaOrmLayoutStore::new(deps.db, cfg.deployment_id.clone())),
                0,
            ),
            StoreMode::Declarative | StoreMode::Composite => {
                let store = load_declarative_layouts(deps.source, &cfg.resource_dir)
                    .await
                    .context("failed to load declarative layouts")?;
                let count = store.len();
                (Arc::new(store), count)
            }
        };

        self.service
            .store(Some(Arc::new(Service::new(store, ServiceConfig::from(cfg)))));
        info!(mode = %mode, declarative_count, "Layouts module ready");
        Ok(InitReport {
            mode,
            declarative_count,
        })
    }

    /// # Errors
    /// When called before a successful [`init`](Self::init).
    pub fn service(&self) -> anyhow::Result<Arc<Service>> {
        self.service
            .load_full()
            .ok_or_else(|| anyhow::anyhow!("Service not initialized"))
    }
}
