use std::sync::Arc;

use anyhow::Context;
use arc_swap::ArcSwapOption;
use declarative_resources::{ResourceSource, StoreMode, StoreModeResolver};
use organization_units_sdk::OrganizationUnitsClientV1;
use sea_orm::DatabaseConnection;
use sea_orm_migration::{MigrationTrait, MigratorTrait};
use tracing::info;

use crate::config::OrganizationUnitsConfig;
use crate::domain::composite::CompositeOrganizationUnitStore;
use crate::domain::loader::load_declarative_organization_units;
use crate::domain::local_client::LocalClient;
use crate::domain::service::{Service, ServiceConfig};
use crate::domain::store::OrganizationUnitStore;
use crate::infra::storage::SeaOrmOrganizationUnitStore;

/// Key of this kind under `declarative_resources.store_modes`.
pub const STORE_MODE_KEY: &str = "organization_units";

/// What the module needs from the host process at startup.
pub struct ModuleDeps<'a> {
    pub db: DatabaseConnection,
    pub resolver: &'a StoreModeResolver,
    pub source: &'a dyn ResourceSource,
}

/// Outcome of [`OrganizationUnitsModule::init`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitReport {
    pub mode: StoreMode,
    pub declarative_count: usize,
}

#[derive(Default)]
pub struct OrganizationUnitsModule {
    service: ArcSwapOption<Service>,
}

impl Clone for OrganizationUnitsModule {
    fn clone(&self) -> Self {
        Self {
            service: ArcSwapOption::new(self.service.load().as_ref().map(Clone::clone)),
        }
    }
}

impl OrganizationUnitsModule {
    /// Schema migrations for the mutable store.
    #[must_use]
    pub fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        crate::infra::storage::migrations::Migrator::migrations()
    }

    /// Build the store for the resolved mode and publish the service.
    ///
    /// # Errors
    /// Declarative loading failures; the host must not start serving.
    pub async fn init(
        &self,
        cfg: &OrganizationUnitsConfig,
        deps: ModuleDeps<'_>,
    ) -> anyhow::Result<InitReport> {
        let mode = deps.resolver.resolve(STORE_MODE_KEY);
        info!(mode = %mode, "Initializing organization units module");

        let mutable: Option<Arc<dyn OrganizationUnitStore>> = if mode.uses_mutable() {
            Some(Arc::new(SeaOrmOrganizationUnitStore::new(
                deps.db,
                cfg.deployment_id.clone(),
            )))
        } else {
            None
        };

        let (declarative, declarative_count): (Option<Arc<dyn OrganizationUnitStore>>, usize) =
            if mode.uses_declarative() {
                let store = load_declarative_organization_units(
                    deps.source,
                    &cfg.resource_dir,
                    mutable.clone(),
                )
                .await
                .context("failed to load declarative organization units")?;
                let count = store.len();
                (Some(Arc::new(store)), count)
            } else {
                (None, 0)
            };

        let store: Arc<dyn OrganizationUnitStore> = match (mutable, declarative) {
            (Some(mutable), Some(declarative)) => Arc::new(CompositeOrganizationUnitStore::new(
                mutable,
                declarative,
                cfg.precedence,
                cfg.max_composite_records,
            )),
            (Some(store), None) | (None, Some(store)) => store,
            (None, None) => {
                anyhow::bail!("store mode '{mode}' selects no organization unit store")
            }
        };

        let service = Arc::new(Service::new(store, ServiceConfig::from(cfg)));
        self.service.store(Some(service));

        info!(mode = %mode, declarative_count, "Organization units module ready");
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

    /// # Errors
    /// When called before a successful [`init`](Self::init).
    pub fn client(&self) -> anyhow::Result<Arc<dyn OrganizationUnitsClientV1>> {
        Ok(Arc::new(LocalClient::new(self.service()?)))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn module_starts_uninitialized() {
        let module = OrganizationUnitsModule::default();
        assert!(module.service().is_err());
        assert!(module.clone().client().is_err());
    }
}
