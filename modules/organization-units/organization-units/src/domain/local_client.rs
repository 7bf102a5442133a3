//! Local (in-process) client for the organization units module.

use std::sync::Arc;

use async_trait::async_trait;
use organization_units_sdk::{
    NewOrganizationUnit, OrganizationUnit, OrganizationUnitBasic, OrganizationUnitGroup,
    OrganizationUnitUpdate, OrganizationUnitUser, OrganizationUnitsClientV1,
    OrganizationUnitsError, Page,
};

use super::error::DomainError;
use super::service::Service;

/// Local client wrapping the service.
pub struct LocalClient {
    svc: Arc<Service>,
}

impl LocalClient {
    #[must_use]
    pub fn new(svc: Arc<Service>) -> Self {
        Self { svc }
    }
}

fn log_and_convert(op: &str, e: DomainError) -> OrganizationUnitsError {
    let converted = OrganizationUnitsError::from(e);
    if converted.is_client_error() {
        tracing::debug!(operation = op, error = %converted, "organization_units call rejected");
    } else {
        tracing::error!(operation = op, "organization_units call failed");
    }
    converted
}

#[async_trait]
impl OrganizationUnitsClientV1 for LocalClient {
    async fn list_root_units(
        &self,
        limit: Option<u64>,
        offset: Option<u64>,
    ) -> Result<Page<OrganizationUnitBasic>, OrganizationUnitsError> {
        self.svc
            .list_root(limit, offset)
            .await
            .map_err(|e| log_and_convert("list_root_units", e))
    }

    async fn get_unit(&self, id: &str) -> Result<OrganizationUnit, OrganizationUnitsError> {
        self.svc
            .get(id)
            .await
            .map_err(|e| log_and_convert("get_unit", e))
    }

    async fn get_unit_by_path(
        &self,
        path: &str,
    ) -> Result<OrganizationUnit, OrganizationUnitsError> {
        self.svc
            .get_by_path(path)
            .await
            .map_err(|e| log_and_convert("get_unit_by_path", e))
    }

    async fn create_unit(
        &self,
        new_unit: NewOrganizationUnit,
    ) -> Result<OrganizationUnit, OrganizationUnitsError> {
        self.svc
            .create(new_unit)
            .await
            .map_err(|e| log_and_convert("create_unit", e))
    }

    async fn update_unit(
        &self,
        id: &str,
        update: OrganizationUnitUpdate,
    ) -> Result<OrganizationUnit, OrganizationUnitsError> {
        self.svc
            .update(id, update)
            .await
            .map_err(|e| log_and_convert("update_unit", e))
    }

    async fn delete_unit(&self, id: &str) -> Result<(), OrganizationUnitsError> {
        self.svc
            .delete(id)
            .await
            .map_err(|e| log_and_convert("delete_unit", e))
    }

    async fn list_children(
        &self,
        id: &str,
        limit: Option<u64>,
        offset: Option<u64>,
    ) -> Result<Page<OrganizationUnitBasic>, OrganizationUnitsError> {
        self.svc
            .list_children(id, limit, offset)
            .await
            .map_err(|e| log_and_convert("list_children", e))
    }

    async fn list_children_by_path(
        &self,
        path: &str,
        limit: Option<u64>,
        offset: Option<u64>,
    ) -> Result<Page<OrganizationUnitBasic>, OrganizationUnitsError> {
        self.svc
            .list_children_by_path(path, limit, offset)
            .await
            .map_err(|e| log_and_convert("list_children_by_path", e))
    }

    async fn list_users(
        &self,
        id: &str,
        limit: Option<u64>,
        offset: Option<u64>,
    ) -> Result<Page<OrganizationUnitUser>, OrganizationUnitsError> {
        self.svc
            .list_users(id, limit, offset)
            .await
            .map_err(|e| log_and_convert("list_users", e))
    }

    async fn list_groups(
        &self,
        id: &str,
        limit: Option<u64>,
        offset: Option<u64>,
    ) -> Result<Page<OrganizationUnitGroup>, OrganizationUnitsError> {
        self.svc
            .list_groups(id, limit, offset)
            .await
            .map_err(|e| log_and_convert("list_groups", e))
    }
}
