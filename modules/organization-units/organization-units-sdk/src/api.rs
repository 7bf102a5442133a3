use async_trait::async_trait;

use crate::errors::OrganizationUnitsError;
use crate::models::{
    NewOrganizationUnit, OrganizationUnit, OrganizationUnitBasic, OrganizationUnitGroup,
    OrganizationUnitUpdate, OrganizationUnitUser, Page,
};

/// Public API of the organization units module.
///
/// `limit` / `offset` are optional; the module applies its configured
/// default page size and clamps `limit` to its maximum.
#[async_trait]
pub trait OrganizationUnitsClientV1: Send + Sync {
    async fn list_root_units(
        &self,
        limit: Option<u64>,
        offset: Option<u64>,
    ) -> Result<Page<OrganizationUnitBasic>, OrganizationUnitsError>;

    async fn get_unit(&self, id: &str) -> Result<OrganizationUnit, OrganizationUnitsError>;

    /// Resolve a `/`-separated handle path such as `engineering/platform`.
    async fn get_unit_by_path(&self, path: &str)
    -> Result<OrganizationUnit, OrganizationUnitsError>;

    async fn create_unit(
        &self,
        new_unit: NewOrganizationUnit,
    ) -> Result<OrganizationUnit, OrganizationUnitsError>;

    async fn update_unit(
        &self,
        id: &str,
        update: OrganizationUnitUpdate,
    ) -> Result<OrganizationUnit, OrganizationUnitsError>;

    async fn delete_unit(&self, id: &str) -> Result<(), OrganizationUnitsError>;

    async fn list_children(
        &self,
        id: &str,
        limit: Option<u64>,
        offset: Option<u64>,
    ) -> Result<Page<OrganizationUnitBasic>, OrganizationUnitsError>;

    async fn list_children_by_path(
        &self,
        path: &str,
        limit: Option<u64>,
        offset: Option<u64>,
    ) -> Result<Page<OrganizationUnitBasic>, OrganizationUnitsError>;

    async fn list_users(
        &self,
        id: &str,
        limit: Option<u64>,
        offset: Option<u64>,
    ) -> Result<Page<OrganizationUnitUser>, OrganizationUnitsError>;

    async fn list_groups(
        &self,
        id: &str,
        limit: Option<u64>,
        offset: Option<u64>,
    ) -> Result<Page<OrganizationUnitGroup>, OrganizationUnitsError>;
}
