//! Organization Units SDK
//!
//! Public contract of the organization units module:
//! - [`OrganizationUnitsClientV1`] - trait other modules and front-ends call
//! - models: [`OrganizationUnit`], [`OrganizationUnitBasic`], [`NewOrganizationUnit`], ...
//! - [`OrganizationUnitsError`] - errors safe to expose to callers
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod errors;
pub mod models;

pub use api::OrganizationUnitsClientV1;
pub use errors::OrganizationUnitsError;
pub use models::{
    NewOrganizationUnit, OrganizationUnit, OrganizationUnitBasic, OrganizationUnitGroup,
    OrganizationUnitUpdate, OrganizationUnitUser, Page,
};
