//! Organization Units Module
//!
//! Hierarchical organization units that can come from three places,
//! selected per deployment by the resolved store mode:
//!
//! - **mutable** - rows in the database, fully writable through the API
//! - **declarative** - YAML files loaded once at startup, read-only
//! - **composite** - both; declarative units are surfaced as read-only and
//!   listings are merged across the two stores
//!
//! ## Layout
//!
//! - `domain/store.rs` - the store contract every backing store implements
//! - `domain/declarative.rs`, `domain/composite.rs` - in-memory and merged stores
//! - `domain/loader.rs` - declarative resource handler (parse and validate)
//! - `domain/service.rs` - validation and business rules in front of the store
//! - `infra/storage/` - `SeaORM` entities, migrations and the mutable store
//! - `module.rs` - startup wiring
//!
//! The public contract lives in `organization-units-sdk` and is re-exported here.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

// === PUBLIC API (from SDK) ===
pub use organization_units_sdk::{
    NewOrganizationUnit, OrganizationUnit, OrganizationUnitBasic, OrganizationUnitGroup,
    OrganizationUnitUpdate, OrganizationUnitUser, OrganizationUnitsClientV1,
    OrganizationUnitsError, Page,
};

pub mod config;
pub mod module;

pub use config::OrganizationUnitsConfig;
pub use module::OrganizationUnitsModule;

// === INTERNAL MODULES ===
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;

#[cfg(test)]
mod test_support;
