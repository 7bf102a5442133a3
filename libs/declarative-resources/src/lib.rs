//! Declarative resources
//!
//! Shared machinery for resource kinds that can be defined both in
//! version-controlled files (loaded once at startup, read-only afterwards)
//! and at runtime through the API (persisted in the database).
//!
//! ## Contents
//!
//! - [`store_mode`] - per-kind store mode resolution and the composite precedence policy
//! - [`source`] - discovery of raw resource definition files
//! - [`loader`] - the kind-agnostic startup loader (parse, order, validate, insert)
//! - [`collection`] - the in-memory arena backing every declarative store
//! - [`compose`] - merge / paginate / ceiling helpers used by composite stores
//!
//! ## Configuration
//!
//! ```yaml
//! declarative_resources:
//!   enabled: false
//!   root_dir: "config/resources"
//!   store_modes:
//!     organization_units: composite
//!     layouts: declarative
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod collection;
pub mod compose;
pub mod config;
pub mod error;
pub mod loader;
pub mod source;
pub mod store_mode;

pub use collection::DeclarativeCollection;
pub use compose::{DEFAULT_MAX_COMPOSITE_RECORDS, ensure_within_ceiling, merge_by_id, paginate};
pub use config::DeclarativeResourcesConfig;
pub use error::{LoaderError, ResultLimitExceeded, ValidationError};
pub use loader::{ResourceHandler, ResourceLoaderConfig, dependency_order, load_resources};
pub use source::{DirectorySource, RawResource, ResourceSource, StaticSource};
pub use store_mode::{Precedence, StoreMode, StoreModeResolver};
