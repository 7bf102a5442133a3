//! Layouts Module
//!
//! A flat resource kind (no hierarchy) holding an opaque JSON layout
//! document. Layouts live either in the database (`mutable`) or in YAML
//! files under `<root_dir>/layouts/` (`declarative`); there is no composite
//! view for this kind.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod models;
pub mod module;

pub use config::LayoutsConfig;
pub use models::{Layout, LayoutPage, LayoutUpdate, NewLayout};
pub use module::LayoutsModule;

#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;

#[cfg(test)]
mod test_support;
