pub mod declarative;
pub mod error;
pub mod loader;
pub mod service;
pub mod store;
