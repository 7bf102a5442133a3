pub mod composite;
pub mod declarative;
pub mod error;
pub mod loader;
pub mod local_client;
pub mod service;
pub mod store;
