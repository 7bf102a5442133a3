pub mod entity;
pub mod migrations;
pub mod sea_orm_store;

pub use sea_orm_store::SeaOrmLayoutStore;
