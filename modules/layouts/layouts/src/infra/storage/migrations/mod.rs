use sea_orm_migration::prelude::*;

mod m20250601_000002_create_layouts;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20250601_000002_create_layouts::Migration)]
    }
}
