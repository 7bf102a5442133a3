use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Layouts {
    Table,
    Id,
    DeploymentId,
    Name,
    Description,
    Layout,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Layouts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Layouts::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Layouts::DeploymentId).string().not_null())
                    .col(ColumnDef::new(Layouts::Name).string().not_null())
                    .col(ColumnDef::new(Layouts::Description).text().null())
                    .col(ColumnDef::new(Layouts::Layout).text().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_layouts_deployment_name")
                    .table(Layouts::Table)
                    .col(Layouts::DeploymentId)
                    .col(Layouts::Name)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Layouts::Table).to_owned())
            .await
    }
}
