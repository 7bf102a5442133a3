use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum OrganizationUnits {
    Table,
    Id,
    DeploymentId,
    Handle,
    Name,
    Description,
    ParentId,
}

#[derive(DeriveIden)]
enum OrganizationUnitUsers {
    Table,
    OuId,
    UserId,
    DeploymentId,
}

#[derive(DeriveIden)]
enum OrganizationUnitGroups {
    Table,
    OuId,
    GroupId,
    DeploymentId,
    Name,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OrganizationUnits::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OrganizationUnits::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(OrganizationUnits::DeploymentId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(OrganizationUnits::Handle).string().not_null())
                    .col(ColumnDef::new(OrganizationUnits::Name).string().not_null())
                    .col(ColumnDef::new(OrganizationUnits::Description).text().null())
                    .col(ColumnDef::new(OrganizationUnits::ParentId).string().null())
                    .to_owned(),
            )
            .await?;

        // Parents may be declarative, so `parent_id` carries no foreign key.
        manager
            .create_index(
                Index::create()
                    .name("idx_organization_units_parent")
                    .table(OrganizationUnits::Table)
                    .col(OrganizationUnits::DeploymentId)
                    .col(OrganizationUnits::ParentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OrganizationUnitUsers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OrganizationUnitUsers::OuId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OrganizationUnitUsers::UserId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OrganizationUnitUsers::DeploymentId)
                            .string()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(OrganizationUnitUsers::OuId)
                            .col(OrganizationUnitUsers::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_organization_unit_users_ou")
                            .from(OrganizationUnitUsers::Table, OrganizationUnitUsers::OuId)
                            .to(OrganizationUnits::Table, OrganizationUnits::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OrganizationUnitGroups::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OrganizationUnitGroups::OuId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OrganizationUnitGroups::GroupId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OrganizationUnitGroups::DeploymentId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OrganizationUnitGroups::Name)
                            .string()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(OrganizationUnitGroups::OuId)
                            .col(OrganizationUnitGroups::GroupId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_organization_unit_groups_ou")
                            .from(OrganizationUnitGroups::Table, OrganizationUnitGroups::OuId)
                            .to(OrganizationUnits::Table, OrganizationUnits::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OrganizationUnitGroups::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(OrganizationUnitUsers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(OrganizationUnits::Table).to_owned())
            .await
    }
}
