use organization_units_sdk::OrganizationUnitUser;
use sea_orm::entity::prelude::*;

/// Membership of a user in an organization unit.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "organization_unit_users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub ou_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    pub deployment_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::organization_unit::Entity",
        from = "Column::OuId",
        to = "super::organization_unit::Column::Id"
    )]
    OrganizationUnit,
}

impl Related<super::organization_unit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrganizationUnit.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for OrganizationUnitUser {
    fn from(m: Model) -> Self {
        Self { id: m.user_id }
    }
}
