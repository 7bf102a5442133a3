use organization_units_sdk::OrganizationUnitGroup;
use sea_orm::entity::prelude::*;

/// A group assigned to an organization unit.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "organization_unit_groups")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub ou_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub group_id: String,
    pub deployment_id: String,
    pub name: String,
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

impl From<Model> for OrganizationUnitGroup {
    fn from(m: Model) -> Self {
        Self {
            id: m.group_id,
            name: m.name,
        }
    }
}
