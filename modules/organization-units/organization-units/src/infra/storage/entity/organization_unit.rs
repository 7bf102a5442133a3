use organization_units_sdk::OrganizationUnit;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "organization_units")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub deployment_id: String,
    pub handle: String,
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::unit_user::Entity")]
    Users,
    #[sea_orm(has_many = "super::unit_group::Entity")]
    Groups,
}

impl Related<super::unit_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::unit_group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Groups.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for OrganizationUnit {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            handle: m.handle,
            name: m.name,
            description: m.description,
            parent: m.parent_id,
        }
    }
}
