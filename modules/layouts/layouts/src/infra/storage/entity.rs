use sea_orm::entity::prelude::*;

use crate::domain::error::DomainError;
use crate::models::Layout;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "layouts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub deployment_id: String,
    pub name: String,
    pub description: Option<String>,
    /// Serialized JSON document.
    #[sea_orm(column_type = "Text")]
    pub layout: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Layout {
    type Error = DomainError;

    fn try_from(m: Model) -> Result<Self, Self::Error> {
        let layout = serde_json::from_str(&m.layout).map_err(|e| {
            DomainError::internal(format!("stored layout '{}' is not valid JSON: {e}", m.id))
        })?;
        Ok(Self {
            id: m.id,
            name: m.name,
            description: m.description,
            layout,
            is_read_only: false,
        })
    }
}
