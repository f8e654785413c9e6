use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "geographic_levels")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub code: String,
    pub name: Option<String>,
    #[sea_orm(unique)]
    pub level_number: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::geographic_zone::Entity")]
    GeographicZones,
}

impl Related<super::geographic_zone::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GeographicZones.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
