use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A node of the zone forest; `parent_id` points at another row of this table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "geographic_zones")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub code: String,
    pub name: Option<String>,
    pub level_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub catchment_population: Option<i32>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::geographic_level::Entity",
        from = "Column::LevelId",
        to = "super::geographic_level::Column::Id"
    )]
    GeographicLevel,
}

impl Related<super::geographic_level::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GeographicLevel.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
