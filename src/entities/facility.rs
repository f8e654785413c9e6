use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "facilities")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub code: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub geographic_zone_id: Uuid,
    pub type_id: Uuid,
    pub active: bool,
    pub enabled: bool,
    pub go_live_date: Option<NaiveDate>,
    pub go_down_date: Option<NaiveDate>,
    #[sea_orm(column_type = "Text", nullable)]
    pub comment: Option<String>,
    /// Free-form string map stored as a JSON object
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub extra_data: Option<Json>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::facility_type::Entity",
        from = "Column::TypeId",
        to = "super::facility_type::Column::Id"
    )]
    FacilityType,
    #[sea_orm(
        belongs_to = "super::geographic_zone::Entity",
        from = "Column::GeographicZoneId",
        to = "super::geographic_zone::Column::Id"
    )]
    GeographicZone,
}

impl Related<super::facility_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FacilityType.def()
    }
}

impl Related<super::geographic_zone::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GeographicZone.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
