use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "processing_periods")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub processing_schedule_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::processing_schedule::Entity",
        from = "Column::ProcessingScheduleId",
        to = "super::processing_schedule::Column::Id",
        on_delete = "Cascade"
    )]
    ProcessingSchedule,
}

impl Related<super::processing_schedule::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProcessingSchedule.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
