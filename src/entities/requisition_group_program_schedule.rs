use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Links a requisition group and a program to the schedule that governs their periods.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "requisition_group_program_schedules")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub requisition_group_id: Uuid,
    pub program_id: Uuid,
    pub processing_schedule_id: Uuid,
    pub direct_delivery: bool,
    pub drop_off_facility_id: Option<Uuid>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::requisition_group::Entity",
        from = "Column::RequisitionGroupId",
        to = "super::requisition_group::Column::Id",
        on_delete = "Cascade"
    )]
    RequisitionGroup,
}

impl Related<super::requisition_group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RequisitionGroup.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
