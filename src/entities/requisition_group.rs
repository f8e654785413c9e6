use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "requisition_groups")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub supervisory_node_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::requisition_group_member::Entity")]
    Members,
    #[sea_orm(has_many = "super::requisition_group_program_schedule::Entity")]
    ProgramSchedules,
}

impl Related<super::requisition_group_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Members.def()
    }
}

impl Related<super::requisition_group_program_schedule::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProgramSchedules.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
