use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Join row: facility `facility_id` belongs to requisition group `requisition_group_id`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "requisition_group_members")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub requisition_group_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub facility_id: Uuid,
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
