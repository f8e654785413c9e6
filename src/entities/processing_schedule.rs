use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{entity::prelude::*, ActiveValue::Set};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "processing_schedules")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub code: String,
    #[sea_orm(unique)]
    pub name: String,
    pub description: Option<String>,
    pub modified_date: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::processing_period::Entity")]
    ProcessingPeriods,
}

impl Related<super::processing_period::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProcessingPeriods.def()
    }
}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    /// Stamps `modified_date` on every insert and update.
    async fn before_save<C>(self, _db: &C, _insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut active_model = self;
        active_model.modified_date = Set(Utc::now());
        Ok(active_model)
    }
}
