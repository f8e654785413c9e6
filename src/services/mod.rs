// Hierarchy and search services
pub mod facilities;
pub mod geographic_zones;
pub mod processing_periods;
pub mod user_search_params;
pub mod users;

// Plain master-data services
pub mod facility_types;
pub mod geographic_levels;
pub mod product_categories;
pub mod processing_schedules;
pub mod programs;

// Supervision
pub mod requisition_group_program_schedules;
pub mod requisition_groups;
pub mod supervisory_nodes;

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PrimaryKeyTrait, QueryFilter, Value};
use uuid::Uuid;

use crate::errors::ServiceError;

/// Loads a row another entity points at; a dangling reference is a validation failure.
pub(crate) async fn require_reference<E>(
    db: &DatabaseConnection,
    id: Uuid,
    key: &str,
) -> Result<E::Model, ServiceError>
where
    E: EntityTrait,
    Uuid: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
{
    E::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::validation(key, id))
}

/// Loads the row addressed by a request path.
pub(crate) async fn require_found<E>(
    db: &DatabaseConnection,
    id: Uuid,
    key: &str,
) -> Result<E::Model, ServiceError>
where
    E: EntityTrait,
    Uuid: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
{
    E::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found(key, id))
}

pub(crate) async fn exists<E>(db: &DatabaseConnection, id: Uuid) -> Result<bool, ServiceError>
where
    E: EntityTrait,
    Uuid: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
{
    Ok(E::find_by_id(id).one(db).await?.is_some())
}

/// Fails with a conflict when another row (any id but `current_id`) already holds `value`.
pub(crate) async fn ensure_unique<E>(
    db: &DatabaseConnection,
    column: E::Column,
    value: impl Into<Value> + ToString,
    id_column: E::Column,
    current_id: Uuid,
    key: &str,
) -> Result<(), ServiceError>
where
    E: EntityTrait,
{
    let param = value.to_string();
    let clash = E::find()
        .filter(column.eq(value))
        .filter(id_column.ne(current_id))
        .one(db)
        .await?;
    if clash.is_some() {
        return Err(ServiceError::conflict(key, param));
    }
    Ok(())
}

/// Fails with a conflict while any `E` row still points at `id` through `column`.
pub(crate) async fn ensure_unreferenced<E>(
    db: &DatabaseConnection,
    column: E::Column,
    id: Uuid,
    key: &str,
) -> Result<(), ServiceError>
where
    E: EntityTrait,
{
    let referencing = E::find().filter(column.eq(id)).one(db).await?;
    if referencing.is_some() {
        return Err(ServiceError::conflict(key, id));
    }
    Ok(())
}

pub(crate) async fn delete_existing<E>(
    db: &DatabaseConnection,
    id: Uuid,
    key: &str,
) -> Result<(), ServiceError>
where
    E: EntityTrait,
    Uuid: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
{
    let result = E::delete_by_id(id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(ServiceError::not_found(key, id));
    }
    Ok(())
}
