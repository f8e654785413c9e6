use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::common::{Page, PageRequest};
use crate::dto::RequisitionGroupDto;
use crate::entities::{
    facility, requisition_group, requisition_group_member, requisition_group_program_schedule,
    supervisory_node,
};
use crate::errors::ServiceError;
use crate::messages;
use crate::repositories::fetch_page;

use super::{ensure_unique, exists, require_found, require_reference};

/// Requisition groups together with their member facilities
#[derive(Clone)]
pub struct RequisitionGroupService {
    db: Arc<DatabaseConnection>,
}

impl RequisitionGroupService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn list_groups(
        &self,
        page: PageRequest,
    ) -> Result<Page<RequisitionGroupDto>, ServiceError> {
        let select =
            requisition_group::Entity::find().order_by_asc(requisition_group::Column::Code);
        let groups = fetch_page(&self.db, select, page).await?;

        let mut members = self
            .member_ids(groups.content.iter().map(|g| g.id).collect())
            .await?;
        Ok(groups.map(|group| {
            let ids = members.remove(&group.id).unwrap_or_default();
            RequisitionGroupDto::export(&group, ids)
        }))
    }

    #[instrument(skip(self))]
    pub async fn get_group(&self, id: Uuid) -> Result<RequisitionGroupDto, ServiceError> {
        let group = require_found::<requisition_group::Entity>(
            &self.db,
            id,
            messages::ERROR_REQUISITION_GROUP_NOT_FOUND,
        )
        .await?;
        let members = self
            .member_ids(vec![id])
            .await?
            .remove(&id)
            .unwrap_or_default();
        Ok(RequisitionGroupDto::export(&group, members))
    }

    #[instrument(skip(self, dto))]
    pub async fn create_group(
        &self,
        dto: RequisitionGroupDto,
    ) -> Result<RequisitionGroupDto, ServiceError> {
        let group = self.write_group(Uuid::new_v4(), dto, false).await?;
        info!(
            group_id = ?group.id,
            members = group.member_facility_ids.len(),
            "Requisition group created"
        );
        Ok(group)
    }

    #[instrument(skip(self, dto))]
    pub async fn save_group(
        &self,
        id: Uuid,
        dto: RequisitionGroupDto,
    ) -> Result<RequisitionGroupDto, ServiceError> {
        let existing = exists::<requisition_group::Entity>(&self.db, id).await?;
        let group = self.write_group(id, dto, existing).await?;
        info!(group_id = %id, created = !existing, "Requisition group saved");
        Ok(group)
    }

    /// Removes the group with its memberships and schedule links.
    #[instrument(skip(self))]
    pub async fn delete_group(&self, id: Uuid) -> Result<(), ServiceError> {
        let txn = self.db.begin().await?;
        requisition_group_member::Entity::delete_many()
            .filter(requisition_group_member::Column::RequisitionGroupId.eq(id))
            .exec(&txn)
            .await?;
        requisition_group_program_schedule::Entity::delete_many()
            .filter(requisition_group_program_schedule::Column::RequisitionGroupId.eq(id))
            .exec(&txn)
            .await?;
        let result = requisition_group::Entity::delete_by_id(id)
            .exec(&txn)
            .await?;
        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Err(ServiceError::not_found(
                messages::ERROR_REQUISITION_GROUP_NOT_FOUND,
                id,
            ));
        }
        txn.commit().await?;

        info!(group_id = %id, "Requisition group deleted");
        Ok(())
    }

    async fn write_group(
        &self,
        id: Uuid,
        dto: RequisitionGroupDto,
        existing: bool,
    ) -> Result<RequisitionGroupDto, ServiceError> {
        dto.validate()?;
        ensure_unique::<requisition_group::Entity>(
            &self.db,
            requisition_group::Column::Code,
            dto.code.as_str(),
            requisition_group::Column::Id,
            id,
            messages::ERROR_REQUISITION_GROUP_CODE_DUPLICATED,
        )
        .await?;
        require_reference::<supervisory_node::Entity>(
            &self.db,
            dto.supervisory_node_id,
            messages::ERROR_SUPERVISORY_NODE_NOT_FOUND,
        )
        .await?;
        self.require_facilities(&dto.member_facility_ids).await?;

        let (group, members) = dto.into_active_model(id);

        let txn = self.db.begin().await?;
        let group = if existing {
            group.update(&txn).await?
        } else {
            group.insert(&txn).await?
        };
        requisition_group_member::Entity::delete_many()
            .filter(requisition_group_member::Column::RequisitionGroupId.eq(id))
            .exec(&txn)
            .await?;
        if !members.is_empty() {
            let rows = members
                .iter()
                .map(|facility_id| requisition_group_member::ActiveModel {
                    requisition_group_id: Set(id),
                    facility_id: Set(*facility_id),
                });
            requisition_group_member::Entity::insert_many(rows)
                .exec_without_returning(&txn)
                .await?;
        }
        txn.commit().await?;

        Ok(RequisitionGroupDto::export(&group, members))
    }

    /// Every member must be a known facility.
    async fn require_facilities(&self, ids: &BTreeSet<Uuid>) -> Result<(), ServiceError> {
        if ids.is_empty() {
            return Ok(());
        }
        let found: HashSet<Uuid> = facility::Entity::find()
            .select_only()
            .column(facility::Column::Id)
            .filter(facility::Column::Id.is_in(ids.iter().copied()))
            .into_tuple::<Uuid>()
            .all(&*self.db)
            .await?
            .into_iter()
            .collect();
        match ids.iter().find(|id| !found.contains(*id)) {
            Some(missing) => Err(ServiceError::validation(
                messages::ERROR_FACILITY_NOT_FOUND,
                missing,
            )),
            None => Ok(()),
        }
    }

    async fn member_ids(
        &self,
        group_ids: Vec<Uuid>,
    ) -> Result<HashMap<Uuid, BTreeSet<Uuid>>, ServiceError> {
        if group_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = requisition_group_member::Entity::find()
            .filter(requisition_group_member::Column::RequisitionGroupId.is_in(group_ids))
            .all(&*self.db)
            .await?;

        let mut members: HashMap<Uuid, BTreeSet<Uuid>> = HashMap::new();
        for row in rows {
            members
                .entry(row.requisition_group_id)
                .or_default()
                .insert(row.facility_id);
        }
        Ok(members)
    }
}
