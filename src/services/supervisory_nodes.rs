use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::common::{Page, PageRequest};
use crate::dto::SupervisoryNodeDto;
use crate::entities::{facility, requisition_group, supervisory_node};
use crate::errors::{Message, ServiceError};
use crate::messages;
use crate::repositories::{
    fetch_page, DbRequisitionGroupProgramScheduleRepository,
    RequisitionGroupProgramScheduleRepository,
};

use super::processing_schedules::{require_program_and_facility, ProgramFacilityParams};
use super::{ensure_unique, ensure_unreferenced, exists, require_found, require_reference};

/// Supervisory node tree plus the derived child and requisition group links
#[derive(Clone)]
pub struct SupervisoryNodeService {
    db: Arc<DatabaseConnection>,
    schedule_links: Arc<dyn RequisitionGroupProgramScheduleRepository>,
}

impl SupervisoryNodeService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        let schedule_links = Arc::new(DbRequisitionGroupProgramScheduleRepository::new(db.clone()));
        Self { db, schedule_links }
    }

    #[instrument(skip(self))]
    pub async fn list_nodes(
        &self,
        page: PageRequest,
    ) -> Result<Page<SupervisoryNodeDto>, ServiceError> {
        let select = supervisory_node::Entity::find().order_by_asc(supervisory_node::Column::Code);
        let nodes = fetch_page(&self.db, select, page).await?;
        let total = nodes.total_elements;
        let exported = self.export(nodes.content).await?;
        Ok(Page::new(exported, page, total))
    }

    #[instrument(skip(self))]
    pub async fn get_node(&self, id: Uuid) -> Result<SupervisoryNodeDto, ServiceError> {
        let node = require_found::<supervisory_node::Entity>(
            &self.db,
            id,
            messages::ERROR_SUPERVISORY_NODE_NOT_FOUND,
        )
        .await?;
        let mut exported = self.export(vec![node]).await?;
        exported
            .pop()
            .ok_or_else(|| ServiceError::not_found(messages::ERROR_SUPERVISORY_NODE_NOT_FOUND, id))
    }

    /// Nodes supervising the requisition groups that serve the program at the facility.
    #[instrument(skip(self))]
    pub async fn search_nodes(
        &self,
        params: ProgramFacilityParams,
    ) -> Result<Vec<SupervisoryNodeDto>, ServiceError> {
        let (program_id, facility_id) =
            params.require_both(messages::ERROR_SEARCH_PARAMS_INVALID)?;
        require_program_and_facility(&self.db, program_id, facility_id).await?;

        let group_ids: BTreeSet<Uuid> = self
            .schedule_links
            .search(program_id, facility_id)
            .await?
            .into_iter()
            .map(|link| link.requisition_group_id)
            .collect();

        let nodes = if group_ids.is_empty() {
            Vec::new()
        } else {
            let node_ids: Vec<Uuid> = requisition_group::Entity::find()
                .select_only()
                .column(requisition_group::Column::SupervisoryNodeId)
                .filter(requisition_group::Column::Id.is_in(group_ids))
                .into_tuple()
                .all(&*self.db)
                .await?;
            supervisory_node::Entity::find()
                .filter(supervisory_node::Column::Id.is_in(node_ids))
                .order_by_asc(supervisory_node::Column::Code)
                .all(&*self.db)
                .await?
        };

        if nodes.is_empty() {
            return Err(ServiceError::NotFound(
                Message::new(messages::ERROR_SUPERVISORY_NODE_NOT_FOUND_WITH_PROGRAM_AND_FACILITY)
                    .with_param(program_id)
                    .with_param(facility_id),
            ));
        }
        self.export(nodes).await
    }

    #[instrument(skip(self, dto))]
    pub async fn create_node(
        &self,
        dto: SupervisoryNodeDto,
    ) -> Result<SupervisoryNodeDto, ServiceError> {
        let node = self.write_node(Uuid::new_v4(), dto, false).await?;
        info!(node_id = %node.id, code = %node.code, "Supervisory node created");
        self.get_node(node.id).await
    }

    #[instrument(skip(self, dto))]
    pub async fn save_node(
        &self,
        id: Uuid,
        dto: SupervisoryNodeDto,
    ) -> Result<SupervisoryNodeDto, ServiceError> {
        let existing = exists::<supervisory_node::Entity>(&self.db, id).await?;
        self.write_node(id, dto, existing).await?;
        info!(node_id = %id, created = !existing, "Supervisory node saved");
        self.get_node(id).await
    }

    /// Deletes the node; its children become roots. Refused while a requisition group reports to it.
    #[instrument(skip(self))]
    pub async fn delete_node(&self, id: Uuid) -> Result<(), ServiceError> {
        ensure_unreferenced::<requisition_group::Entity>(
            &self.db,
            requisition_group::Column::SupervisoryNodeId,
            id,
            messages::ERROR_SUPERVISORY_NODE_IN_USE,
        )
        .await?;
        let txn = self.db.begin().await?;
        supervisory_node::Entity::update_many()
            .col_expr(
                supervisory_node::Column::ParentId,
                Expr::value(Option::<Uuid>::None),
            )
            .filter(supervisory_node::Column::ParentId.eq(id))
            .exec(&txn)
            .await?;
        let result = supervisory_node::Entity::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Err(ServiceError::not_found(
                messages::ERROR_SUPERVISORY_NODE_NOT_FOUND,
                id,
            ));
        }
        txn.commit().await?;

        info!(node_id = %id, "Supervisory node deleted");
        Ok(())
    }

    /// Ids of every node below `root_id`. Revisited nodes are logged and skipped.
    #[instrument(skip(self))]
    pub async fn get_all_nodes_in_hierarchy(
        &self,
        root_id: Uuid,
    ) -> Result<HashSet<Uuid>, ServiceError> {
        let mut descendants = HashSet::new();
        let mut frontier = vec![root_id];

        while !frontier.is_empty() {
            let children: Vec<Uuid> = supervisory_node::Entity::find()
                .select_only()
                .column(supervisory_node::Column::Id)
                .filter(supervisory_node::Column::ParentId.is_in(frontier))
                .into_tuple()
                .all(&*self.db)
                .await?;

            frontier = Vec::new();
            for child_id in children {
                if child_id == root_id || !descendants.insert(child_id) {
                    warn!(%child_id, "Cycle in supervisory node hierarchy, skipping node");
                    continue;
                }
                frontier.push(child_id);
            }
        }

        Ok(descendants)
    }

    async fn write_node(
        &self,
        id: Uuid,
        dto: SupervisoryNodeDto,
        existing: bool,
    ) -> Result<supervisory_node::Model, ServiceError> {
        dto.validate()?;
        ensure_unique::<supervisory_node::Entity>(
            &self.db,
            supervisory_node::Column::Code,
            dto.code.as_str(),
            supervisory_node::Column::Id,
            id,
            messages::ERROR_SUPERVISORY_NODE_CODE_DUPLICATED,
        )
        .await?;
        if let Some(facility_id) = dto.facility_id {
            require_reference::<facility::Entity>(
                &self.db,
                facility_id,
                messages::ERROR_FACILITY_NOT_FOUND,
            )
            .await?;
        }
        if let Some(parent_id) = dto.parent_node_id {
            self.check_parent(id, parent_id, existing).await?;
        }

        let active = dto.into_active_model(id);
        let node = if existing {
            active.update(&*self.db).await?
        } else {
            active.insert(&*self.db).await?
        };
        Ok(node)
    }

    async fn check_parent(
        &self,
        id: Uuid,
        parent_id: Uuid,
        existing: bool,
    ) -> Result<(), ServiceError> {
        if parent_id == id {
            return Err(ServiceError::validation(
                messages::ERROR_SUPERVISORY_NODE_PARENT_CYCLE,
                parent_id,
            ));
        }
        require_reference::<supervisory_node::Entity>(
            &self.db,
            parent_id,
            messages::ERROR_SUPERVISORY_NODE_NOT_FOUND,
        )
        .await?;
        if existing && self.get_all_nodes_in_hierarchy(id).await?.contains(&parent_id) {
            return Err(ServiceError::validation(
                messages::ERROR_SUPERVISORY_NODE_PARENT_CYCLE,
                parent_id,
            ));
        }
        Ok(())
    }

    /// Attaches child ids and requisition group ids, two queries per batch.
    async fn export(
        &self,
        nodes: Vec<supervisory_node::Model>,
    ) -> Result<Vec<SupervisoryNodeDto>, ServiceError> {
        if nodes.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = nodes.iter().map(|n| n.id).collect();

        let child_rows: Vec<(Uuid, Option<Uuid>)> = supervisory_node::Entity::find()
            .select_only()
            .column(supervisory_node::Column::Id)
            .column(supervisory_node::Column::ParentId)
            .filter(supervisory_node::Column::ParentId.is_in(ids.clone()))
            .into_tuple()
            .all(&*self.db)
            .await?;
        let mut children: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for (child_id, parent_id) in child_rows {
            if let Some(parent_id) = parent_id {
                children.entry(parent_id).or_default().push(child_id);
            }
        }

        let group_rows: Vec<(Uuid, Uuid)> = requisition_group::Entity::find()
            .select_only()
            .column(requisition_group::Column::SupervisoryNodeId)
            .column(requisition_group::Column::Id)
            .filter(requisition_group::Column::SupervisoryNodeId.is_in(ids))
            .into_tuple()
            .all(&*self.db)
            .await?;
        let groups: HashMap<Uuid, Uuid> = group_rows.into_iter().collect();

        Ok(nodes
            .iter()
            .map(|node| {
                SupervisoryNodeDto::export(
                    node,
                    children.remove(&node.id).unwrap_or_default(),
                    groups.get(&node.id).copied(),
                )
            })
            .collect())
    }
}
