pub mod common;
pub mod facilities;
pub mod facility_types;
pub mod geographic_levels;
pub mod geographic_zones;
pub mod health;
pub mod processing_periods;
pub mod processing_schedules;
pub mod product_categories;
pub mod programs;
pub mod requisition_group_program_schedules;
pub mod requisition_groups;
pub mod supervisory_nodes;
pub mod users;

use std::sync::Arc;

use crate::db::DbPool;
use crate::services::{
    facilities::FacilityService, facility_types::FacilityTypeService,
    geographic_levels::GeographicLevelService, geographic_zones::GeographicZoneService,
    processing_periods::ProcessingPeriodService, processing_schedules::ProcessingScheduleService,
    product_categories::ProductCategoryService, programs::ProgramService,
    requisition_group_program_schedules::RequisitionGroupProgramScheduleService,
    requisition_groups::RequisitionGroupService, supervisory_nodes::SupervisoryNodeService,
    users::UserService,
};

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub geographic_levels: Arc<GeographicLevelService>,
    pub geographic_zones: Arc<GeographicZoneService>,
    pub facility_types: Arc<FacilityTypeService>,
    pub facilities: Arc<FacilityService>,
    pub programs: Arc<ProgramService>,
    pub product_categories: Arc<ProductCategoryService>,
    pub processing_schedules: Arc<ProcessingScheduleService>,
    pub processing_periods: Arc<ProcessingPeriodService>,
    pub requisition_groups: Arc<RequisitionGroupService>,
    pub requisition_group_program_schedules: Arc<RequisitionGroupProgramScheduleService>,
    pub supervisory_nodes: Arc<SupervisoryNodeService>,
    pub users: Arc<UserService>,
}

impl AppServices {
    /// Builds every service over the shared pool.
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        let geographic_zones = Arc::new(GeographicZoneService::new(db_pool.clone()));

        Self {
            geographic_levels: Arc::new(GeographicLevelService::new(db_pool.clone())),
            facilities: Arc::new(FacilityService::new(
                db_pool.clone(),
                geographic_zones.clone(),
            )),
            geographic_zones,
            facility_types: Arc::new(FacilityTypeService::new(db_pool.clone())),
            programs: Arc::new(ProgramService::new(db_pool.clone())),
            product_categories: Arc::new(ProductCategoryService::new(db_pool.clone())),
            processing_schedules: Arc::new(ProcessingScheduleService::new(db_pool.clone())),
            processing_periods: Arc::new(ProcessingPeriodService::new(db_pool.clone())),
            requisition_groups: Arc::new(RequisitionGroupService::new(db_pool.clone())),
            requisition_group_program_schedules: Arc::new(
                RequisitionGroupProgramScheduleService::new(db_pool.clone()),
            ),
            supervisory_nodes: Arc::new(SupervisoryNodeService::new(db_pool.clone())),
            users: Arc::new(UserService::new(db_pool)),
        }
    }
}
