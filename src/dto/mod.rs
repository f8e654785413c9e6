//! Wire representations and their mapping to persistence models.
//!
//! Each DTO has an export (`From<&Model>`) and an import (`into_active_model`).
//! Server-owned fields such as ids and timestamps are never taken from the body.

pub mod facility;
pub mod facility_type;
pub mod geographic_level;
pub mod geographic_zone;
pub mod processing_period;
pub mod processing_schedule;
pub mod product_category;
pub mod program;
pub mod requisition_group;
pub mod requisition_group_program_schedule;
pub mod supervisory_node;
pub mod user;

pub use facility::FacilityDto;
pub use facility_type::FacilityTypeDto;
pub use geographic_level::GeographicLevelDto;
pub use geographic_zone::GeographicZoneDto;
pub use processing_period::ProcessingPeriodDto;
pub use processing_schedule::ProcessingScheduleDto;
pub use product_category::ProductCategoryDto;
pub use program::ProgramDto;
pub use requisition_group::RequisitionGroupDto;
pub use requisition_group_program_schedule::RequisitionGroupProgramScheduleDto;
pub use supervisory_node::SupervisoryNodeDto;
pub use user::UserDto;

pub(crate) fn default_true() -> bool {
    true
}
