pub mod facility;
pub mod facility_type;
pub mod geographic_level;
pub mod geographic_zone;
pub mod processing_period;
pub mod processing_schedule;
pub mod product_category;
pub mod program;
pub mod requisition_group;
pub mod requisition_group_member;
pub mod requisition_group_program_schedule;
pub mod supervisory_node;
pub mod user;

