//! Stable message keys carried by [`crate::errors::Message`].
//!
//! Clients translate these keys; the English text in error bodies is only a fallback.

pub const ERROR_VALIDATION_FAILED: &str = "referenceData.error.validation.failed";
pub const ERROR_INVALID_UUID: &str = "referenceData.error.uuid.invalidFormat";
pub const ERROR_SEARCH_PARAMS_INVALID: &str = "referenceData.error.search.invalidParams";

pub const ERROR_GEOGRAPHIC_LEVEL_NOT_FOUND: &str = "referenceData.error.geographicLevel.notFound";
pub const ERROR_GEOGRAPHIC_LEVEL_CODE_DUPLICATED: &str =
    "referenceData.error.geographicLevel.code.duplicated";
pub const ERROR_GEOGRAPHIC_LEVEL_NUMBER_DUPLICATED: &str =
    "referenceData.error.geographicLevel.levelNumber.duplicated";
pub const ERROR_GEOGRAPHIC_LEVEL_IN_USE: &str = "referenceData.error.geographicLevel.inUse";

pub const ERROR_GEOGRAPHIC_ZONE_NOT_FOUND: &str = "referenceData.error.geographicZone.notFound";
pub const ERROR_GEOGRAPHIC_ZONE_CODE_DUPLICATED: &str =
    "referenceData.error.geographicZone.code.duplicated";
pub const ERROR_GEOGRAPHIC_ZONE_PARENT_CYCLE: &str =
    "referenceData.error.geographicZone.parent.cycle";
pub const ERROR_GEOGRAPHIC_ZONE_IN_USE: &str = "referenceData.error.geographicZone.inUse";

pub const ERROR_FACILITY_TYPE_NOT_FOUND: &str = "referenceData.error.facilityType.notFound";
pub const ERROR_FACILITY_TYPE_CODE_DUPLICATED: &str =
    "referenceData.error.facilityType.code.duplicated";
pub const ERROR_FACILITY_TYPE_IN_USE: &str = "referenceData.error.facilityType.inUse";

pub const ERROR_FACILITY_NOT_FOUND: &str = "referenceData.error.facility.notFound";
pub const ERROR_FACILITY_CODE_DUPLICATED: &str = "referenceData.error.facility.code.duplicated";
pub const ERROR_FACILITY_IN_USE: &str = "referenceData.error.facility.inUse";

pub const ERROR_PROGRAM_NOT_FOUND: &str = "referenceData.error.program.notFound";
pub const ERROR_PROGRAM_CODE_DUPLICATED: &str = "referenceData.error.program.code.duplicated";
pub const ERROR_PROGRAM_IN_USE: &str = "referenceData.error.program.inUse";

pub const ERROR_PROCESSING_SCHEDULE_NOT_FOUND: &str =
    "referenceData.error.processingSchedule.notFound";
pub const ERROR_PROCESSING_SCHEDULE_CODE_DUPLICATED: &str =
    "referenceData.error.processingSchedule.code.duplicated";
pub const ERROR_PROCESSING_SCHEDULE_NAME_DUPLICATED: &str =
    "referenceData.error.processingSchedule.name.duplicated";
pub const ERROR_PROCESSING_SCHEDULE_IN_USE: &str =
    "referenceData.error.processingSchedule.inUse";
pub const ERROR_PROCESSING_SCHEDULE_SEARCH_PARAMS_REQUIRED: &str =
    "referenceData.error.processingSchedule.search.programIdAndFacilityIdRequired";

pub const ERROR_PROCESSING_PERIOD_NOT_FOUND: &str = "referenceData.error.processingPeriod.notFound";
pub const ERROR_PROCESSING_PERIOD_END_DATE_BEFORE_START_DATE: &str =
    "referenceData.error.processingPeriod.endDate.beforeStartDate";
pub const ERROR_PROCESSING_PERIOD_START_DATE_GAP: &str =
    "referenceData.error.processingPeriod.startDate.gap";
pub const ERROR_PROCESSING_PERIOD_SEARCH_PARAMS_INCOMPLETE: &str =
    "referenceData.error.processingPeriod.search.programIdAndFacilityIdTogether";

pub const ERROR_PRODUCT_CATEGORY_NOT_FOUND: &str = "referenceData.error.productCategory.notFound";
pub const ERROR_PRODUCT_CATEGORY_CODE_DUPLICATED: &str =
    "referenceData.error.productCategory.code.duplicated";

pub const ERROR_REQUISITION_GROUP_NOT_FOUND: &str = "referenceData.error.requisitionGroup.notFound";
pub const ERROR_REQUISITION_GROUP_CODE_DUPLICATED: &str =
    "referenceData.error.requisitionGroup.code.duplicated";

pub const ERROR_REQUISITION_GROUP_PROGRAM_SCHEDULE_NOT_FOUND: &str =
    "referenceData.error.requisitionGroupProgramSchedule.notFound";
pub const ERROR_REQUISITION_GROUP_PROGRAM_SCHEDULE_DUPLICATED: &str =
    "referenceData.error.requisitionGroupProgramSchedule.duplicated";

pub const ERROR_SUPERVISORY_NODE_NOT_FOUND: &str = "referenceData.error.supervisoryNode.notFound";
pub const ERROR_SUPERVISORY_NODE_CODE_DUPLICATED: &str =
    "referenceData.error.supervisoryNode.code.duplicated";
pub const ERROR_SUPERVISORY_NODE_PARENT_CYCLE: &str =
    "referenceData.error.supervisoryNode.parent.cycle";
pub const ERROR_SUPERVISORY_NODE_IN_USE: &str = "referenceData.error.supervisoryNode.inUse";
pub const ERROR_SUPERVISORY_NODE_NOT_FOUND_WITH_PROGRAM_AND_FACILITY: &str =
    "referenceData.error.supervisoryNode.notFoundWithProgramAndFacility";

pub const ERROR_USER_NOT_FOUND: &str = "referenceData.error.user.notFound";
pub const ERROR_USER_FIELD_REQUIRED: &str = "referenceData.error.user.field.required";
pub const ERROR_USER_USERNAME_DUPLICATED: &str = "referenceData.error.user.username.duplicated";
pub const ERROR_USER_EMAIL_DUPLICATED: &str = "referenceData.error.user.email.duplicated";
pub const ERROR_USER_EMAIL_INVALID: &str = "referenceData.error.user.email.invalidFormat";
