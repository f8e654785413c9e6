use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Reference Data API",
        version = "1.0.0",
        description = r#"
# Reference Data Service

Master data shared by supply-chain services: geographic levels and zones,
facility types and facilities, programs, product categories, processing
schedules and periods, requisition groups and their program schedules,
supervisory nodes and users.

## Errors

Failing requests answer with a JSON body carrying a stable `messageKey`
and the `params` it refers to:

```json
{
  "error": "Not Found",
  "message": "Not found: referenceData.error.facility.notFound (...)",
  "messageKey": "referenceData.error.facility.notFound",
  "params": ["550e8400-e29b-41d4-a716-446655440000"],
  "timestamp": "2024-01-01T00:00:00Z"
}
```

## Pagination

List endpoints take `page` (0-based) and `size` query parameters and
answer with `{content, totalElements, totalPages, number, size,
numberOfElements, first, last}`.
        "#,
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers((url = "http://localhost:8080", description = "Local development")),
    tags(
        (name = "geographicLevels", description = "Levels of the geographic hierarchy"),
        (name = "geographicZones", description = "Geographic zone tree and search"),
        (name = "facilityTypes", description = "Facility type catalogue"),
        (name = "facilities", description = "Facilities and facility search"),
        (name = "programs", description = "Programs"),
        (name = "productCategories", description = "Product categories"),
        (name = "processingSchedules", description = "Processing schedules"),
        (name = "processingPeriods", description = "Processing periods and period search"),
        (name = "requisitionGroups", description = "Requisition groups and members"),
        (name = "requisitionGroupProgramSchedules", description = "Group, program and schedule links"),
        (name = "supervisoryNodes", description = "Supervisory node tree"),
        (name = "users", description = "Users and user search"),
        (name = "health", description = "Health check endpoints")
    ),
    paths(
        crate::handlers::health::liveness_check,
        crate::handlers::health::status_check,

        crate::handlers::geographic_levels::list_levels,
        crate::handlers::geographic_levels::get_level,
        crate::handlers::geographic_levels::create_level,
        crate::handlers::geographic_levels::save_level,
        crate::handlers::geographic_levels::delete_level,

        crate::handlers::geographic_zones::list_zones,
        crate::handlers::geographic_zones::search_zones,
        crate::handlers::geographic_zones::get_zone,
        crate::handlers::geographic_zones::create_zone,
        crate::handlers::geographic_zones::save_zone,
        crate::handlers::geographic_zones::delete_zone,

        crate::handlers::facility_types::list_facility_types,
        crate::handlers::facility_types::get_facility_type,
        crate::handlers::facility_types::create_facility_type,
        crate::handlers::facility_types::save_facility_type,
        crate::handlers::facility_types::delete_facility_type,

        crate::handlers::facilities::get_facilities,
        crate::handlers::facilities::search_facilities,
        crate::handlers::facilities::get_facility,
        crate::handlers::facilities::create_facility,
        crate::handlers::facilities::save_facility,
        crate::handlers::facilities::delete_facility,

        crate::handlers::programs::list_programs,
        crate::handlers::programs::get_program,
        crate::handlers::programs::create_program,
        crate::handlers::programs::save_program,
        crate::handlers::programs::delete_program,

        crate::handlers::product_categories::list_categories,
        crate::handlers::product_categories::search_categories,
        crate::handlers::product_categories::get_category,
        crate::handlers::product_categories::create_category,
        crate::handlers::product_categories::save_category,
        crate::handlers::product_categories::delete_category,

        crate::handlers::processing_schedules::list_schedules,
        crate::handlers::processing_schedules::search_schedules,
        crate::handlers::processing_schedules::get_schedule,
        crate::handlers::processing_schedules::create_schedule,
        crate::handlers::processing_schedules::save_schedule,
        crate::handlers::processing_schedules::delete_schedule,

        crate::handlers::processing_periods::search_periods,
        crate::handlers::processing_periods::get_period,
        crate::handlers::processing_periods::create_period,
        crate::handlers::processing_periods::save_period,
        crate::handlers::processing_periods::delete_period,

        crate::handlers::requisition_groups::list_groups,
        crate::handlers::requisition_groups::get_group,
        crate::handlers::requisition_groups::create_group,
        crate::handlers::requisition_groups::save_group,
        crate::handlers::requisition_groups::delete_group,

        crate::handlers::requisition_group_program_schedules::list_links,
        crate::handlers::requisition_group_program_schedules::search_links,
        crate::handlers::requisition_group_program_schedules::get_link,
        crate::handlers::requisition_group_program_schedules::create_link,
        crate::handlers::requisition_group_program_schedules::save_link,
        crate::handlers::requisition_group_program_schedules::delete_link,

        crate::handlers::supervisory_nodes::list_nodes,
        crate::handlers::supervisory_nodes::search_nodes,
        crate::handlers::supervisory_nodes::get_node,
        crate::handlers::supervisory_nodes::create_node,
        crate::handlers::supervisory_nodes::save_node,
        crate::handlers::supervisory_nodes::delete_node,

        crate::handlers::users::list_users,
        crate::handlers::users::search_users,
        crate::handlers::users::get_user,
        crate::handlers::users::create_user,
        crate::handlers::users::save_user,
        crate::handlers::users::delete_user,
    ),
    components(
        schemas(
            crate::dto::GeographicLevelDto,
            crate::dto::GeographicZoneDto,
            crate::dto::FacilityTypeDto,
            crate::dto::FacilityDto,
            crate::dto::ProgramDto,
            crate::dto::ProductCategoryDto,
            crate::dto::ProcessingScheduleDto,
            crate::dto::ProcessingPeriodDto,
            crate::dto::RequisitionGroupDto,
            crate::dto::RequisitionGroupProgramScheduleDto,
            crate::dto::SupervisoryNodeDto,
            crate::dto::UserDto,

            crate::services::geographic_zones::GeographicZoneSearchParams,
            crate::services::facilities::FacilitySearchParams,
            crate::services::user_search_params::UserSearchParams,

            crate::errors::ErrorResponse,
            crate::errors::Message
        )
    )
)]
pub struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_every_resource() {
        let json = serde_json::to_string_pretty(&ApiDoc::openapi()).unwrap();
        assert!(json.contains("Reference Data API"));
        for path in [
            "/api/geographicZones/search",
            "/api/facilities/search",
            "/api/processingPeriods",
            "/api/processingSchedules/search",
            "/api/productCategories/search",
            "/api/requisitionGroupProgramSchedules/search",
            "/api/supervisoryNodes/search",
            "/api/users/search",
            "/api/status",
        ] {
            assert!(json.contains(path), "missing {path}");
        }
    }
}
