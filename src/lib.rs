//! Reference Data API Library
//!
//! Master data for supply-chain services: the geographic hierarchy, facilities,
//! programs, product categories, processing schedules and periods, requisition
//! groups, supervisory nodes and users, exposed as a JSON REST API.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod common;
pub mod config;
pub mod db;
pub mod dto;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod messages;
pub mod middleware_helpers;
pub mod migrator;
pub mod openapi;
pub mod repositories;
pub mod services;
pub mod tracing;

use std::sync::Arc;

use axum::{http::HeaderValue, routing::get, Router};
use sea_orm::DatabaseConnection;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowHeaders, AllowMethods, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
};

use crate::handlers::{
    facilities, facility_types, geographic_levels, geographic_zones, health, processing_periods,
    processing_schedules, product_categories, programs, requisition_group_program_schedules,
    requisition_groups, supervisory_nodes, users,
};

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub services: handlers::AppServices,
}

impl AppState {
    pub fn new(db: Arc<DatabaseConnection>, config: config::AppConfig) -> Self {
        let services = handlers::AppServices::new(db.clone());
        Self {
            db,
            config,
            services,
        }
    }
}

/// Resource routes, mounted under `/api`
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/status", get(health::status_check))
        // Geographic levels
        .route(
            "/geographicLevels",
            get(geographic_levels::list_levels).post(geographic_levels::create_level),
        )
        .route(
            "/geographicLevels/:id",
            get(geographic_levels::get_level)
                .put(geographic_levels::save_level)
                .delete(geographic_levels::delete_level),
        )
        // Geographic zones
        .route(
            "/geographicZones",
            get(geographic_zones::list_zones).post(geographic_zones::create_zone),
        )
        .route(
            "/geographicZones/search",
            axum::routing::post(geographic_zones::search_zones),
        )
        .route(
            "/geographicZones/:id",
            get(geographic_zones::get_zone)
                .put(geographic_zones::save_zone)
                .delete(geographic_zones::delete_zone),
        )
        // Facility types
        .route(
            "/facilityTypes",
            get(facility_types::list_facility_types).post(facility_types::create_facility_type),
        )
        .route(
            "/facilityTypes/:id",
            get(facility_types::get_facility_type)
                .put(facility_types::save_facility_type)
                .delete(facility_types::delete_facility_type),
        )
        // Facilities
        .route(
            "/facilities",
            get(facilities::get_facilities).post(facilities::create_facility),
        )
        .route(
            "/facilities/search",
            axum::routing::post(facilities::search_facilities),
        )
        .route(
            "/facilities/:id",
            get(facilities::get_facility)
                .put(facilities::save_facility)
                .delete(facilities::delete_facility),
        )
        // Programs
        .route(
            "/programs",
            get(programs::list_programs).post(programs::create_program),
        )
        .route(
            "/programs/:id",
            get(programs::get_program)
                .put(programs::save_program)
                .delete(programs::delete_program),
        )
        // Product categories
        .route(
            "/productCategories",
            get(product_categories::list_categories).post(product_categories::create_category),
        )
        .route(
            "/productCategories/search",
            get(product_categories::search_categories),
        )
        .route(
            "/productCategories/:id",
            get(product_categories::get_category)
                .put(product_categories::save_category)
                .delete(product_categories::delete_category),
        )
        // Processing schedules
        .route(
            "/processingSchedules",
            get(processing_schedules::list_schedules).post(processing_schedules::create_schedule),
        )
        .route(
            "/processingSchedules/search",
            get(processing_schedules::search_schedules),
        )
        .route(
            "/processingSchedules/:id",
            get(processing_schedules::get_schedule)
                .put(processing_schedules::save_schedule)
                .delete(processing_schedules::delete_schedule),
        )
        // Processing periods
        .route(
            "/processingPeriods",
            get(processing_periods::search_periods).post(processing_periods::create_period),
        )
        .route(
            "/processingPeriods/:id",
            get(processing_periods::get_period)
                .put(processing_periods::save_period)
                .delete(processing_periods::delete_period),
        )
        // Requisition groups
        .route(
            "/requisitionGroups",
            get(requisition_groups::list_groups).post(requisition_groups::create_group),
        )
        .route(
            "/requisitionGroups/:id",
            get(requisition_groups::get_group)
                .put(requisition_groups::save_group)
                .delete(requisition_groups::delete_group),
        )
        // Requisition group program schedules
        .route(
            "/requisitionGroupProgramSchedules",
            get(requisition_group_program_schedules::list_links)
                .post(requisition_group_program_schedules::create_link),
        )
        .route(
            "/requisitionGroupProgramSchedules/search",
            get(requisition_group_program_schedules::search_links),
        )
        .route(
            "/requisitionGroupProgramSchedules/:id",
            get(requisition_group_program_schedules::get_link)
                .put(requisition_group_program_schedules::save_link)
                .delete(requisition_group_program_schedules::delete_link),
        )
        // Supervisory nodes
        .route(
            "/supervisoryNodes",
            get(supervisory_nodes::list_nodes).post(supervisory_nodes::create_node),
        )
        .route(
            "/supervisoryNodes/search",
            get(supervisory_nodes::search_nodes),
        )
        .route(
            "/supervisoryNodes/:id",
            get(supervisory_nodes::get_node)
                .put(supervisory_nodes::save_node)
                .delete(supervisory_nodes::delete_node),
        )
        // Users
        .route("/users", get(users::list_users).post(users::create_user))
        .route("/users/search", axum::routing::post(users::search_users))
        .route(
            "/users/:id",
            get(users::get_user)
                .put(users::save_user)
                .delete(users::delete_user),
        )
}

/// CORS policy from config: explicit origins when given, otherwise permissive.
/// Config validation has already refused a missing origin list outside development
/// unless any origin was explicitly allowed.
pub fn cors_layer(cfg: &config::AppConfig) -> CorsLayer {
    let configured_origins: Option<Vec<HeaderValue>> = cfg
        .cors_allowed_origins
        .as_ref()
        .map(|raw| {
            raw.split(',')
                .filter_map(|origin| {
                    let trimmed = origin.trim();
                    if trimmed.is_empty() {
                        None
                    } else {
                        HeaderValue::from_str(trimmed).ok()
                    }
                })
                .collect::<Vec<_>>()
        })
        .filter(|origins| !origins.is_empty());

    match configured_origins {
        // Wildcard methods and headers cannot be combined with credentials
        Some(origins) if cfg.cors_allow_credentials => CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request())
            .allow_credentials(true),
        Some(origins) => CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any),
        None => {
            ::tracing::info!(
                environment = %cfg.environment,
                "Using permissive CORS because explicit origins were not configured"
            );
            CorsLayer::permissive()
        }
    }
}

/// Full application router: health, the resource API, Swagger UI and the HTTP layers.
pub fn build_router(state: AppState) -> Router {
    let cfg = state.config.clone();

    Router::<AppState>::new()
        .route("/health", get(health::liveness_check))
        .nest("/api", api_routes())
        .merge(openapi::swagger_ui())
        // HTTP tracing layer for consistent request/response telemetry
        .layer(tracing::configure_http_tracing())
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(cfg.request_timeout()))
        .layer(RequestBodyLimitLayer::new(cfg.max_body_size))
        .layer(cors_layer(&cfg))
        // Ensure every request carries a request id for traceability
        .layer(axum::middleware::from_fn(
            middleware_helpers::request_id::request_id_middleware,
        ))
        .with_state(state)
}
