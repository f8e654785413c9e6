//! Query layer behind the search services.
//!
//! Each trait is the seam a service depends on; the `Db*` structs are the
//! sea-orm implementations and tests substitute the generated mocks.

use sea_orm::{
    sea_query::{extension::postgres::PgExpr, Expr, Func, LikeExpr, SimpleExpr},
    ColumnTrait, DatabaseConnection, DbBackend, EntityTrait, PaginatorTrait, Select,
};
use std::sync::Arc;

use crate::common::{Page, PageRequest};
use crate::errors::ServiceError;

pub mod facility_repository;
pub mod geographic_zone_repository;
pub mod processing_period_repository;
pub mod reference_repository;
pub mod requisition_group_program_schedule_repository;

pub use facility_repository::{
    DbFacilityRepository, DbFacilityTypeRepository, FacilityRepository, FacilitySearchQuery,
    FacilityTypeRepository,
};
pub use geographic_zone_repository::{
    DbGeographicLevelRepository, DbGeographicZoneRepository, GeographicLevelRepository,
    GeographicZoneRepository, ZoneSearchQuery,
};
pub use processing_period_repository::{DbProcessingPeriodRepository, ProcessingPeriodRepository};
pub use reference_repository::{
    DbProcessingScheduleRepository, DbProgramRepository, ProcessingScheduleRepository,
    ProgramRepository,
};
pub use requisition_group_program_schedule_repository::{
    DbRequisitionGroupProgramScheduleRepository, RequisitionGroupProgramScheduleRepository,
};

/// Repository trait for common database operations
pub trait Repository {
    fn get_db(&self) -> &DatabaseConnection;
}

#[derive(Debug, Clone)]
pub struct BaseRepository {
    db: Arc<DatabaseConnection>,
}

impl BaseRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl Repository for BaseRepository {
    fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }
}

/// Case-insensitive substring match on a text column. Wildcards in `needle` match
/// literally. Folding is Unicode-aware on PostgreSQL and ASCII-only on SQLite,
/// whose `UPPER` leaves other characters untouched.
pub(crate) fn contains_ignore_case<C: ColumnTrait>(
    backend: DbBackend,
    column: C,
    needle: &str,
) -> SimpleExpr {
    let pattern = format!("%{}%", escape_like(needle));
    match backend {
        DbBackend::Postgres => Expr::col(column).ilike(LikeExpr::new(pattern).escape('\\')),
        _ => Expr::expr(Func::upper(Expr::col(column)))
            .like(LikeExpr::new(pattern.to_ascii_uppercase()).escape('\\')),
    }
}

fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Runs `select` as one page and wraps the result with its metadata.
pub(crate) async fn fetch_page<E>(
    db: &DatabaseConnection,
    select: Select<E>,
    page: PageRequest,
) -> Result<Page<E::Model>, ServiceError>
where
    E: EntityTrait,
    E::Model: Sync,
{
    let paginator = select.paginate(db, page.size);
    let total = paginator.num_items().await?;
    let content = paginator.fetch_page(page.page).await?;
    Ok(Page::new(content, page, total))
}
