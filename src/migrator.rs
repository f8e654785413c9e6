use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_geographic_tables::Migration),
            Box::new(m20240101_000002_create_facility_tables::Migration),
            Box::new(m20240101_000003_create_programs_table::Migration),
            Box::new(m20240101_000004_create_processing_tables::Migration),
            Box::new(m20240101_000005_create_supervision_tables::Migration),
            Box::new(m20240101_000006_create_users_table::Migration),
            Box::new(m20240101_000007_create_product_categories_table::Migration),
        ]
    }
}

// Migration implementations

mod m20240101_000001_create_geographic_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_geographic_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(GeographicLevels::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(GeographicLevels::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(GeographicLevels::Code)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(GeographicLevels::Name).string())
                        .col(
                            ColumnDef::new(GeographicLevels::LevelNumber)
                                .integer()
                                .not_null()
                                .unique_key(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(GeographicZones::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(GeographicZones::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(GeographicZones::Code)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(GeographicZones::Name).string())
                        .col(ColumnDef::new(GeographicZones::LevelId).uuid().not_null())
                        .col(ColumnDef::new(GeographicZones::ParentId).uuid())
                        .col(ColumnDef::new(GeographicZones::CatchmentPopulation).integer())
                        .col(ColumnDef::new(GeographicZones::Latitude).double())
                        .col(ColumnDef::new(GeographicZones::Longitude).double())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_geographic_zones_parent_id")
                        .table(GeographicZones::Table)
                        .col(GeographicZones::ParentId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(GeographicZones::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(GeographicLevels::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum GeographicLevels {
        Table,
        Id,
        Code,
        Name,
        LevelNumber,
    }

    #[derive(DeriveIden)]
    enum GeographicZones {
        Table,
        Id,
        Code,
        Name,
        LevelId,
        ParentId,
        CatchmentPopulation,
        Latitude,
        Longitude,
    }
}

mod m20240101_000002_create_facility_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000002_create_facility_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(FacilityTypes::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(FacilityTypes::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(FacilityTypes::Code)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(FacilityTypes::Name).string())
                        .col(ColumnDef::new(FacilityTypes::Description).string())
                        .col(ColumnDef::new(FacilityTypes::DisplayOrder).integer())
                        .col(
                            ColumnDef::new(FacilityTypes::Active)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Facilities::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Facilities::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(Facilities::Code)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Facilities::Name).string())
                        .col(ColumnDef::new(Facilities::Description).string())
                        .col(
                            ColumnDef::new(Facilities::GeographicZoneId)
                                .uuid()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Facilities::TypeId).uuid().not_null())
                        .col(
                            ColumnDef::new(Facilities::Active)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(Facilities::Enabled)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(ColumnDef::new(Facilities::GoLiveDate).date())
                        .col(ColumnDef::new(Facilities::GoDownDate).date())
                        .col(ColumnDef::new(Facilities::Comment).text())
                        .col(ColumnDef::new(Facilities::ExtraData).json_binary())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_facilities_geographic_zone_id")
                        .table(Facilities::Table)
                        .col(Facilities::GeographicZoneId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Facilities::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(FacilityTypes::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum FacilityTypes {
        Table,
        Id,
        Code,
        Name,
        Description,
        DisplayOrder,
        Active,
    }

    #[derive(DeriveIden)]
    enum Facilities {
        Table,
        Id,
        Code,
        Name,
        Description,
        GeographicZoneId,
        TypeId,
        Active,
        Enabled,
        GoLiveDate,
        GoDownDate,
        Comment,
        ExtraData,
    }
}

mod m20240101_000003_create_programs_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000003_create_programs_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Programs::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Programs::Id).uuid().not_null().primary_key())
                        .col(
                            ColumnDef::new(Programs::Code)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Programs::Name).string())
                        .col(ColumnDef::new(Programs::Description).string())
                        .col(
                            ColumnDef::new(Programs::Active)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(Programs::PeriodsSkippable)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(Programs::ShowNonFullSupplyTab)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Programs::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Programs {
        Table,
        Id,
        Code,
        Name,
        Description,
        Active,
        PeriodsSkippable,
        ShowNonFullSupplyTab,
    }
}

mod m20240101_000004_create_processing_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000004_create_processing_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(ProcessingSchedules::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ProcessingSchedules::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(ProcessingSchedules::Code)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(ProcessingSchedules::Name)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(ProcessingSchedules::Description).string())
                        .col(
                            ColumnDef::new(ProcessingSchedules::ModifiedDate)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(ProcessingPeriods::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ProcessingPeriods::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(ProcessingPeriods::ProcessingScheduleId)
                                .uuid()
                                .not_null(),
                        )
                        .col(ColumnDef::new(ProcessingPeriods::Name).string().not_null())
                        .col(ColumnDef::new(ProcessingPeriods::Description).string())
                        .col(
                            ColumnDef::new(ProcessingPeriods::StartDate)
                                .date()
                                .not_null(),
                        )
                        .col(ColumnDef::new(ProcessingPeriods::EndDate).date().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_processing_periods_schedule_id")
                                .from(
                                    ProcessingPeriods::Table,
                                    ProcessingPeriods::ProcessingScheduleId,
                                )
                                .to(ProcessingSchedules::Table, ProcessingSchedules::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_processing_periods_schedule_start_date")
                        .table(ProcessingPeriods::Table)
                        .col(ProcessingPeriods::ProcessingScheduleId)
                        .col(ProcessingPeriods::StartDate)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ProcessingPeriods::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(ProcessingSchedules::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum ProcessingSchedules {
        Table,
        Id,
        Code,
        Name,
        Description,
        ModifiedDate,
    }

    #[derive(DeriveIden)]
    enum ProcessingPeriods {
        Table,
        Id,
        ProcessingScheduleId,
        Name,
        Description,
        StartDate,
        EndDate,
    }
}

mod m20240101_000005_create_supervision_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000005_create_supervision_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(SupervisoryNodes::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(SupervisoryNodes::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(SupervisoryNodes::Code)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(SupervisoryNodes::Name).string())
                        .col(ColumnDef::new(SupervisoryNodes::Description).string())
                        .col(ColumnDef::new(SupervisoryNodes::FacilityId).uuid())
                        .col(ColumnDef::new(SupervisoryNodes::ParentId).uuid())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(RequisitionGroups::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(RequisitionGroups::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(RequisitionGroups::Code)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(RequisitionGroups::Name).string().not_null())
                        .col(ColumnDef::new(RequisitionGroups::Description).string())
                        .col(
                            ColumnDef::new(RequisitionGroups::SupervisoryNodeId)
                                .uuid()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(RequisitionGroupMembers::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(RequisitionGroupMembers::RequisitionGroupId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(RequisitionGroupMembers::FacilityId)
                                .uuid()
                                .not_null(),
                        )
                        .primary_key(
                            Index::create()
                                .col(RequisitionGroupMembers::RequisitionGroupId)
                                .col(RequisitionGroupMembers::FacilityId),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_requisition_group_members_group_id")
                                .from(
                                    RequisitionGroupMembers::Table,
                                    RequisitionGroupMembers::RequisitionGroupId,
                                )
                                .to(RequisitionGroups::Table, RequisitionGroups::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(RequisitionGroupProgramSchedules::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(RequisitionGroupProgramSchedules::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(RequisitionGroupProgramSchedules::RequisitionGroupId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(RequisitionGroupProgramSchedules::ProgramId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(RequisitionGroupProgramSchedules::ProcessingScheduleId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(RequisitionGroupProgramSchedules::DirectDelivery)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(RequisitionGroupProgramSchedules::DropOffFacilityId)
                                .uuid(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_rgps_requisition_group_id")
                                .from(
                                    RequisitionGroupProgramSchedules::Table,
                                    RequisitionGroupProgramSchedules::RequisitionGroupId,
                                )
                                .to(RequisitionGroups::Table, RequisitionGroups::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("uq_rgps_requisition_group_program")
                        .table(RequisitionGroupProgramSchedules::Table)
                        .col(RequisitionGroupProgramSchedules::RequisitionGroupId)
                        .col(RequisitionGroupProgramSchedules::ProgramId)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(
                    Table::drop()
                        .table(RequisitionGroupProgramSchedules::Table)
                        .to_owned(),
                )
                .await?;
            manager
                .drop_table(Table::drop().table(RequisitionGroupMembers::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(RequisitionGroups::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(SupervisoryNodes::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum SupervisoryNodes {
        Table,
        Id,
        Code,
        Name,
        Description,
        FacilityId,
        ParentId,
    }

    #[derive(DeriveIden)]
    enum RequisitionGroups {
        Table,
        Id,
        Code,
        Name,
        Description,
        SupervisoryNodeId,
    }

    #[derive(DeriveIden)]
    enum RequisitionGroupMembers {
        Table,
        RequisitionGroupId,
        FacilityId,
    }

    #[derive(DeriveIden)]
    enum RequisitionGroupProgramSchedules {
        Table,
        Id,
        RequisitionGroupId,
        ProgramId,
        ProcessingScheduleId,
        DirectDelivery,
        DropOffFacilityId,
    }
}

mod m20240101_000006_create_users_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000006_create_users_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Users::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                        .col(
                            ColumnDef::new(Users::Username)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Users::FirstName).string().not_null())
                        .col(ColumnDef::new(Users::LastName).string().not_null())
                        .col(
                            ColumnDef::new(Users::Email)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Users::Timezone).string())
                        .col(ColumnDef::new(Users::HomeFacilityId).uuid())
                        .col(
                            ColumnDef::new(Users::Verified)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(Users::Active)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(Users::LoginRestricted)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(ColumnDef::new(Users::AllowNotify).boolean())
                        .col(ColumnDef::new(Users::ExtraData).json_binary())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Users::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Users {
        Table,
        Id,
        Username,
        FirstName,
        LastName,
        Email,
        Timezone,
        HomeFacilityId,
        Verified,
        Active,
        LoginRestricted,
        AllowNotify,
        ExtraData,
    }
}

mod m20240101_000007_create_product_categories_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000007_create_product_categories_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(ProductCategories::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ProductCategories::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(ProductCategories::Code)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(ProductCategories::DisplayName)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductCategories::DisplayOrder)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ProductCategories::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum ProductCategories {
        Table,
        Id,
        Code,
        DisplayName,
        DisplayOrder,
    }
}
