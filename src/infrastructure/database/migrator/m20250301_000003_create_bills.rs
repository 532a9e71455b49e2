//! Create bills table
//!
//! Wide schema: one nullable column group per service variant; decimal
//! values are TEXT so they round-trip exactly.

use sea_orm_migration::prelude::*;

use super::m20250301_000001_create_users::Users;
use super::m20250301_000002_create_addresses::Addresses;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bills::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Bills::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Bills::UserId).integer().not_null())
                    .col(ColumnDef::new(Bills::AddressId).integer().not_null())
                    .col(ColumnDef::new(Bills::Service).string().not_null())
                    .col(
                        ColumnDef::new(Bills::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    // Single-zone electricity
                    .col(ColumnDef::new(Bills::Current).string())
                    .col(ColumnDef::new(Bills::Previous).string())
                    .col(ColumnDef::new(Bills::Consumption).string())
                    .col(ColumnDef::new(Bills::Tariff).string())
                    .col(ColumnDef::new(Bills::TotalCost).string())
                    // Two-zone electricity
                    .col(ColumnDef::new(Bills::CurrentDay2).string())
                    .col(ColumnDef::new(Bills::CurrentNight2).string())
                    .col(ColumnDef::new(Bills::PreviousDay2).string())
                    .col(ColumnDef::new(Bills::PreviousNight2).string())
                    .col(ColumnDef::new(Bills::ConsumptionDay2).string())
                    .col(ColumnDef::new(Bills::ConsumptionNight2).string())
                    .col(ColumnDef::new(Bills::TotalConsumption2).string())
                    .col(ColumnDef::new(Bills::TariffDay2).string())
                    .col(ColumnDef::new(Bills::TariffNight2).string())
                    .col(ColumnDef::new(Bills::CostDay2).string())
                    .col(ColumnDef::new(Bills::CostNight2).string())
                    .col(ColumnDef::new(Bills::TotalCost2).string())
                    // Three-zone electricity
                    .col(ColumnDef::new(Bills::CurrentPeak).string())
                    .col(ColumnDef::new(Bills::PreviousPeak).string())
                    .col(ColumnDef::new(Bills::ConsumptionPeak).string())
                    .col(ColumnDef::new(Bills::CurrentDay3).string())
                    .col(ColumnDef::new(Bills::PreviousDay3).string())
                    .col(ColumnDef::new(Bills::ConsumptionDay3).string())
                    .col(ColumnDef::new(Bills::CurrentNight3).string())
                    .col(ColumnDef::new(Bills::PreviousNight3).string())
                    .col(ColumnDef::new(Bills::ConsumptionNight3).string())
                    .col(ColumnDef::new(Bills::TotalConsumption3).string())
                    .col(ColumnDef::new(Bills::TariffPeak).string())
                    .col(ColumnDef::new(Bills::TariffDay3).string())
                    .col(ColumnDef::new(Bills::TariffNight3).string())
                    .col(ColumnDef::new(Bills::CostPeak).string())
                    .col(ColumnDef::new(Bills::CostDay3).string())
                    .col(ColumnDef::new(Bills::CostNight3).string())
                    .col(ColumnDef::new(Bills::TotalCost3).string())
                    // Gas and gas supply
                    .col(ColumnDef::new(Bills::GasCurrent).string())
                    .col(ColumnDef::new(Bills::GasPrevious).string())
                    .col(ColumnDef::new(Bills::GasConsumption).string())
                    .col(ColumnDef::new(Bills::TariffGas).string())
                    .col(ColumnDef::new(Bills::TariffGasSupply).string())
                    .col(ColumnDef::new(Bills::CostGas).string())
                    .col(ColumnDef::new(Bills::CostGasSupply).string())
                    .col(ColumnDef::new(Bills::TotalCostGas).string())
                    // Trash removal
                    .col(ColumnDef::new(Bills::Unloads).integer())
                    .col(ColumnDef::new(Bills::Bins).integer())
                    .col(ColumnDef::new(Bills::TrashTariff).string())
                    .col(ColumnDef::new(Bills::TotalCostTrash).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bills_user")
                            .from(Bills::Table, Bills::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bills_address")
                            .from(Bills::Table, Bills::AddressId)
                            .to(Addresses::Table, Addresses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create index for bill history per address
        manager
            .create_index(
                Index::create()
                    .name("idx_bills_address")
                    .table(Bills::Table)
                    .col(Bills::AddressId)
                    .to_owned(),
            )
            .await?;

        // Create index for the retention sweep
        manager
            .create_index(
                Index::create()
                    .name("idx_bills_created_at")
                    .table(Bills::Table)
                    .col(Bills::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bills::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Bills {
    Table,
    Id,
    UserId,
    AddressId,
    Service,
    CreatedAt,
    Current,
    Previous,
    Consumption,
    Tariff,
    TotalCost,
    // Explicit idents: the derive would not keep the `_2` / `_3` suffixes
    #[iden = "current_day_2"]
    CurrentDay2,
    #[iden = "current_night_2"]
    CurrentNight2,
    #[iden = "previous_day_2"]
    PreviousDay2,
    #[iden = "previous_night_2"]
    PreviousNight2,
    #[iden = "consumption_day_2"]
    ConsumptionDay2,
    #[iden = "consumption_night_2"]
    ConsumptionNight2,
    #[iden = "total_consumption_2"]
    TotalConsumption2,
    #[iden = "tariff_day_2"]
    TariffDay2,
    #[iden = "tariff_night_2"]
    TariffNight2,
    #[iden = "cost_day_2"]
    CostDay2,
    #[iden = "cost_night_2"]
    CostNight2,
    #[iden = "total_cost_2"]
    TotalCost2,
    CurrentPeak,
    PreviousPeak,
    ConsumptionPeak,
    #[iden = "current_day_3"]
    CurrentDay3,
    #[iden = "previous_day_3"]
    PreviousDay3,
    #[iden = "consumption_day_3"]
    ConsumptionDay3,
    #[iden = "current_night_3"]
    CurrentNight3,
    #[iden = "previous_night_3"]
    PreviousNight3,
    #[iden = "consumption_night_3"]
    ConsumptionNight3,
    #[iden = "total_consumption_3"]
    TotalConsumption3,
    TariffPeak,
    #[iden = "tariff_day_3"]
    TariffDay3,
    #[iden = "tariff_night_3"]
    TariffNight3,
    CostPeak,
    #[iden = "cost_day_3"]
    CostDay3,
    #[iden = "cost_night_3"]
    CostNight3,
    #[iden = "total_cost_3"]
    TotalCost3,
    GasCurrent,
    GasPrevious,
    GasConsumption,
    TariffGas,
    TariffGasSupply,
    CostGas,
    CostGasSupply,
    TotalCostGas,
    Unloads,
    Bins,
    TrashTariff,
    TotalCostTrash,
}
