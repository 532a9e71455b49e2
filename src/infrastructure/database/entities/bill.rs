//! Bill entity
//!
//! One wide row per bill: every service variant has its own column group
//! and exactly one group is populated. Monetary and reading values are
//! stored as decimal strings to keep them exact in SQLite.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bills")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub user_id: i32,
    pub address_id: i32,

    /// Service discriminator: Electricity, Gas, Trash
    pub service: String,

    pub created_at: DateTimeUtc,

    // Single-zone electricity
    #[sea_orm(nullable)]
    pub current: Option<String>,
    #[sea_orm(nullable)]
    pub previous: Option<String>,
    #[sea_orm(nullable)]
    pub consumption: Option<String>,
    #[sea_orm(nullable)]
    pub tariff: Option<String>,
    #[sea_orm(nullable)]
    pub total_cost: Option<String>,

    // Two-zone electricity
    #[sea_orm(nullable, column_name = "current_day_2")]
    pub current_day_2: Option<String>,
    #[sea_orm(nullable, column_name = "current_night_2")]
    pub current_night_2: Option<String>,
    #[sea_orm(nullable, column_name = "previous_day_2")]
    pub previous_day_2: Option<String>,
    #[sea_orm(nullable, column_name = "previous_night_2")]
    pub previous_night_2: Option<String>,
    #[sea_orm(nullable, column_name = "consumption_day_2")]
    pub consumption_day_2: Option<String>,
    #[sea_orm(nullable, column_name = "consumption_night_2")]
    pub consumption_night_2: Option<String>,
    #[sea_orm(nullable, column_name = "total_consumption_2")]
    pub total_consumption_2: Option<String>,
    #[sea_orm(nullable, column_name = "tariff_day_2")]
    pub tariff_day_2: Option<String>,
    #[sea_orm(nullable, column_name = "tariff_night_2")]
    pub tariff_night_2: Option<String>,
    #[sea_orm(nullable, column_name = "cost_day_2")]
    pub cost_day_2: Option<String>,
    #[sea_orm(nullable, column_name = "cost_night_2")]
    pub cost_night_2: Option<String>,
    #[sea_orm(nullable, column_name = "total_cost_2")]
    pub total_cost_2: Option<String>,

    // Three-zone electricity
    #[sea_orm(nullable)]
    pub current_peak: Option<String>,
    #[sea_orm(nullable)]
    pub previous_peak: Option<String>,
    #[sea_orm(nullable)]
    pub consumption_peak: Option<String>,
    #[sea_orm(nullable, column_name = "current_day_3")]
    pub current_day_3: Option<String>,
    #[sea_orm(nullable, column_name = "previous_day_3")]
    pub previous_day_3: Option<String>,
    #[sea_orm(nullable, column_name = "consumption_day_3")]
    pub consumption_day_3: Option<String>,
    #[sea_orm(nullable, column_name = "current_night_3")]
    pub current_night_3: Option<String>,
    #[sea_orm(nullable, column_name = "previous_night_3")]
    pub previous_night_3: Option<String>,
    #[sea_orm(nullable, column_name = "consumption_night_3")]
    pub consumption_night_3: Option<String>,
    #[sea_orm(nullable, column_name = "total_consumption_3")]
    pub total_consumption_3: Option<String>,
    #[sea_orm(nullable)]
    pub tariff_peak: Option<String>,
    #[sea_orm(nullable, column_name = "tariff_day_3")]
    pub tariff_day_3: Option<String>,
    #[sea_orm(nullable, column_name = "tariff_night_3")]
    pub tariff_night_3: Option<String>,
    #[sea_orm(nullable)]
    pub cost_peak: Option<String>,
    #[sea_orm(nullable, column_name = "cost_day_3")]
    pub cost_day_3: Option<String>,
    #[sea_orm(nullable, column_name = "cost_night_3")]
    pub cost_night_3: Option<String>,
    #[sea_orm(nullable, column_name = "total_cost_3")]
    pub total_cost_3: Option<String>,

    // Gas and gas supply
    #[sea_orm(nullable)]
    pub gas_current: Option<String>,
    #[sea_orm(nullable)]
    pub gas_previous: Option<String>,
    #[sea_orm(nullable)]
    pub gas_consumption: Option<String>,
    #[sea_orm(nullable)]
    pub tariff_gas: Option<String>,
    #[sea_orm(nullable)]
    pub tariff_gas_supply: Option<String>,
    #[sea_orm(nullable)]
    pub cost_gas: Option<String>,
    #[sea_orm(nullable)]
    pub cost_gas_supply: Option<String>,
    #[sea_orm(nullable)]
    pub total_cost_gas: Option<String>,

    // Trash removal
    #[sea_orm(nullable)]
    pub unloads: Option<i32>,
    #[sea_orm(nullable)]
    pub bins: Option<i32>,
    #[sea_orm(nullable)]
    pub trash_tariff: Option<String>,
    #[sea_orm(nullable)]
    pub total_cost_trash: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,

    #[sea_orm(
        belongs_to = "super::address::Entity",
        from = "Column::AddressId",
        to = "super::address::Column::Id"
    )]
    Address,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::address::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Address.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
