//! SeaORM implementation of BillRepository
//!
//! Maps the [`BillBreakdown`] variants onto the wide bills row: exactly one
//! variant column group is populated per row, selected by the discriminator
//! when reading back.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};
use tracing::debug;

use crate::domain::{
    Bill, BillBreakdown, BillRepository, BillSummary, DomainError, DomainResult, NewBill,
    ZoneReading,
};
use crate::infrastructure::database::entities::bill;

use super::db_err;

pub struct SeaOrmBillRepository {
    db: DatabaseConnection,
}

impl SeaOrmBillRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn col(d: Decimal) -> Option<String> {
    Some(d.to_string())
}

/// Read back a decimal column that must be populated for the row's variant.
fn dec(name: &'static str, value: &Option<String>) -> DomainResult<Decimal> {
    let raw = value.as_deref().ok_or_else(|| {
        DomainError::Validation(format!(
            "bill column '{}' is empty for its service variant",
            name
        ))
    })?;
    raw.parse().map_err(|_| {
        DomainError::Validation(format!("bill column '{}' holds a non-decimal value", name))
    })
}

fn count(name: &'static str, value: Option<i32>) -> DomainResult<u32> {
    let raw = value.ok_or_else(|| {
        DomainError::Validation(format!(
            "bill column '{}' is empty for its service variant",
            name
        ))
    })?;
    u32::try_from(raw)
        .map_err(|_| DomainError::Validation(format!("bill column '{}' is negative", name)))
}

fn breakdown_to_active(new: NewBill) -> bill::ActiveModel {
    let mut model = bill::ActiveModel {
        id: NotSet,
        user_id: Set(new.user_id),
        address_id: Set(new.address_id),
        service: Set(new.breakdown.service_name().to_string()),
        created_at: Set(new.created_at),
        ..Default::default()
    };

    match new.breakdown {
        BillBreakdown::SingleZone { zone, total_cost } => {
            model.current = Set(col(zone.current));
            model.previous = Set(col(zone.previous));
            model.consumption = Set(col(zone.consumption));
            model.tariff = Set(col(zone.tariff));
            model.total_cost = Set(col(total_cost));
        }
        BillBreakdown::TwoZone {
            day,
            night,
            total_consumption,
            total_cost,
        } => {
            model.current_day_2 = Set(col(day.current));
            model.previous_day_2 = Set(col(day.previous));
            model.consumption_day_2 = Set(col(day.consumption));
            model.tariff_day_2 = Set(col(day.tariff));
            model.cost_day_2 = Set(col(day.cost));
            model.current_night_2 = Set(col(night.current));
            model.previous_night_2 = Set(col(night.previous));
            model.consumption_night_2 = Set(col(night.consumption));
            model.tariff_night_2 = Set(col(night.tariff));
            model.cost_night_2 = Set(col(night.cost));
            model.total_consumption_2 = Set(col(total_consumption));
            model.total_cost_2 = Set(col(total_cost));
        }
        BillBreakdown::ThreeZone {
            peak,
            day,
            night,
            total_consumption,
            total_cost,
        } => {
            model.current_peak = Set(col(peak.current));
            model.previous_peak = Set(col(peak.previous));
            model.consumption_peak = Set(col(peak.consumption));
            model.tariff_peak = Set(col(peak.tariff));
            model.cost_peak = Set(col(peak.cost));
            model.current_day_3 = Set(col(day.current));
            model.previous_day_3 = Set(col(day.previous));
            model.consumption_day_3 = Set(col(day.consumption));
            model.tariff_day_3 = Set(col(day.tariff));
            model.cost_day_3 = Set(col(day.cost));
            model.current_night_3 = Set(col(night.current));
            model.previous_night_3 = Set(col(night.previous));
            model.consumption_night_3 = Set(col(night.consumption));
            model.tariff_night_3 = Set(col(night.tariff));
            model.cost_night_3 = Set(col(night.cost));
            model.total_consumption_3 = Set(col(total_consumption));
            model.total_cost_3 = Set(col(total_cost));
        }
        BillBreakdown::Gas {
            current,
            previous,
            consumption,
            tariff_gas,
            tariff_supply,
            cost_gas,
            cost_supply,
            total_cost,
        } => {
            model.gas_current = Set(col(current));
            model.gas_previous = Set(col(previous));
            model.gas_consumption = Set(col(consumption));
            model.tariff_gas = Set(col(tariff_gas));
            model.tariff_gas_supply = Set(col(tariff_supply));
            model.cost_gas = Set(col(cost_gas));
            model.cost_gas_supply = Set(col(cost_supply));
            model.total_cost_gas = Set(col(total_cost));
        }
        BillBreakdown::Trash {
            unloads,
            bins,
            tariff,
            total_cost,
        } => {
            model.unloads = Set(Some(unloads as i32));
            model.bins = Set(Some(bins as i32));
            model.trash_tariff = Set(col(tariff));
            model.total_cost_trash = Set(col(total_cost));
        }
    }

    model
}

fn zone(
    current: (&'static str, &Option<String>),
    previous: (&'static str, &Option<String>),
    consumption: (&'static str, &Option<String>),
    tariff: (&'static str, &Option<String>),
    cost: (&'static str, &Option<String>),
) -> DomainResult<ZoneReading> {
    Ok(ZoneReading {
        current: dec(current.0, current.1)?,
        previous: dec(previous.0, previous.1)?,
        consumption: dec(consumption.0, consumption.1)?,
        tariff: dec(tariff.0, tariff.1)?,
        cost: dec(cost.0, cost.1)?,
    })
}

/// Reconstruct the breakdown from whichever column group the row carries.
fn model_to_breakdown(m: &bill::Model) -> DomainResult<BillBreakdown> {
    if m.total_cost.is_some() {
        let z = zone(
            ("current", &m.current),
            ("previous", &m.previous),
            ("consumption", &m.consumption),
            ("tariff", &m.tariff),
            ("total_cost", &m.total_cost),
        )?;
        let total_cost = z.cost;
        return Ok(BillBreakdown::SingleZone {
            zone: z,
            total_cost,
        });
    }
    if m.total_cost_2.is_some() {
        return Ok(BillBreakdown::TwoZone {
            day: zone(
                ("current_day_2", &m.current_day_2),
                ("previous_day_2", &m.previous_day_2),
                ("consumption_day_2", &m.consumption_day_2),
                ("tariff_day_2", &m.tariff_day_2),
                ("cost_day_2", &m.cost_day_2),
            )?,
            night: zone(
                ("current_night_2", &m.current_night_2),
                ("previous_night_2", &m.previous_night_2),
                ("consumption_night_2", &m.consumption_night_2),
                ("tariff_night_2", &m.tariff_night_2),
                ("cost_night_2", &m.cost_night_2),
            )?,
            total_consumption: dec("total_consumption_2", &m.total_consumption_2)?,
            total_cost: dec("total_cost_2", &m.total_cost_2)?,
        });
    }
    if m.total_cost_3.is_some() {
        return Ok(BillBreakdown::ThreeZone {
            peak: zone(
                ("current_peak", &m.current_peak),
                ("previous_peak", &m.previous_peak),
                ("consumption_peak", &m.consumption_peak),
                ("tariff_peak", &m.tariff_peak),
                ("cost_peak", &m.cost_peak),
            )?,
            day: zone(
                ("current_day_3", &m.current_day_3),
                ("previous_day_3", &m.previous_day_3),
                ("consumption_day_3", &m.consumption_day_3),
                ("tariff_day_3", &m.tariff_day_3),
                ("cost_day_3", &m.cost_day_3),
            )?,
            night: zone(
                ("current_night_3", &m.current_night_3),
                ("previous_night_3", &m.previous_night_3),
                ("consumption_night_3", &m.consumption_night_3),
                ("tariff_night_3", &m.tariff_night_3),
                ("cost_night_3", &m.cost_night_3),
            )?,
            total_consumption: dec("total_consumption_3", &m.total_consumption_3)?,
            total_cost: dec("total_cost_3", &m.total_cost_3)?,
        });
    }
    if m.total_cost_gas.is_some() {
        return Ok(BillBreakdown::Gas {
            current: dec("gas_current", &m.gas_current)?,
            previous: dec("gas_previous", &m.gas_previous)?,
            consumption: dec("gas_consumption", &m.gas_consumption)?,
            tariff_gas: dec("tariff_gas", &m.tariff_gas)?,
            tariff_supply: dec("tariff_gas_supply", &m.tariff_gas_supply)?,
            cost_gas: dec("cost_gas", &m.cost_gas)?,
            cost_supply: dec("cost_gas_supply", &m.cost_gas_supply)?,
            total_cost: dec("total_cost_gas", &m.total_cost_gas)?,
        });
    }
    if m.total_cost_trash.is_some() {
        return Ok(BillBreakdown::Trash {
            unloads: count("unloads", m.unloads)?,
            bins: count("bins", m.bins)?,
            tariff: dec("trash_tariff", &m.trash_tariff)?,
            total_cost: dec("total_cost_trash", &m.total_cost_trash)?,
        });
    }
    Err(DomainError::Validation(format!(
        "bill row {} has no populated service variant",
        m.id
    )))
}

fn model_to_domain(m: bill::Model) -> DomainResult<Bill> {
    let breakdown = model_to_breakdown(&m)?;
    Ok(Bill {
        id: m.id,
        user_id: m.user_id,
        address_id: m.address_id,
        created_at: m.created_at,
        breakdown,
    })
}

fn model_to_summary(m: &bill::Model) -> DomainResult<BillSummary> {
    let breakdown = model_to_breakdown(m)?;
    Ok(BillSummary {
        id: m.id,
        created_at: m.created_at,
        service: breakdown.service_name().to_string(),
        total_cost: breakdown.total_cost(),
    })
}

// ── BillRepository impl ─────────────────────────────────────────

#[async_trait]
impl BillRepository for SeaOrmBillRepository {
    async fn create(&self, new: NewBill) -> DomainResult<Bill> {
        debug!(
            address_id = new.address_id,
            service = new.breakdown.service_name(),
            "Saving bill"
        );
        let inserted = breakdown_to_active(new)
            .insert(&self.db)
            .await
            .map_err(db_err)?;
        model_to_domain(inserted)
    }

    async fn list_for_address(&self, address_id: i32) -> DomainResult<Vec<BillSummary>> {
        let models = bill::Entity::find()
            .filter(bill::Column::AddressId.eq(address_id))
            .order_by_desc(bill::Column::CreatedAt)
            .order_by_desc(bill::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.iter().map(model_to_summary).collect()
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Bill>> {
        let model = bill::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn purge_older_than(&self, cutoff: DateTime<Utc>) -> DomainResult<u64> {
        let result = bill::Entity::delete_many()
            .filter(bill::Column::CreatedAt.lt(cutoff))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected)
    }
}
