//! Bill calculators
//!
//! Pure functions turning meter readings into consumption and cost
//! breakdowns. One calculator per service variant; the result is an
//! immutable [`BillBreakdown`] holding exactly one variant.
//!
//! Invariant: `current >= previous` for every reading pair. A pair that
//! violates it is rejected with [`DomainError::InvalidInput`] so a negative
//! consumption can never reach the store.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::{DomainError, DomainResult};
use super::tariff::TariffTable;

/// Readings, consumption and cost for a single metering zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneReading {
    pub current: Decimal,
    pub previous: Decimal,
    pub consumption: Decimal,
    pub tariff: Decimal,
    pub cost: Decimal,
}

/// Overflowed `Decimal` arithmetic is treated like any other bad reading:
/// re-prompt, never panic.
fn overflow() -> DomainError {
    DomainError::InvalidInput("reading is too large to bill".to_string())
}

fn mul(a: Decimal, b: Decimal) -> DomainResult<Decimal> {
    a.checked_mul(b).ok_or_else(overflow)
}

fn add(a: Decimal, b: Decimal) -> DomainResult<Decimal> {
    a.checked_add(b).ok_or_else(overflow)
}

impl ZoneReading {
    fn compute(current: Decimal, previous: Decimal, tariff: Decimal) -> DomainResult<Self> {
        if current < previous {
            return Err(DomainError::InvalidInput(format!(
                "current reading {} is below previous reading {}",
                current, previous
            )));
        }
        let consumption = current - previous;
        Ok(Self {
            current,
            previous,
            consumption,
            tariff,
            cost: mul(consumption, tariff)?,
        })
    }
}

/// Computed bill for exactly one service variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BillBreakdown {
    SingleZone {
        zone: ZoneReading,
        total_cost: Decimal,
    },
    TwoZone {
        day: ZoneReading,
        night: ZoneReading,
        total_consumption: Decimal,
        total_cost: Decimal,
    },
    ThreeZone {
        peak: ZoneReading,
        day: ZoneReading,
        night: ZoneReading,
        total_consumption: Decimal,
        total_cost: Decimal,
    },
    Gas {
        current: Decimal,
        previous: Decimal,
        consumption: Decimal,
        tariff_gas: Decimal,
        tariff_supply: Decimal,
        cost_gas: Decimal,
        cost_supply: Decimal,
        total_cost: Decimal,
    },
    Trash {
        unloads: u32,
        bins: u32,
        tariff: Decimal,
        total_cost: Decimal,
    },
}

impl BillBreakdown {
    /// Service discriminator as persisted in the `service` column.
    pub fn service_name(&self) -> &'static str {
        match self {
            Self::SingleZone { .. } | Self::TwoZone { .. } | Self::ThreeZone { .. } => {
                "Electricity"
            }
            Self::Gas { .. } => "Gas",
            Self::Trash { .. } => "Trash",
        }
    }

    /// Human-readable variant label for receipts and detail views.
    pub fn variant_label(&self) -> &'static str {
        match self {
            Self::SingleZone { .. } => "Electricity (single-zone)",
            Self::TwoZone { .. } => "Electricity (two-zone)",
            Self::ThreeZone { .. } => "Electricity (three-zone)",
            Self::Gas { .. } => "Gas and gas supply",
            Self::Trash { .. } => "Trash removal",
        }
    }

    pub fn total_cost(&self) -> Decimal {
        match self {
            Self::SingleZone { total_cost, .. }
            | Self::TwoZone { total_cost, .. }
            | Self::ThreeZone { total_cost, .. }
            | Self::Gas { total_cost, .. }
            | Self::Trash { total_cost, .. } => *total_cost,
        }
    }
}

impl TariffTable {
    /// Single-zone electricity bill.
    pub fn single_zone(&self, current: Decimal, previous: Decimal) -> DomainResult<BillBreakdown> {
        let zone = ZoneReading::compute(current, previous, self.electricity_single)?;
        let total_cost = zone.cost;
        Ok(BillBreakdown::SingleZone { zone, total_cost })
    }

    /// Two-zone (day/night) electricity bill.
    pub fn two_zone(
        &self,
        day_current: Decimal,
        day_previous: Decimal,
        night_current: Decimal,
        night_previous: Decimal,
    ) -> DomainResult<BillBreakdown> {
        let day = ZoneReading::compute(day_current, day_previous, self.electricity_day_two)?;
        let night =
            ZoneReading::compute(night_current, night_previous, self.electricity_night_two)?;
        Ok(BillBreakdown::TwoZone {
            total_consumption: add(day.consumption, night.consumption)?,
            total_cost: add(day.cost, night.cost)?,
            day,
            night,
        })
    }

    /// Three-zone (peak/day/night) electricity bill.
    pub fn three_zone(
        &self,
        peak_current: Decimal,
        peak_previous: Decimal,
        day_current: Decimal,
        day_previous: Decimal,
        night_current: Decimal,
        night_previous: Decimal,
    ) -> DomainResult<BillBreakdown> {
        let peak = ZoneReading::compute(peak_current, peak_previous, self.electricity_peak)?;
        let day = ZoneReading::compute(day_current, day_previous, self.electricity_day_three)?;
        let night =
            ZoneReading::compute(night_current, night_previous, self.electricity_night_three)?;
        Ok(BillBreakdown::ThreeZone {
            total_consumption: add(add(peak.consumption, day.consumption)?, night.consumption)?,
            total_cost: add(add(peak.cost, day.cost)?, night.cost)?,
            peak,
            day,
            night,
        })
    }

    /// Gas bill: consumption charged at the gas rate plus the supply
    /// surcharge over the same volume.
    pub fn gas_bill(&self, current: Decimal, previous: Decimal) -> DomainResult<BillBreakdown> {
        if current < previous {
            return Err(DomainError::InvalidInput(format!(
                "current reading {} is below previous reading {}",
                current, previous
            )));
        }
        let consumption = current - previous;
        let cost_gas = mul(consumption, self.gas)?;
        let cost_supply = mul(consumption, self.gas_supply)?;
        Ok(BillBreakdown::Gas {
            current,
            previous,
            consumption,
            tariff_gas: self.gas,
            tariff_supply: self.gas_supply,
            cost_gas,
            cost_supply,
            total_cost: add(cost_gas, cost_supply)?,
        })
    }

    /// Trash removal bill: `unloads * bins * rate`.
    pub fn trash_bill(&self, unloads: u32, bins: u32) -> DomainResult<BillBreakdown> {
        let total_cost = mul(mul(Decimal::from(unloads), Decimal::from(bins))?, self.trash)?;
        Ok(BillBreakdown::Trash {
            unloads,
            bins,
            tariff: self.trash,
            total_cost,
        })
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn single_zone_scenario() {
        // previous=100, current=150, rate=4.32 -> consumption=50, total=216.00
        let b = TariffTable::default()
            .single_zone(dec("150"), dec("100"))
            .unwrap();
        let BillBreakdown::SingleZone { zone, total_cost } = b else {
            panic!("wrong variant");
        };
        assert_eq!(zone.consumption, dec("50"));
        assert_eq!(zone.cost, dec("216.00"));
        assert_eq!(total_cost, dec("216.00"));
    }

    #[test]
    fn two_zone_scenario() {
        // day 250-200 @ 4.32 = 216.00, night 130-100 @ 2.16 = 64.80
        let b = TariffTable::default()
            .two_zone(dec("250"), dec("200"), dec("130"), dec("100"))
            .unwrap();
        let BillBreakdown::TwoZone {
            day,
            night,
            total_consumption,
            total_cost,
        } = b
        else {
            panic!("wrong variant");
        };
        assert_eq!(day.cost, dec("216.00"));
        assert_eq!(night.cost, dec("64.80"));
        assert_eq!(total_consumption, dec("80"));
        assert_eq!(total_cost, dec("280.80"));
    }

    #[test]
    fn three_zone_sums_all_zones() {
        let b = TariffTable::default()
            .three_zone(
                dec("110"),
                dec("100"),
                dec("220"),
                dec("200"),
                dec("330"),
                dec("300"),
            )
            .unwrap();
        let BillBreakdown::ThreeZone {
            peak,
            day,
            night,
            total_consumption,
            total_cost,
        } = b
        else {
            panic!("wrong variant");
        };
        assert_eq!(peak.cost, dec("64.80")); // 10 * 6.48
        assert_eq!(day.cost, dec("86.40")); // 20 * 4.32
        assert_eq!(night.cost, dec("51.840")); // 30 * 1.728
        assert_eq!(total_consumption, dec("60"));
        assert_eq!(total_cost, dec("203.04"));
    }

    #[test]
    fn gas_scenario() {
        // previous=500, current=520 -> consumption=20, gas=159.20, supply=26.16
        let b = TariffTable::default()
            .gas_bill(dec("520"), dec("500"))
            .unwrap();
        let BillBreakdown::Gas {
            consumption,
            cost_gas,
            cost_supply,
            total_cost,
            ..
        } = b
        else {
            panic!("wrong variant");
        };
        assert_eq!(consumption, dec("20"));
        assert_eq!(cost_gas, dec("159.20"));
        assert_eq!(cost_supply, dec("26.160"));
        assert_eq!(total_cost, dec("185.36"));
    }

    #[test]
    fn trash_scenario() {
        // unloads=4, bins=2, rate=165 -> 1320
        let b = TariffTable::default().trash_bill(4, 2).unwrap();
        assert_eq!(b.total_cost(), dec("1320"));
    }

    #[test]
    fn equal_readings_yield_zero_cost() {
        let b = TariffTable::default()
            .single_zone(dec("100"), dec("100"))
            .unwrap();
        let BillBreakdown::SingleZone { zone, total_cost } = b else {
            panic!("wrong variant");
        };
        assert_eq!(zone.consumption, Decimal::ZERO);
        assert_eq!(total_cost, dec("0.00"));
    }

    #[test]
    fn current_below_previous_is_rejected() {
        let t = TariffTable::default();
        assert!(t.single_zone(dec("90"), dec("100")).is_err());
        assert!(t.gas_bill(dec("499"), dec("500")).is_err());
        // A bad pair in any zone rejects the whole bill
        assert!(t
            .two_zone(dec("250"), dec("200"), dec("99"), dec("100"))
            .is_err());
    }

    #[test]
    fn rejection_is_a_reprompt_not_an_abort() {
        let err = TariffTable::default()
            .single_zone(dec("90"), dec("100"))
            .unwrap_err();
        assert!(!err.aborts_flow());
    }

    #[test]
    fn fractional_readings_are_accepted() {
        let b = TariffTable::default()
            .gas_bill(dec("520.5"), dec("500.25"))
            .unwrap();
        let BillBreakdown::Gas { consumption, .. } = b else {
            panic!("wrong variant");
        };
        assert_eq!(consumption, dec("20.25"));
    }

    #[test]
    fn oversized_reading_is_rejected_not_a_panic() {
        // Near Decimal::MAX; multiplying by any tariff > 1 overflows.
        let huge = dec("79000000000000000000000000000");
        let t = TariffTable::default();

        let err = t.single_zone(huge, dec("0")).unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
        assert!(!err.aborts_flow());

        assert!(t.gas_bill(huge, dec("0")).is_err());
        assert!(t.two_zone(huge, dec("0"), dec("0"), dec("0")).is_err());
        assert!(t
            .three_zone(huge, dec("0"), dec("0"), dec("0"), dec("0"), dec("0"))
            .is_err());
    }

    #[test]
    fn oversized_trash_rate_is_rejected_not_a_panic() {
        let mut t = TariffTable::default();
        t.trash = dec("79000000000000000000000000000");
        let err = t.trash_bill(u32::MAX, u32::MAX).unwrap_err();
        assert!(!err.aborts_flow());
    }

    #[test]
    fn calculation_is_idempotent() {
        let t = TariffTable::default();
        let a = t
            .two_zone(dec("250"), dec("200"), dec("130"), dec("100"))
            .unwrap();
        let b = t
            .two_zone(dec("250"), dec("200"), dec("130"), dec("100"))
            .unwrap();
        assert_eq!(a, b);
    }
}
