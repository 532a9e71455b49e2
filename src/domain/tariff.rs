//! Fixed utility tariffs
//!
//! Electricity and gas rates are business constants; the trash rate changed
//! between billing periods and is taken from configuration.

use rust_decimal::Decimal;

/// Per-unit rates for every supported service variant.
#[derive(Debug, Clone, PartialEq)]
pub struct TariffTable {
    /// Single-zone electricity, per kWh
    pub electricity_single: Decimal,
    /// Two-zone electricity, day zone
    pub electricity_day_two: Decimal,
    /// Two-zone electricity, night zone
    pub electricity_night_two: Decimal,
    /// Three-zone electricity, peak zone
    pub electricity_peak: Decimal,
    /// Three-zone electricity, day zone
    pub electricity_day_three: Decimal,
    /// Three-zone electricity, night zone
    pub electricity_night_three: Decimal,
    /// Gas consumption, per m3
    pub gas: Decimal,
    /// Gas supply surcharge, per m3
    pub gas_supply: Decimal,
    /// Trash removal, per (unload x bin)
    pub trash: Decimal,
    /// Currency label for receipts
    pub currency: String,
}

impl Default for TariffTable {
    fn default() -> Self {
        Self {
            electricity_single: Decimal::new(432, 2),      // 4.32
            electricity_day_two: Decimal::new(432, 2),     // 4.32
            electricity_night_two: Decimal::new(216, 2),   // 2.16
            electricity_peak: Decimal::new(648, 2),        // 6.48
            electricity_day_three: Decimal::new(432, 2),   // 4.32
            electricity_night_three: Decimal::new(1728, 3), // 1.728
            gas: Decimal::new(796, 2),                     // 7.96
            gas_supply: Decimal::new(1308, 3),             // 1.308
            trash: Decimal::new(165, 0),
            currency: "UAH".to_string(),
        }
    }
}

impl TariffTable {
    /// Build the table with configured overrides applied.
    pub fn from_config(cfg: &crate::config::TariffSection) -> Self {
        Self {
            trash: cfg.trash_rate,
            currency: cfg.currency.clone(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rates_match_business_constants() {
        let t = TariffTable::default();
        assert_eq!(t.electricity_single.to_string(), "4.32");
        assert_eq!(t.electricity_night_two.to_string(), "2.16");
        assert_eq!(t.electricity_peak.to_string(), "6.48");
        assert_eq!(t.electricity_night_three.to_string(), "1.728");
        assert_eq!(t.gas.to_string(), "7.96");
        assert_eq!(t.gas_supply.to_string(), "1.308");
        assert_eq!(t.trash.to_string(), "165");
    }

    #[test]
    fn config_overrides_trash_rate_only() {
        let cfg = crate::config::TariffSection {
            trash_rate: Decimal::new(160, 0),
            currency: "EUR".to_string(),
        };
        let t = TariffTable::from_config(&cfg);
        assert_eq!(t.trash, Decimal::new(160, 0));
        assert_eq!(t.currency, "EUR");
        assert_eq!(t.electricity_single, Decimal::new(432, 2));
    }
}
