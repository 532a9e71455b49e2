//! Receipt and bill-history text formatting
//!
//! Produces the plain-text views the transport delivers verbatim: the
//! receipt after finalization, the detail view from history, and the
//! one-line history rows.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::{Bill, BillBreakdown, BillSummary, ZoneReading};

const SEPARATOR_WIDTH: usize = 47;

fn separator() -> String {
    "-".repeat(SEPARATOR_WIDTH)
}

/// Drop insignificant trailing zeros for reading display ("50", "20.25").
fn reading(d: Decimal) -> Decimal {
    d.normalize()
}

fn zone_lines(label: &str, zone: &ZoneReading, unit: &str, currency: &str) -> Vec<String> {
    vec![
        format!(
            "Readings{}: {} - {}",
            label,
            reading(zone.current),
            reading(zone.previous)
        ),
        format!("Consumed{}: {} {}", label, reading(zone.consumption), unit),
        format!("Tariff{}: {:.2} {}/{}", label, zone.tariff, currency, unit),
    ]
}

fn body_lines(breakdown: &BillBreakdown, currency: &str) -> Vec<String> {
    let mut lines = vec![format!("Service: {}", breakdown.variant_label())];
    match breakdown {
        BillBreakdown::SingleZone { zone, .. } => {
            lines.extend(zone_lines("", zone, "kWh", currency));
        }
        BillBreakdown::TwoZone { day, night, .. } => {
            lines.extend(zone_lines(" (Day)", day, "kWh", currency));
            lines.extend(zone_lines(" (Night)", night, "kWh", currency));
        }
        BillBreakdown::ThreeZone {
            peak, day, night, ..
        } => {
            lines.extend(zone_lines(" (Peak)", peak, "kWh", currency));
            lines.extend(zone_lines(" (Day)", day, "kWh", currency));
            lines.extend(zone_lines(" (Night)", night, "kWh", currency));
        }
        BillBreakdown::Gas {
            current,
            previous,
            consumption,
            tariff_gas,
            tariff_supply,
            cost_gas,
            cost_supply,
            ..
        } => {
            lines.push(format!(
                "Readings: {} - {}",
                reading(*current),
                reading(*previous)
            ));
            lines.push(format!("Consumed: {} m3", reading(*consumption)));
            lines.push(format!("Gas tariff: {:.2} {}/m3", tariff_gas, currency));
            lines.push(format!(
                "Supply tariff: {:.3} {}/m3",
                tariff_supply, currency
            ));
            lines.push(format!("Gas cost: {:.2} {}", cost_gas, currency));
            lines.push(format!("Supply cost: {:.2} {}", cost_supply, currency));
        }
        BillBreakdown::Trash {
            unloads,
            bins,
            tariff,
            ..
        } => {
            lines.push(format!("Unloads: {}", unloads));
            lines.push(format!("Bins: {}", bins));
            lines.push(format!("Tariff: {:.2} {}", tariff, currency));
        }
    }
    lines
}

/// Receipt shown right after a bill is finalized.
pub fn receipt_text(
    breakdown: &BillBreakdown,
    created_at: DateTime<Utc>,
    currency: &str,
) -> String {
    let mut out = vec![
        separator(),
        format!("Date: {}", created_at.format("%d-%m-%Y %H:%M")),
    ];
    out.extend(body_lines(breakdown, currency));
    out.push(separator());
    out.push(format!(
        "Total: {:.2} {}",
        breakdown.total_cost(),
        currency
    ));
    out.join("\n")
}

/// Detail view for a stored bill selected from history.
pub fn detail_text(bill: &Bill, currency: &str) -> String {
    let mut out = vec![
        format!("Bill #{}", bill.id),
        format!("Date: {}", bill.created_at.format("%d-%m-%Y %H:%M")),
    ];
    out.extend(body_lines(&bill.breakdown, currency));
    out.push(format!(
        "Total: {:.2} {}",
        bill.breakdown.total_cost(),
        currency
    ));
    out.join("\n")
}

/// One history row: "{id}. {date}, {service}, {total} {currency}".
pub fn summary_row(summary: &BillSummary, currency: &str) -> String {
    format!(
        "{}. {}, {}, {:.2} {}",
        summary.id,
        summary.created_at.format("%d-%m-%Y"),
        summary.service,
        summary.total_cost,
        currency
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TariffTable;
    use chrono::TimeZone;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn when() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 0).unwrap()
    }

    #[test]
    fn single_zone_receipt_layout() {
        let breakdown = TariffTable::default()
            .single_zone(dec("150"), dec("100"))
            .unwrap();
        let text = receipt_text(&breakdown, when(), "UAH");
        assert!(text.starts_with(&"-".repeat(47)));
        assert!(text.contains("Date: 14-03-2025 09:26"));
        assert!(text.contains("Service: Electricity (single-zone)"));
        assert!(text.contains("Readings: 150 - 100"));
        assert!(text.contains("Consumed: 50 kWh"));
        assert!(text.contains("Tariff: 4.32 UAH/kWh"));
        assert!(text.ends_with("Total: 216.00 UAH"));
    }

    #[test]
    fn gas_receipt_shows_both_cost_components() {
        let breakdown = TariffTable::default()
            .gas_bill(dec("520"), dec("500"))
            .unwrap();
        let text = receipt_text(&breakdown, when(), "UAH");
        assert!(text.contains("Consumed: 20 m3"));
        assert!(text.contains("Gas tariff: 7.96 UAH/m3"));
        assert!(text.contains("Supply tariff: 1.308 UAH/m3"));
        assert!(text.contains("Gas cost: 159.20 UAH"));
        assert!(text.contains("Supply cost: 26.16 UAH"));
        assert!(text.ends_with("Total: 185.36 UAH"));
    }

    #[test]
    fn trash_receipt() {
        let breakdown = TariffTable::default().trash_bill(4, 2).unwrap();
        let text = receipt_text(&breakdown, when(), "UAH");
        assert!(text.contains("Unloads: 4"));
        assert!(text.contains("Bins: 2"));
        assert!(text.contains("Tariff: 165.00 UAH"));
        assert!(text.ends_with("Total: 1320.00 UAH"));
    }

    #[test]
    fn summary_row_format() {
        let row = summary_row(
            &BillSummary {
                id: 9,
                created_at: when(),
                service: "Gas".to_string(),
                total_cost: dec("185.36"),
            },
            "UAH",
        );
        assert_eq!(row, "9. 14-03-2025, Gas, 185.36 UAH");
    }
}
