//! Bill domain entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::billing::BillBreakdown;

/// A finalized, persisted utility charge. Insert-only: bills are never
/// mutated, only deleted by the retention sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct Bill {
    pub id: i32,
    pub user_id: i32,
    pub address_id: i32,
    pub created_at: DateTime<Utc>,
    pub breakdown: BillBreakdown,
}

/// Fields for creating a bill; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBill {
    pub user_id: i32,
    pub address_id: i32,
    pub created_at: DateTime<Utc>,
    pub breakdown: BillBreakdown,
}

/// Listing row for bill history.
#[derive(Debug, Clone, PartialEq)]
pub struct BillSummary {
    pub id: i32,
    pub created_at: DateTime<Utc>,
    pub service: String,
    pub total_cost: Decimal,
}
