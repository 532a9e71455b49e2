//! Bill repository interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::{Bill, BillSummary, NewBill};
use crate::domain::DomainResult;

#[async_trait]
pub trait BillRepository: Send + Sync {
    async fn create(&self, bill: NewBill) -> DomainResult<Bill>;

    /// Bill history for one address, newest first.
    async fn list_for_address(&self, address_id: i32) -> DomainResult<Vec<BillSummary>>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Bill>>;

    /// Retention sweep: delete bills created before the cutoff.
    /// Returns the number of rows removed.
    async fn purge_older_than(&self, cutoff: DateTime<Utc>) -> DomainResult<u64>;
}
