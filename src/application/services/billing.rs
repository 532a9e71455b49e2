//! Billing service: finalization and bill history

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::domain::{
    Bill, BillBreakdown, BillSummary, DomainResult, NewBill, RepositoryProvider,
};

/// Persists computed bills and serves history queries.
pub struct BillingService {
    repos: Arc<dyn RepositoryProvider>,
}

impl BillingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Persist a computed breakdown as a new bill.
    pub async fn finalize(
        &self,
        user_id: i32,
        address_id: i32,
        breakdown: BillBreakdown,
    ) -> DomainResult<Bill> {
        let bill = self
            .repos
            .bills()
            .create(NewBill {
                user_id,
                address_id,
                created_at: Utc::now(),
                breakdown,
            })
            .await?;

        info!(
            bill_id = bill.id,
            address_id,
            service = bill.breakdown.service_name(),
            total = %bill.breakdown.total_cost(),
            "Bill persisted"
        );

        Ok(bill)
    }

    /// Bill history for one address, newest first.
    pub async fn history(&self, address_id: i32) -> DomainResult<Vec<BillSummary>> {
        self.repos.bills().list_for_address(address_id).await
    }

    pub async fn detail(&self, bill_id: i32) -> DomainResult<Option<Bill>> {
        self.repos.bills().find_by_id(bill_id).await
    }
}
