//! In-memory repository provider
//!
//! Backs unit tests and local experiments without a database file. Same
//! ordering and retention semantics as the SQLite-backed provider.

use std::sync::atomic::{AtomicI32, AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use crate::domain::{
    Address, AddressRepository, Bill, BillRepository, BillSummary, DomainResult, NewAddress,
    NewBill, RepositoryProvider, User, UserRepository,
};

#[derive(Default)]
struct Store {
    users: DashMap<i32, User>,
    addresses: DashMap<i32, Address>,
    bills: DashMap<i32, Bill>,
    user_seq: AtomicI32,
    address_seq: AtomicI32,
    bill_seq: AtomicI32,
}

impl Store {
    fn next(seq: &AtomicI32) -> i32 {
        seq.fetch_add(1, Ordering::Relaxed) + 1
    }
}

pub struct InMemoryRepositoryProvider {
    users: InMemoryUserRepository,
    addresses: InMemoryAddressRepository,
    bills: InMemoryBillRepository,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        let store = Arc::new(Store::default());
        Self {
            users: InMemoryUserRepository {
                store: store.clone(),
            },
            addresses: InMemoryAddressRepository {
                store: store.clone(),
            },
            bills: InMemoryBillRepository { store },
        }
    }
}

impl Default for InMemoryRepositoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn addresses(&self) -> &dyn AddressRepository {
        &self.addresses
    }

    fn bills(&self) -> &dyn BillRepository {
        &self.bills
    }
}

struct InMemoryUserRepository {
    store: Arc<Store>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get_or_create(&self, chat_id: i64, display_name: &str) -> DomainResult<User> {
        if let Some(existing) = self
            .store
            .users
            .iter()
            .find(|entry| entry.chat_id == chat_id)
        {
            return Ok(existing.clone());
        }
        let user = User {
            id: Store::next(&self.store.user_seq),
            chat_id,
            display_name: display_name.to_string(),
            created_at: Utc::now(),
        };
        self.store.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<User>> {
        Ok(self.store.users.get(&id).map(|u| u.clone()))
    }
}

struct InMemoryAddressRepository {
    store: Arc<Store>,
}

#[async_trait]
impl AddressRepository for InMemoryAddressRepository {
    async fn create(&self, address: NewAddress) -> DomainResult<Address> {
        let stored = Address {
            id: Store::next(&self.store.address_seq),
            user_id: address.user_id,
            city: address.city,
            street: address.street,
            house: address.house,
            entrance: address.entrance,
            floor: address.floor,
            apartment: address.apartment,
        };
        self.store.addresses.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn list_for_user(&self, user_id: i32) -> DomainResult<Vec<Address>> {
        let mut out: Vec<Address> = self
            .store
            .addresses
            .iter()
            .filter(|a| a.user_id == user_id)
            .map(|a| a.clone())
            .collect();
        out.sort_by_key(|a| a.id);
        Ok(out)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Address>> {
        Ok(self.store.addresses.get(&id).map(|a| a.clone()))
    }
}

struct InMemoryBillRepository {
    store: Arc<Store>,
}

#[async_trait]
impl BillRepository for InMemoryBillRepository {
    async fn create(&self, bill: NewBill) -> DomainResult<Bill> {
        let stored = Bill {
            id: Store::next(&self.store.bill_seq),
            user_id: bill.user_id,
            address_id: bill.address_id,
            created_at: bill.created_at,
            breakdown: bill.breakdown,
        };
        self.store.bills.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn list_for_address(&self, address_id: i32) -> DomainResult<Vec<BillSummary>> {
        let mut out: Vec<BillSummary> = self
            .store
            .bills
            .iter()
            .filter(|b| b.address_id == address_id)
            .map(|b| BillSummary {
                id: b.id,
                created_at: b.created_at,
                service: b.breakdown.service_name().to_string(),
                total_cost: b.breakdown.total_cost(),
            })
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(out)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Bill>> {
        Ok(self.store.bills.get(&id).map(|b| b.clone()))
    }

    async fn purge_older_than(&self, cutoff: DateTime<Utc>) -> DomainResult<u64> {
        // Counted inside the retain pass so concurrent inserts do not skew it.
        let purged = AtomicU64::new(0);
        self.store.bills.retain(|_, bill| {
            if bill.created_at < cutoff {
                purged.fetch_add(1, Ordering::Relaxed);
                false
            } else {
                true
            }
        });
        Ok(purged.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TariffTable;

    #[tokio::test]
    async fn get_or_create_is_idempotent_per_chat_id() {
        let repos = InMemoryRepositoryProvider::new();
        let first = repos.users().get_or_create(42, "Olena").await.unwrap();
        let second = repos.users().get_or_create(42, "Olena").await.unwrap();
        assert_eq!(first.id, second.id);
        let other = repos.users().get_or_create(43, "Taras").await.unwrap();
        assert_ne!(first.id, other.id);
    }

    #[tokio::test]
    async fn history_is_newest_first() {
        let repos = InMemoryRepositoryProvider::new();
        let breakdown = TariffTable::default().trash_bill(1, 1).unwrap();
        for days_ago in [30, 10, 20] {
            repos
                .bills()
                .create(NewBill {
                    user_id: 1,
                    address_id: 1,
                    created_at: Utc::now() - chrono::Duration::days(days_ago),
                    breakdown: breakdown.clone(),
                })
                .await
                .unwrap();
        }
        let rows = repos.bills().list_for_address(1).await.unwrap();
        let dates: Vec<_> = rows.iter().map(|r| r.created_at).collect();
        let mut sorted = dates.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(dates, sorted);
    }
}
