//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::address::AddressRepository;
use crate::domain::bill::BillRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::user::UserRepository;

use super::address_repository::SeaOrmAddressRepository;
use super::bill_repository::SeaOrmBillRepository;
use super::user_repository::SeaOrmUserRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let user = repos.users().get_or_create(42, "Olena").await?;
/// let bills = repos.bills().list_for_address(1).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    users: SeaOrmUserRepository,
    addresses: SeaOrmAddressRepository,
    bills: SeaOrmBillRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: SeaOrmUserRepository::new(db.clone()),
            addresses: SeaOrmAddressRepository::new(db.clone()),
            bills: SeaOrmBillRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
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
