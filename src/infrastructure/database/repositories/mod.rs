//! SeaORM repository implementations

pub mod address_repository;
pub mod bill_repository;
pub mod repository_provider;
pub mod user_repository;

pub use address_repository::SeaOrmAddressRepository;
pub use bill_repository::SeaOrmBillRepository;
pub use repository_provider::SeaOrmRepositoryProvider;
pub use user_repository::SeaOrmUserRepository;

use crate::domain::DomainError;

pub(crate) fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(format!("Database error: {}", e))
}
