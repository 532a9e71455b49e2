//! Domain layer: entities, tariffs, calculators and repository traits.

pub mod address;
pub mod bill;
pub mod billing;
pub mod error;
pub mod repositories;
pub mod tariff;
pub mod user;

pub use address::{Address, AddressRepository, NewAddress};
pub use bill::{Bill, BillRepository, BillSummary, NewBill};
pub use billing::{BillBreakdown, ZoneReading};
pub use error::{DomainError, DomainResult};
pub use repositories::RepositoryProvider;
pub use tariff::TariffTable;
pub use user::{User, UserRepository};
