//! Infrastructure layer: persistence implementations of the domain
//! repository traits.

pub mod database;
pub mod memory;

pub use database::repositories::SeaOrmRepositoryProvider;
pub use database::{init_database, DatabaseConfig};
pub use memory::InMemoryRepositoryProvider;
