//! Repository provider
//!
//! Unified access to all per-aggregate repositories. Consumers request only
//! the repository they need:
//!
//! ```ignore
//! async fn handle(repos: &dyn RepositoryProvider) {
//!     let user = repos.users().get_or_create(42, "Olena").await?;
//!     let addrs = repos.addresses().list_for_user(user.id).await?;
//! }
//! ```

use super::address::AddressRepository;
use super::bill::BillRepository;
use super::user::UserRepository;

pub trait RepositoryProvider: Send + Sync {
    fn users(&self) -> &dyn UserRepository;
    fn addresses(&self) -> &dyn AddressRepository;
    fn bills(&self) -> &dyn BillRepository;
}
