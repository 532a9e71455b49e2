//! Address repository interface

use async_trait::async_trait;

use super::model::{Address, NewAddress};
use crate::domain::DomainResult;

#[async_trait]
pub trait AddressRepository: Send + Sync {
    async fn create(&self, address: NewAddress) -> DomainResult<Address>;
    async fn list_for_user(&self, user_id: i32) -> DomainResult<Vec<Address>>;
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Address>>;
}
