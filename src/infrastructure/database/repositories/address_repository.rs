//! SeaORM implementation of AddressRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};

use crate::domain::{Address, AddressRepository, DomainResult, NewAddress};
use crate::infrastructure::database::entities::address;

use super::db_err;

pub struct SeaOrmAddressRepository {
    db: DatabaseConnection,
}

impl SeaOrmAddressRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: address::Model) -> Address {
    Address {
        id: m.id,
        user_id: m.user_id,
        city: m.city,
        street: m.street,
        house: m.house,
        entrance: m.entrance,
        floor: m.floor,
        apartment: m.apartment,
    }
}

#[async_trait]
impl AddressRepository for SeaOrmAddressRepository {
    async fn create(&self, address: NewAddress) -> DomainResult<Address> {
        let model = address::ActiveModel {
            id: NotSet,
            user_id: Set(address.user_id),
            city: Set(address.city),
            street: Set(address.street),
            house: Set(address.house),
            entrance: Set(address.entrance),
            floor: Set(address.floor),
            apartment: Set(address.apartment),
        };
        let inserted = model.insert(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(inserted))
    }

    async fn list_for_user(&self, user_id: i32) -> DomainResult<Vec<Address>> {
        let models = address::Entity::find()
            .filter(address::Column::UserId.eq(user_id))
            .order_by_asc(address::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Address>> {
        let model = address::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }
}
