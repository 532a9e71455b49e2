//! SeaORM implementation of UserRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter, Set,
};
use tracing::debug;

use crate::domain::{DomainResult, User, UserRepository};
use crate::infrastructure::database::entities::user;

use super::db_err;

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: user::Model) -> User {
    User {
        id: m.id,
        chat_id: m.chat_id,
        display_name: m.display_name,
        created_at: m.created_at,
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn get_or_create(&self, chat_id: i64, display_name: &str) -> DomainResult<User> {
        let existing = user::Entity::find()
            .filter(user::Column::ChatId.eq(chat_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        if let Some(model) = existing {
            return Ok(model_to_domain(model));
        }

        debug!(chat_id, "Registering new user");
        let model = user::ActiveModel {
            id: NotSet,
            chat_id: Set(chat_id),
            display_name: Set(display_name.to_string()),
            created_at: Set(Utc::now()),
        };
        let inserted = model.insert(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(inserted))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }
}
