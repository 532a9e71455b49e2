//! User domain entity

use chrono::{DateTime, Utc};

/// A user of the assistant, identified by their external chat id.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    /// External chat identity (e.g. messenger user id)
    pub chat_id: i64,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}
