use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// user record owned by the user-management side, read only for friendships
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub full_name: String,
    pub phone_number: String,
}

impl User {
    pub fn new(id: i64, full_name: impl Into<String>, phone_number: impl Into<String>) -> Self {
        Self {
            id,
            full_name: full_name.into(),
            phone_number: phone_number.into(),
        }
    }
}
