use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::errors::{Error, Result};
use crate::model::{FriendshipStatus, Validator};

/// One ordered pair `user_id -> friend_user_id`.
///
/// Friendship is undirected but stored as two directed rows, every
/// transition that touches both goes through `reversed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub user_id: i64,
    pub friend_user_id: i64,
}

impl Edge {
    pub fn new(user_id: i64, friend_user_id: i64) -> Self {
        Self {
            user_id,
            friend_user_id,
        }
    }

    pub fn reversed(&self) -> Self {
        Self {
            user_id: self.friend_user_id,
            friend_user_id: self.user_id,
        }
    }

    pub fn is_self(&self) -> bool {
        self.user_id == self.friend_user_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Friendship {
    pub user_id: i64,
    pub friend_user_id: i64,
    pub status: FriendshipStatus,
}

/// body of send/accept/decline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendshipRequest {
    pub friend_user_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FriendProfile {
    pub id: i64,
    pub full_name: String,
    pub phone_number: String,
    pub total_friend_count: i64,
    pub mutual_friend_count: i64,
}

impl Validator for FriendProfile {
    fn validate(&self) -> Result<()> {
        if self.id <= 0 {
            return Err(Error::invalid_profile(format!("invalid id {}", self.id)));
        }
        if self.full_name.trim().is_empty() {
            return Err(Error::invalid_profile("full name is empty"));
        }
        if self.phone_number.trim().is_empty() {
            return Err(Error::invalid_profile("phone number is empty"));
        }
        if self.total_friend_count < 0 || self.mutual_friend_count < 0 {
            return Err(Error::invalid_profile("negative friend count"));
        }
        Ok(())
    }
}
