use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// Lifecycle of one directed friendship edge.
///
/// A missing row is the implicit `none` state, so transitions that may start
/// from nothing take an `Option<FriendshipStatus>`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, sqlx::Type)]
#[sqlx(type_name = "friendship_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FriendshipStatus {
    #[default]
    Requested,
    Accepted,
    Declined,
}

impl FriendshipStatus {
    /// `send` on the edge requester -> target
    pub fn after_send(current: Option<Self>) -> Result<Self> {
        match current {
            None | Some(FriendshipStatus::Declined) => Ok(FriendshipStatus::Requested),
            Some(FriendshipStatus::Requested) | Some(FriendshipStatus::Accepted) => {
                Err(Error::request_already_exists())
            }
        }
    }

    /// `accept` on the edge requester -> caller
    pub fn after_accept(self) -> Result<Self> {
        match self {
            FriendshipStatus::Requested => Ok(FriendshipStatus::Accepted),
            _ => Err(Error::no_pending_request()),
        }
    }

    /// `decline` on the edge requester -> caller
    pub fn after_decline(self) -> Result<Self> {
        match self {
            FriendshipStatus::Requested => Ok(FriendshipStatus::Declined),
            _ => Err(Error::no_pending_request()),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FriendshipStatus::Requested => "requested",
            FriendshipStatus::Accepted => "accepted",
            FriendshipStatus::Declined => "declined",
        }
    }
}

impl Display for FriendshipStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FriendshipStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "requested" => Ok(FriendshipStatus::Requested),
            "accepted" => Ok(FriendshipStatus::Accepted),
            "declined" => Ok(FriendshipStatus::Declined),
            _ => Err(Error::bad_request(format!("Invalid friendship status: {s}"))),
        }
    }
}
