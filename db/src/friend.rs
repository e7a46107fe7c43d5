use std::fmt::Debug;

use async_trait::async_trait;

use abi::errors::Result;
use abi::model::{Edge, FriendProfile, Friendship};

#[async_trait]
pub trait FriendshipRepo: Send + Sync + Debug {
    /// send friendship request from caller to target;
    /// a declined edge is reopened, any other existing edge is a conflict
    async fn send_request(&self, caller_id: i64, target_user_id: i64) -> Result<()>;

    /// accept the request requester -> caller,
    /// both directions end up accepted
    async fn accept_request(&self, caller_id: i64, requester_id: i64) -> Result<()>;

    /// decline the request requester -> caller, the reverse edge is untouched
    async fn decline_request(&self, caller_id: i64, requester_id: i64) -> Result<()>;

    /// profile of an accepted friend with total and mutual friend counts
    async fn get_friend_profile(&self, caller_id: i64, target_user_id: i64)
        -> Result<FriendProfile>;

    async fn get_edge(&self, edge: Edge) -> Result<Option<Friendship>>;
}
