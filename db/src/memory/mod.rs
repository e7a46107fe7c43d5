//! In-memory friendship and user tables, for tests and local development.
//!
//! Every operation holds the table lock for its whole duration, so the
//! check-then-write sequences below are atomic with respect to each other.
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use abi::errors::{Error, Result};
use abi::model::{Edge, FriendProfile, Friendship, FriendshipStatus, User, Validator};

use crate::friend::FriendshipRepo;
use crate::user::UserRepo;

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<i64, User>,
    friendships: HashMap<Edge, FriendshipStatus>,
}

impl Tables {
    fn is_accepted(&self, edge: &Edge) -> bool {
        self.friendships.get(edge) == Some(&FriendshipStatus::Accepted)
    }

    fn accepted_friends(&self, user_id: i64) -> impl Iterator<Item = i64> + '_ {
        self.friendships
            .iter()
            .filter(move |(edge, status)| {
                edge.user_id == user_id && **status == FriendshipStatus::Accepted
            })
            .map(|(edge, _)| edge.friend_user_id)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryDb(Arc<Mutex<Tables>>);

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepo for MemoryDb {
    async fn create_user(&self, user: &User) -> Result<User> {
        let mut tables = self.0.lock().await;
        if tables.users.contains_key(&user.id) {
            return Err(Error::bad_request(format!("user {} already exists", user.id)));
        }
        tables.users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        Ok(self.0.lock().await.users.get(&id).cloned())
    }

    async fn user_exists(&self, id: i64) -> Result<bool> {
        Ok(self.0.lock().await.users.contains_key(&id))
    }
}

#[async_trait]
impl FriendshipRepo for MemoryDb {
    async fn send_request(&self, caller_id: i64, target_user_id: i64) -> Result<()> {
        let edge = Edge::new(caller_id, target_user_id);
        debug!("send_request: {:?}", edge);
        let mut tables = self.0.lock().await;
        if edge.is_self() || !tables.users.contains_key(&target_user_id) {
            return Err(Error::target_not_found(target_user_id));
        }

        let current = tables.friendships.get(&edge).copied();
        let status = FriendshipStatus::after_send(current).inspect_err(|_| {
            warn!("friendship already exists: {:?}", edge);
        })?;
        tables.friendships.insert(edge, status);
        Ok(())
    }

    async fn accept_request(&self, caller_id: i64, requester_id: i64) -> Result<()> {
        let request = Edge::new(requester_id, caller_id);
        debug!("accept_request: {:?}", request);
        let mut tables = self.0.lock().await;
        let status = tables
            .friendships
            .get(&request)
            .copied()
            .ok_or_else(Error::no_pending_request)?
            .after_accept()?;

        tables.friendships.insert(request, status);
        tables
            .friendships
            .insert(request.reversed(), FriendshipStatus::Accepted);
        Ok(())
    }

    async fn decline_request(&self, caller_id: i64, requester_id: i64) -> Result<()> {
        let request = Edge::new(requester_id, caller_id);
        debug!("decline_request: {:?}", request);
        let mut tables = self.0.lock().await;
        let status = tables
            .friendships
            .get(&request)
            .copied()
            .ok_or_else(Error::no_pending_request)?
            .after_decline()?;

        tables.friendships.insert(request, status);
        Ok(())
    }

    async fn get_friend_profile(
        &self,
        caller_id: i64,
        target_user_id: i64,
    ) -> Result<FriendProfile> {
        debug!("get_friend_profile: {} -> {}", caller_id, target_user_id);
        let tables = self.0.lock().await;
        let edge = Edge::new(caller_id, target_user_id);
        let user = match tables.users.get(&target_user_id) {
            Some(user) if tables.is_accepted(&edge) => user,
            _ => return Err(Error::not_friends_or_not_found()),
        };

        let total_friend_count = tables.accepted_friends(target_user_id).count() as i64;
        let mutual_friend_count = tables
            .accepted_friends(caller_id)
            .filter(|friend| tables.is_accepted(&Edge::new(target_user_id, *friend)))
            .count() as i64;

        let profile = FriendProfile {
            id: user.id,
            full_name: user.full_name.clone(),
            phone_number: user.phone_number.clone(),
            total_friend_count,
            mutual_friend_count,
        };
        profile.validate()?;
        Ok(profile)
    }

    async fn get_edge(&self, edge: Edge) -> Result<Option<Friendship>> {
        let tables = self.0.lock().await;
        Ok(tables.friendships.get(&edge).map(|status| Friendship {
            user_id: edge.user_id,
            friend_user_id: edge.friend_user_id,
            status: *status,
        }))
    }
}

#[cfg(test)]
mod tests {
    use abi::errors::ErrorKind;

    use super::*;

    async fn seeded() -> MemoryDb {
        let db = MemoryDb::new();
        for (id, name) in [(1, "Alice"), (2, "Bob"), (3, "Carol"), (4, "Dave")] {
            db.create_user(&User::new(id, name, format!("090000000{id}")))
                .await
                .unwrap();
        }
        db
    }

    async fn status(db: &MemoryDb, user_id: i64, friend_user_id: i64) -> Option<FriendshipStatus> {
        db.get_edge(Edge::new(user_id, friend_user_id))
            .await
            .unwrap()
            .map(|fs| fs.status)
    }

    async fn befriend(db: &MemoryDb, a: i64, b: i64) {
        db.send_request(a, b).await.unwrap();
        db.accept_request(b, a).await.unwrap();
    }

    #[tokio::test]
    async fn send_should_create_exactly_one_requested_edge() {
        let db = seeded().await;
        db.send_request(1, 2).await.unwrap();
        assert_eq!(status(&db, 1, 2).await, Some(FriendshipStatus::Requested));
        assert_eq!(status(&db, 2, 1).await, None);
        assert_eq!(db.0.lock().await.friendships.len(), 1);
    }

    #[tokio::test]
    async fn send_twice_should_conflict() {
        let db = seeded().await;
        db.send_request(1, 2).await.unwrap();
        let err = db.send_request(1, 2).await.unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::RequestAlreadyExists);

        befriend(&db, 3, 4).await;
        let err = db.send_request(3, 4).await.unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::RequestAlreadyExists);
    }

    #[tokio::test]
    async fn send_to_missing_or_self_should_fail() {
        let db = seeded().await;
        let err = db.send_request(1, 99).await.unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::TargetNotFound);
        let err = db.send_request(1, 1).await.unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::TargetNotFound);
    }

    #[tokio::test]
    async fn send_after_decline_should_reopen_request() {
        let db = seeded().await;
        db.send_request(1, 2).await.unwrap();
        db.decline_request(2, 1).await.unwrap();
        assert_eq!(status(&db, 1, 2).await, Some(FriendshipStatus::Declined));

        db.send_request(1, 2).await.unwrap();
        assert_eq!(status(&db, 1, 2).await, Some(FriendshipStatus::Requested));
        assert_eq!(db.0.lock().await.friendships.len(), 1);
    }

    #[tokio::test]
    async fn accept_should_make_both_directions_accepted() {
        let db = seeded().await;
        db.send_request(1, 2).await.unwrap();
        db.accept_request(2, 1).await.unwrap();
        assert_eq!(status(&db, 1, 2).await, Some(FriendshipStatus::Accepted));
        assert_eq!(status(&db, 2, 1).await, Some(FriendshipStatus::Accepted));
    }

    #[tokio::test]
    async fn accept_should_overwrite_existing_reverse_edge() {
        let db = seeded().await;
        db.send_request(2, 1).await.unwrap();
        db.send_request(1, 2).await.unwrap();
        db.accept_request(2, 1).await.unwrap();
        assert_eq!(status(&db, 1, 2).await, Some(FriendshipStatus::Accepted));
        assert_eq!(status(&db, 2, 1).await, Some(FriendshipStatus::Accepted));
    }

    #[tokio::test]
    async fn answer_without_pending_request_should_fail() {
        let db = seeded().await;
        let err = db.accept_request(2, 1).await.unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::NoPendingRequest);
        let err = db.decline_request(2, 1).await.unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::NoPendingRequest);

        // the requester can not answer its own request
        db.send_request(1, 2).await.unwrap();
        let err = db.accept_request(1, 2).await.unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::NoPendingRequest);

        db.decline_request(2, 1).await.unwrap();
        let err = db.decline_request(2, 1).await.unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::NoPendingRequest);
    }

    #[tokio::test]
    async fn decline_should_leave_reverse_edge_untouched() {
        let db = seeded().await;
        db.send_request(2, 1).await.unwrap();
        db.send_request(1, 2).await.unwrap();
        db.decline_request(2, 1).await.unwrap();
        assert_eq!(status(&db, 1, 2).await, Some(FriendshipStatus::Declined));
        assert_eq!(status(&db, 2, 1).await, Some(FriendshipStatus::Requested));
    }

    #[tokio::test]
    async fn profile_should_count_mutual_and_total_friends() {
        let db = seeded().await;
        befriend(&db, 1, 2).await;
        befriend(&db, 3, 1).await;
        befriend(&db, 3, 2).await;
        befriend(&db, 2, 4).await;
        // pending and declined edges are not friends
        db.send_request(4, 1).await.unwrap();

        let profile = db.get_friend_profile(1, 2).await.unwrap();
        assert_eq!(
            profile,
            FriendProfile {
                id: 2,
                full_name: "Bob".to_string(),
                phone_number: "0900000002".to_string(),
                total_friend_count: 3,
                mutual_friend_count: 1,
            }
        );

        let profile = db.get_friend_profile(2, 1).await.unwrap();
        assert_eq!(profile.total_friend_count, 2);
        assert_eq!(profile.mutual_friend_count, 1);
    }

    #[tokio::test]
    async fn profile_without_accepted_edge_should_be_not_found() {
        let db = seeded().await;
        let err = db.get_friend_profile(1, 2).await.unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::NotFriendsOrNotFound);

        db.send_request(1, 2).await.unwrap();
        let err = db.get_friend_profile(1, 2).await.unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::NotFriendsOrNotFound);

        let err = db.get_friend_profile(1, 99).await.unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::NotFriendsOrNotFound);
    }

    #[tokio::test]
    async fn profile_with_blank_name_should_be_invalid() {
        let db = MemoryDb::new();
        db.create_user(&User::new(1, "Alice", "0900000001"))
            .await
            .unwrap();
        db.create_user(&User::new(2, "", "0900000002")).await.unwrap();
        befriend(&db, 1, 2).await;
        let err = db.get_friend_profile(1, 2).await.unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidProfile);
    }

    #[tokio::test]
    async fn concurrent_sends_should_leave_one_request() {
        let db = seeded().await;
        let (first, second) = tokio::join!(db.send_request(1, 2), db.send_request(1, 2));
        assert!(first.is_ok() ^ second.is_ok());
        assert_eq!(status(&db, 1, 2).await, Some(FriendshipStatus::Requested));
    }
}
