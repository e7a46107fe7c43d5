use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, warn};

use abi::errors::{Error, Result};
use abi::model::{Edge, FriendProfile, Friendship, FriendshipStatus, Validator};

use crate::friend::FriendshipRepo;

#[derive(Debug, Clone)]
pub struct PostgresFriendship {
    pool: PgPool,
}

impl PostgresFriendship {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// translate constraint violations raised by a racing writer
fn adapt_write_error(err: sqlx::Error, target_user_id: i64) -> Error {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() {
            return Error::request_already_exists();
        }
        if db_err.is_foreign_key_violation() || db_err.is_check_violation() {
            return Error::target_not_found(target_user_id);
        }
    }
    Error::from(err)
}

#[async_trait]
impl FriendshipRepo for PostgresFriendship {
    async fn send_request(&self, caller_id: i64, target_user_id: i64) -> Result<()> {
        let edge = Edge::new(caller_id, target_user_id);
        debug!("send_request: {:?}", edge);
        if edge.is_self() || !super::user_exists(&self.pool, target_user_id).await? {
            return Err(Error::target_not_found(target_user_id));
        }

        // a conflicting row is only reopened when it was declined,
        // otherwise the WHERE filters it out and nothing is returned
        let status: Option<(FriendshipStatus,)> = sqlx::query_as(
            "INSERT INTO friendships (user_id, friend_user_id, status)
             VALUES ($1, $2, $3)
             ON CONFLICT (user_id, friend_user_id)
             DO UPDATE SET status = EXCLUDED.status
             WHERE friendships.status = $4
             RETURNING status",
        )
        .bind(edge.user_id)
        .bind(edge.friend_user_id)
        .bind(FriendshipStatus::Requested)
        .bind(FriendshipStatus::Declined)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| adapt_write_error(err, target_user_id))?;

        if status.is_none() {
            warn!("friendship already exists: {:?}", edge);
            return Err(Error::request_already_exists());
        }
        Ok(())
    }

    async fn accept_request(&self, caller_id: i64, requester_id: i64) -> Result<()> {
        let request = Edge::new(requester_id, caller_id);
        debug!("accept_request: {:?}", request);
        let mut transaction = self.pool.begin().await?;

        // lock both directions in key order, so two users accepting each
        // other at once queue up here instead of deadlocking on the upsert
        sqlx::query(
            "SELECT user_id FROM friendships
             WHERE (user_id, friend_user_id) IN (($1, $2), ($2, $1))
             ORDER BY user_id, friend_user_id
             FOR UPDATE",
        )
        .bind(request.user_id)
        .bind(request.friend_user_id)
        .execute(&mut *transaction)
        .await?;

        let accepted: Option<(i64,)> = sqlx::query_as(
            "UPDATE friendships
             SET status = $3
             WHERE user_id = $1 AND friend_user_id = $2 AND status = $4
             RETURNING user_id",
        )
        .bind(request.user_id)
        .bind(request.friend_user_id)
        .bind(FriendshipStatus::Accepted)
        .bind(FriendshipStatus::Requested)
        .fetch_optional(&mut *transaction)
        .await?;

        if accepted.is_none() {
            warn!("no pending request to accept: {:?}", request);
            return Err(Error::no_pending_request());
        }

        let reverse = request.reversed();
        sqlx::query(
            "INSERT INTO friendships (user_id, friend_user_id, status)
             VALUES ($1, $2, $3)
             ON CONFLICT (user_id, friend_user_id)
             DO UPDATE SET status = EXCLUDED.status",
        )
        .bind(reverse.user_id)
        .bind(reverse.friend_user_id)
        .bind(FriendshipStatus::Accepted)
        .execute(&mut *transaction)
        .await?;

        transaction.commit().await?;
        Ok(())
    }

    async fn decline_request(&self, caller_id: i64, requester_id: i64) -> Result<()> {
        let request = Edge::new(requester_id, caller_id);
        debug!("decline_request: {:?}", request);
        let declined: Option<(i64,)> = sqlx::query_as(
            "UPDATE friendships
             SET status = $3
             WHERE user_id = $1 AND friend_user_id = $2 AND status = $4
             RETURNING user_id",
        )
        .bind(request.user_id)
        .bind(request.friend_user_id)
        .bind(FriendshipStatus::Declined)
        .bind(FriendshipStatus::Requested)
        .fetch_optional(&self.pool)
        .await?;

        if declined.is_none() {
            warn!("no pending request to decline: {:?}", request);
            return Err(Error::no_pending_request());
        }
        Ok(())
    }

    async fn get_friend_profile(
        &self,
        caller_id: i64,
        target_user_id: i64,
    ) -> Result<FriendProfile> {
        debug!("get_friend_profile: {} -> {}", caller_id, target_user_id);
        let profile: Option<FriendProfile> = sqlx::query_as(
            "SELECT u.id, u.full_name, u.phone_number,
                (SELECT COUNT(t.friend_user_id)
                 FROM friendships AS t
                 WHERE t.user_id = u.id AND t.status = $3) AS total_friend_count,
                (SELECT COUNT(f1.friend_user_id)
                 FROM friendships AS f1
                 JOIN friendships AS f2
                 ON f1.friend_user_id = f2.friend_user_id
                 WHERE f1.user_id = $1 AND f2.user_id = $2
                   AND f1.status = $3 AND f2.status = $3) AS mutual_friend_count
             FROM friendships AS f
             JOIN users AS u ON u.id = f.friend_user_id
             WHERE f.user_id = $1 AND f.friend_user_id = $2 AND f.status = $3",
        )
        .bind(caller_id)
        .bind(target_user_id)
        .bind(FriendshipStatus::Accepted)
        .fetch_optional(&self.pool)
        .await?;

        let profile = profile.ok_or_else(Error::not_friends_or_not_found)?;
        profile.validate()?;
        Ok(profile)
    }

    async fn get_edge(&self, edge: Edge) -> Result<Option<Friendship>> {
        let fs = sqlx::query_as(
            "SELECT user_id, friend_user_id, status
             FROM friendships
             WHERE user_id = $1 AND friend_user_id = $2",
        )
        .bind(edge.user_id)
        .bind(edge.friend_user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(fs)
    }
}
