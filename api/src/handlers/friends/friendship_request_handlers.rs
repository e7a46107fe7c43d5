use axum::extract::State;

use abi::errors::Error;
use abi::model::FriendshipRequest;
use utils::custom_extract::{AuthUser, JsonExtractor};

use crate::AppState;

// send friendship request to `friend_user_id`
pub async fn send(
    State(app_state): State<AppState>,
    AuthUser(caller_id): AuthUser,
    JsonExtractor(req): JsonExtractor<FriendshipRequest>,
) -> Result<(), Error> {
    app_state
        .db
        .friendship
        .send_request(caller_id, req.friend_user_id)
        .await
}

// accept the request `friend_user_id` sent to the caller
pub async fn accept(
    State(app_state): State<AppState>,
    AuthUser(caller_id): AuthUser,
    JsonExtractor(req): JsonExtractor<FriendshipRequest>,
) -> Result<(), Error> {
    app_state
        .db
        .friendship
        .accept_request(caller_id, req.friend_user_id)
        .await
}

pub async fn decline(
    State(app_state): State<AppState>,
    AuthUser(caller_id): AuthUser,
    JsonExtractor(req): JsonExtractor<FriendshipRequest>,
) -> Result<(), Error> {
    app_state
        .db
        .friendship
        .decline_request(caller_id, req.friend_user_id)
        .await
}
