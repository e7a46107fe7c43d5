use axum::extract::State;
use axum::Json;

use abi::errors::Error;
use abi::model::FriendProfile;
use utils::custom_extract::{AuthUser, PathExtractor};

use crate::AppState;

/// profile of one accepted friend; any other relation reads as not found
pub async fn get_by_id(
    State(app_state): State<AppState>,
    AuthUser(caller_id): AuthUser,
    PathExtractor(friend_user_id): PathExtractor<i64>,
) -> Result<Json<FriendProfile>, Error> {
    let profile = app_state
        .db
        .friendship
        .get_friend_profile(caller_id, friend_user_id)
        .await?;
    Ok(Json(profile))
}
