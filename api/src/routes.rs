use axum::routing::{get, post};
use axum::Router;

use crate::handlers::friends::friendship_request_handlers::{accept, decline, send};
use crate::handlers::friends::my_friend_handlers::get_by_id;
use crate::AppState;

pub fn app_routes(state: AppState) -> Router {
    Router::new()
        .nest("/friendship-request", friendship_request_routes())
        .nest("/my-friend", my_friend_routes())
        .with_state(state)
}

fn friendship_request_routes() -> Router<AppState> {
    Router::new()
        .route("/send", post(send))
        .route("/accept", post(accept))
        .route("/decline", post(decline))
}

fn my_friend_routes() -> Router<AppState> {
    Router::new().route("/:friend_user_id", get(get_by_id))
}
