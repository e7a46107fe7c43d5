pub mod friendship_request_handlers;
pub mod my_friend_handlers;
