mod friend_request_status;
mod friendship;
mod user;

pub use friend_request_status::*;
pub use friendship::*;
pub use user::*;

use crate::errors::Result;

/// check the shape of a record before it leaves the service
pub trait Validator {
    fn validate(&self) -> Result<()>;
}
