use std::fmt::Debug;

use async_trait::async_trait;

use abi::errors::Result;
use abi::model::User;

#[async_trait]
pub trait UserRepo: Sync + Send + Debug {
    /// create user, used to seed users owned by the user service
    async fn create_user(&self, user: &User) -> Result<User>;

    /// get user by id
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;

    async fn user_exists(&self, id: i64) -> Result<bool>;
}
