use sqlx::PgPool;

use abi::errors::Result;

mod friend;
mod user;

pub use friend::*;
pub use user::*;

async fn user_exists(pool: &PgPool, id: i64) -> Result<bool> {
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS (SELECT 1 FROM users WHERE id = $1)")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(exists.0)
}
