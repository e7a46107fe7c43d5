use async_trait::async_trait;
use sqlx::PgPool;

use abi::errors::Result;
use abi::model::User;

use crate::user::UserRepo;

#[derive(Debug)]
pub struct PostgresUser {
    pool: PgPool,
}

impl PostgresUser {
    pub fn new(pool: PgPool) -> Self {
        PostgresUser { pool }
    }
}

#[async_trait]
impl UserRepo for PostgresUser {
    async fn create_user(&self, user: &User) -> Result<User> {
        let user = sqlx::query_as(
            "INSERT INTO users (id, full_name, phone_number)
             VALUES ($1, $2, $3)
             RETURNING id, full_name, phone_number",
        )
        .bind(user.id)
        .bind(&user.full_name)
        .bind(&user.phone_number)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as("SELECT id, full_name, phone_number FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn user_exists(&self, id: i64) -> Result<bool> {
        super::user_exists(&self.pool, id).await
    }
}

#[cfg(test)]
mod tests {
    use abi::config::Config;
    use utils::sqlx_tester::TestDb;

    use super::*;

    #[tokio::test]
    #[ignore = "needs a running postgres configured in config.yml"]
    async fn create_and_get_user_should_work() {
        let config = Config::load("../config.yml").unwrap();
        let tdb = TestDb::new(&config.db, "../migrations");
        let repo = PostgresUser::new(tdb.pool().await);
        let user = User::new(1, "Alice", "0900000001");
        assert_eq!(repo.create_user(&user).await.unwrap(), user);
        assert_eq!(repo.get_user_by_id(1).await.unwrap(), Some(user));
        assert!(repo.user_exists(1).await.unwrap());
        assert!(!repo.user_exists(2).await.unwrap());
    }
}
