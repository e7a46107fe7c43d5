mod friend;
pub mod memory;
pub mod postgres;
mod user;

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing::info;

use abi::config::Config;
use abi::errors::Result;

pub use crate::friend::FriendshipRepo;
pub use crate::user::UserRepo;

/// hold every repository the handlers need
#[derive(Debug, Clone)]
pub struct DbRepo {
    pub user: Arc<dyn UserRepo>,
    pub friendship: Arc<dyn FriendshipRepo>,
}

impl DbRepo {
    pub async fn new(config: &Config) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.db.max_connections)
            .connect(&config.db.url())
            .await?;
        info!(
            "connected to postgres {}:{}/{}",
            config.db.host, config.db.port, config.db.database
        );

        let user = Arc::new(postgres::PostgresUser::new(pool.clone()));
        let friendship = Arc::new(postgres::PostgresFriendship::new(pool));
        Ok(Self { user, friendship })
    }

    /// both repositories share the same in-memory tables
    pub fn memory() -> Self {
        let db = memory::MemoryDb::new();
        Self {
            user: Arc::new(db.clone()),
            friendship: Arc::new(db),
        }
    }
}
