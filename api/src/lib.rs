use axum::extract::FromRef;

use abi::config::Config;
use abi::errors::Result;
use db::DbRepo;
use utils::custom_extract::JwtSecret;

pub(crate) mod handlers;
pub(crate) mod routes;

pub use routes::app_routes;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: DbRepo,
    pub jwt_secret: JwtSecret,
}

impl AppState {
    pub async fn new(config: &Config) -> Result<Self> {
        Ok(Self::with_db(
            DbRepo::new(config).await?,
            config.server.jwt_secret.clone(),
        ))
    }

    pub fn with_db(db: DbRepo, jwt_secret: impl Into<String>) -> Self {
        Self {
            db,
            jwt_secret: JwtSecret(jwt_secret.into()),
        }
    }
}

impl FromRef<AppState> for JwtSecret {
    fn from_ref(state: &AppState) -> Self {
        state.jwt_secret.clone()
    }
}

pub async fn start(config: Config) -> Result<()> {
    let state = AppState::new(&config).await?;
    let app = app_routes(state);
    let listener = tokio::net::TcpListener::bind(&config.server.server_url()).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
