use std::sync::Arc;

use anyhow::Context;
use sqlx::PgPool;

use crate::auth::throttle::LoginThrottle;
use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<AppConfig>,
    pub throttle: Arc<LoginThrottle>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let db = sqlx::postgres::PgPoolOptions::new()
            .max_connections(10)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;

        Ok(Self {
            db,
            config,
            throttle: Arc::new(LoginThrottle::new()),
        })
    }

}
