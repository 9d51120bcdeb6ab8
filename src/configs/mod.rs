use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::{ENV, api::error};

pub async fn connect_database() -> Result<PgPool, error::SystemError> {
    let database_url = &ENV.database_url;
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .min_connections(1)
        .acquire_slow_threshold(std::time::Duration::from_secs(3))
        .connect(database_url)
        .await?;
    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), error::SystemError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    log::info!("Database migrations applied");
    Ok(())
}

/// Signing material for access tokens.
#[derive(Clone)]
pub struct TokenConfig {
    pub secret: String,
    pub expiration: u64,
}

impl TokenConfig {
    pub fn from_env() -> Self {
        TokenConfig { secret: ENV.jwt_secret.clone(), expiration: ENV.access_token_expiration }
    }
}
