use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::{error, info};

use crate::{config::AppConfig, errors::AppError};

pub async fn connect(config: &AppConfig) -> Result<PgPool, AppError> {
    let db = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
        .map_err(|e| {
            error!(error = %e, "connect to database");
            AppError::from(e)
        })?;
    Ok(db)
}

/// Applies the bundled schema in `migrations/`.
pub async fn migrate(db: &PgPool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations")
        .run(db)
        .await
        .map_err(AppError::service)?;
    info!("database schema up to date");
    Ok(())
}
