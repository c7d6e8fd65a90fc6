use crate::error::DbError;
use configuration::DatabaseSettings;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

/// Opens a connection pool to the SQLite record store.
///
/// The store file is created if it does not exist yet. Connections are never
/// recycled for idleness or age, which keeps a `sqlite::memory:` store alive
/// for the lifetime of the pool.
pub async fn connect(settings: &DatabaseSettings) -> Result<SqlitePool, DbError> {
    let options = SqliteConnectOptions::from_str(&settings.url)
        .map_err(|e| DbError::ConnectionConfigError(format!("invalid database url '{}': {}", settings.url, e)))?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(None::<Duration>)
        .max_lifetime(None::<Duration>)
        .connect_with(options)
        .await?;

    tracing::debug!(url = %settings.url, max_connections = settings.max_connections, "Connected to record store.");
    Ok(pool)
}

/// Applies the embedded schema. Safe to call on every start.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), DbError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
