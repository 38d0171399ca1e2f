use crate::error::DbError;
use configuration::DatabaseSettings;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

/// Establishes a connection pool to the SQLite database.
///
/// Foreign-key enforcement is switched on for every connection. An in-memory
/// database is pinned to a single connection that never expires, otherwise
/// each new connection would see a fresh, empty database.
pub async fn connect(settings: &DatabaseSettings) -> Result<SqlitePool, DbError> {
    let options = SqliteConnectOptions::from_str(&settings.url)
        .map_err(|e| DbError::ConnectionConfigError(format!("{}: {e}", settings.url)))?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool_options = SqlitePoolOptions::new().acquire_timeout(settings.acquire_timeout());
    let pool_options = if settings.is_in_memory() {
        pool_options
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        pool_options.max_connections(settings.max_connections)
    };

    let pool = pool_options.connect_with(options).await?;
    tracing::debug!(url = %settings.url, "Database pool established.");

    Ok(pool)
}

/// Applies the embedded migrations in `./migrations`, bringing the schema up to date.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), DbError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
