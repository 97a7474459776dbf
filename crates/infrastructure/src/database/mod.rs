mod container_repository;
mod weighing_store;

pub mod entities;

use anyhow::Context;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tracing::{info, warn};

pub use container_repository::SeaOrmContainerRepository;
pub use weighing_store::SeaOrmWeighingStore;

/// Pool size actually used for `url`.
///
/// SQLite is single-writer: a second pooled connection would race the first
/// for the write lock and lose with `SQLITE_BUSY`, so the pool is pinned to one
/// connection and transactions queue on it.
pub fn pool_size(url: &str, max_connections: u32) -> u32 {
    if url.starts_with("sqlite:") { 1 } else { max_connections.max(1) }
}

/// Opens the connection pool
pub async fn connect(url: &str, max_connections: u32) -> anyhow::Result<DatabaseConnection> {
    let pool = pool_size(url, max_connections);
    if pool != max_connections {
        warn!(configured = max_connections, used = pool, "Pool size adjusted for backend");
    }

    let mut options = ConnectOptions::new(url.to_owned());
    options.max_connections(pool).sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .context("Failed to connect to database")?;
    info!(backend = ?db.get_database_backend(), max_connections = pool, "Database connected");
    Ok(db)
}
