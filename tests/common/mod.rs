use campuslink::{config::DatabaseConfig, db};
use sqlx::SqlitePool;

/// Fresh in-memory database with the real migrations applied. One
/// connection, because every `:memory:` connection is its own database.
pub async fn test_pool() -> anyhow::Result<SqlitePool> {
    db::connect(&DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
    })
    .await
}
