use anyhow::Result;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

/// Pool sizing and timeout settings.
///
/// Every persistence call in the service goes through this pool, so the
/// acquire and statement timeouts together bound how long any request can
/// block on storage.
#[derive(Debug, Clone)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    pub statement_timeout_ms: u64,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 10,
            acquire_timeout_secs: 5,
            statement_timeout_ms: 5_000,
        }
    }
}

/// Create a PostgreSQL connection pool with bounded timeouts
pub async fn create_pool(database_url: &str, settings: &PoolSettings) -> Result<PgPool> {
    let statement_timeout = format!("SET statement_timeout = {}", settings.statement_timeout_ms);
    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs))
        .after_connect(move |conn, _meta| {
            let statement_timeout = statement_timeout.clone();
            Box::pin(async move {
                sqlx::query(&statement_timeout).execute(conn).await?;
                Ok(())
            })
        })
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Run database migrations
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
