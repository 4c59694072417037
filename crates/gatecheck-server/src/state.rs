use crate::config::ServerConfig;
use sqlx::PgPool;
use std::sync::Arc;

/// Shared application state.
///
/// The pool is the only persistence handle in the process; it is created
/// at startup and passed down explicitly -- no component reaches for a
/// global connection.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Create a new app state
    pub fn new(pool: PgPool, config: ServerConfig) -> Self {
        Self {
            pool,
            config: Arc::new(config),
        }
    }
}
