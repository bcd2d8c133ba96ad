use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{info, warn};

use crate::store::PgDocumentStore;

/// Connects to PostgreSQL if a URL is configured and the server is
/// reachable. Returns `None` otherwise; callers fall back to
/// local-only persistence.
pub async fn try_create_pool(database_url: Option<&str>) -> Option<PgPool> {
    let url = match database_url {
        Some(url) => url,
        None => {
            warn!("DATABASE_URL not set, running with local persistence only");
            return None;
        }
    };

    info!("Connecting to PostgreSQL...");
    let pool = match PgPoolOptions::new().max_connections(10).connect(url).await {
        Ok(pool) => pool,
        Err(e) => {
            warn!("PostgreSQL unavailable ({e}), running with local persistence only");
            return None;
        }
    };

    if let Err(e) = PgDocumentStore::ensure_schema(&pool).await {
        warn!("Failed to prepare document schema ({e}), running with local persistence only");
        return None;
    }

    info!("PostgreSQL connection pool established");
    Some(pool)
}
