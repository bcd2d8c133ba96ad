mod cache;
mod config;
mod db;
mod errors;
mod forum;
mod gemini;
mod generation;
mod jobs;
mod models;
mod profile;
mod routes;
mod scholarships;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cache::{SystemClock, TtlCache};
use crate::config::Config;
use crate::db::try_create_pool;
use crate::forum::ForumService;
use crate::gemini::GeminiClient;
use crate::generation::CareerGenerator;
use crate::jobs::JobAggregator;
use crate::profile::{FallbackProfileStore, LocalProfileStore, ProfileStore, RemoteProfileStore};
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{DocumentStore, LocalStore, PgDocumentStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Compass API v{}", env!("CARGO_PKG_VERSION"));

    // Remote document store, if PostgreSQL is reachable
    let docs: Option<Arc<dyn DocumentStore>> = try_create_pool(config.database_url.as_deref())
        .await
        .map(|pool| Arc::new(PgDocumentStore::new(pool)) as Arc<dyn DocumentStore>);

    // Local file store is always present and shadows every profile write
    let local = Arc::new(LocalStore::open()?);
    let remote: Option<Arc<dyn ProfileStore>> = docs
        .clone()
        .map(|docs| Arc::new(RemoteProfileStore::new(docs)) as Arc<dyn ProfileStore>);
    let profiles: Arc<dyn ProfileStore> = Arc::new(FallbackProfileStore::new(
        remote,
        Arc::new(LocalProfileStore::new(local)),
    ));

    // Career generation over Gemini, with a TTL cache in front
    let llm = Arc::new(GeminiClient::new(config.gemini_api_key.clone()));
    let cache = TtlCache::new(
        Duration::from_secs(config.cache_ttl_secs),
        Arc::new(SystemClock),
    );
    let generator = Arc::new(CareerGenerator::new(llm, cache));
    info!("Career generator initialized");

    // Job provider cascade
    let jobs = Arc::new(JobAggregator::from_config(&config));

    let forum = Arc::new(ForumService::new(docs));

    let state = AppState {
        generator,
        jobs,
        profiles,
        forum,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
