use std::sync::Arc;

use crate::config::Config;
use crate::forum::ForumService;
use crate::generation::CareerGenerator;
use crate::jobs::JobAggregator;
use crate::profile::ProfileStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<CareerGenerator>,
    pub jobs: Arc<JobAggregator>,
    /// Dual-backend store: remote document store when configured,
    /// always shadowed by the local file store.
    pub profiles: Arc<dyn ProfileStore>,
    pub forum: Arc<ForumService>,
    pub config: Config,
}
