use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::job::JobSearchResult;
use crate::state::AppState;

fn default_page() -> usize {
    1
}

#[derive(Debug, Deserialize)]
pub struct JobsQuery {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub location: String,
    #[serde(default = "default_page")]
    pub page: usize,
}

/// GET /api/v1/jobs
///
/// Rejects a search with neither query nor location; a blank side defaults
/// the way the original search form does.
pub async fn handle_search_jobs(
    State(state): State<AppState>,
    Query(params): Query<JobsQuery>,
) -> Result<Json<JobSearchResult>, AppError> {
    let query = params.query.trim();
    let location = params.location.trim();

    if query.is_empty() && location.is_empty() {
        return Err(AppError::Validation(
            "Please enter a job title or location to search".to_string(),
        ));
    }

    let query = if query.is_empty() { "entry level" } else { query };
    let location = if location.is_empty() {
        "New York"
    } else {
        location
    };

    let result = state.jobs.search(query, location, params.page).await;
    Ok(Json(result))
}
