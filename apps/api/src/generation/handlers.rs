use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::generation::Roadmap;
use crate::models::career::{find_career, sort_by_match, AssessmentAnswers, Career, UserProfile};
use crate::profile::append_careers;
use crate::state::AppState;

fn default_count() -> usize {
    5
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRequest {
    pub user_id: String,
    pub answers: AssessmentAnswers,
    #[serde(default = "default_count")]
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct AssessmentResponse {
    pub careers: Vec<Career>,
}

/// POST /api/v1/assessment
///
/// The full pipeline: validate answers, generate ranked matches, persist
/// the profile through the dual-backend store, return the sorted list.
pub async fn handle_submit_assessment(
    State(state): State<AppState>,
    Json(request): Json<AssessmentRequest>,
) -> Result<Json<AssessmentResponse>, AppError> {
    request.answers.validate().map_err(AppError::Validation)?;

    let mut careers = state
        .generator
        .generate_career_matches(&request.answers, request.count)
        .await;
    sort_by_match(&mut careers);

    let profile = UserProfile {
        answers: request.answers,
        careers: careers.clone(),
    };
    state.profiles.save(&request.user_id, &profile).await?;
    info!(
        "Stored {} career matches for user {}",
        careers.len(),
        request.user_id
    );

    Ok(Json(AssessmentResponse { careers }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoreCareersRequest {
    pub user_id: String,
    #[serde(default = "default_count")]
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct MoreCareersResponse {
    pub added: usize,
    pub careers: Vec<Career>,
}

/// POST /api/v1/careers/more
///
/// Unlike the initial assessment this surfaces generation failures to the
/// caller: the existing list stays untouched and the UI can tell "upstream
/// failed" from "no new careers available" (`added == 0`).
pub async fn handle_more_careers(
    State(state): State<AppState>,
    Json(request): Json<MoreCareersRequest>,
) -> Result<Json<MoreCareersResponse>, AppError> {
    let profile = state
        .profiles
        .load(&request.user_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound("No assessment on file. Take the assessment first.".to_string())
        })?;

    let exclude: Vec<String> = profile.careers.iter().map(|c| c.name.clone()).collect();
    let additions = state
        .generator
        .generate_additional_career_matches(&profile.answers, &exclude, request.count)
        .await
        .map_err(|e| AppError::Upstream(format!("Could not generate additional careers: {e}")))?;

    let added = additions.len();
    let careers = append_careers(state.profiles.as_ref(), &request.user_id, additions).await?;
    Ok(Json(MoreCareersResponse { added, careers }))
}

/// GET /api/v1/careers/:name/roadmap
pub async fn handle_roadmap(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Roadmap>, AppError> {
    Ok(Json(state.generator.generate_career_roadmap(&name).await))
}

#[derive(Debug, Serialize)]
pub struct OverviewResponse {
    pub career: String,
    pub overview: String,
}

/// GET /api/v1/careers/:name/overview
pub async fn handle_overview(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<OverviewResponse>, AppError> {
    let overview = state.generator.generate_career_overview(&name).await;
    Ok(Json(OverviewResponse {
        career: name,
        overview,
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailQuery {
    /// When given, the path name is canonicalized against this user's
    /// stored matches (exact, then case-insensitive, then substring) and
    /// the matched entry is echoed back alongside the generated content.
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CareerDetailResponse {
    pub career: String,
    pub overview: String,
    pub roadmap: Roadmap,
    #[serde(rename = "match", skip_serializing_if = "Option::is_none")]
    pub matched: Option<Career>,
}

/// GET /api/v1/careers/:name/detail
///
/// Overview and roadmap are independent reads; they are issued
/// concurrently and joined to bound total latency.
pub async fn handle_detail(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(params): Query<DetailQuery>,
) -> Result<Json<CareerDetailResponse>, AppError> {
    let matched = match &params.user_id {
        Some(user_id) => state
            .profiles
            .load(user_id)
            .await?
            .as_ref()
            .and_then(|profile| find_career(&profile.careers, &name))
            .cloned(),
        None => None,
    };
    let name = matched
        .as_ref()
        .map(|c| c.name.clone())
        .unwrap_or(name);

    let (overview, roadmap) = tokio::join!(
        state.generator.generate_career_overview(&name),
        state.generator.generate_career_roadmap(&name),
    );
    Ok(Json(CareerDetailResponse {
        career: name,
        overview,
        roadmap,
        matched,
    }))
}
