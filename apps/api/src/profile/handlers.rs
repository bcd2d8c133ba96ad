use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::errors::AppError;
use crate::models::career::{sort_by_match, Career, UserProfile};
use crate::profile::toggle_favorite;
use crate::state::AppState;

/// GET /api/v1/profiles/:user_id
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserProfile>, AppError> {
    let mut profile = state
        .profiles
        .load(&user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No profile for user {user_id}")))?;
    // Careers are kept sorted on every read as well as every write.
    sort_by_match(&mut profile.careers);
    Ok(Json(profile))
}

/// PUT /api/v1/profiles/:user_id
pub async fn handle_put_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(mut profile): Json<UserProfile>,
) -> Result<StatusCode, AppError> {
    profile.answers.validate().map_err(AppError::Validation)?;
    sort_by_match(&mut profile.careers);
    state.profiles.save(&user_id, &profile).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/profiles/:user_id/careers/:index/favorite
pub async fn handle_toggle_favorite(
    State(state): State<AppState>,
    Path((user_id, index)): Path<(String, usize)>,
) -> Result<Json<Career>, AppError> {
    let career = toggle_favorite(state.profiles.as_ref(), &user_id, index).await?;
    Ok(Json(career))
}
