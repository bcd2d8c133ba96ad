pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::forum;
use crate::generation::handlers as generation;
use crate::jobs::handlers as jobs;
use crate::profile::handlers as profile;
use crate::scholarships;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Assessment and career generation
        .route(
            "/api/v1/assessment",
            post(generation::handle_submit_assessment),
        )
        .route("/api/v1/careers/more", post(generation::handle_more_careers))
        .route(
            "/api/v1/careers/:name/roadmap",
            get(generation::handle_roadmap),
        )
        .route(
            "/api/v1/careers/:name/overview",
            get(generation::handle_overview),
        )
        .route("/api/v1/careers/:name/detail", get(generation::handle_detail))
        // Job search
        .route("/api/v1/jobs", get(jobs::handle_search_jobs))
        // Profiles
        .route(
            "/api/v1/profiles/:user_id",
            get(profile::handle_get_profile).put(profile::handle_put_profile),
        )
        .route(
            "/api/v1/profiles/:user_id/careers/:index/favorite",
            patch(profile::handle_toggle_favorite),
        )
        // Forum
        .route(
            "/api/v1/forum/posts",
            get(forum::handle_list_posts).post(forum::handle_create_post),
        )
        .route(
            "/api/v1/forum/posts/:id/replies",
            post(forum::handle_add_reply),
        )
        // Scholarships
        .route(
            "/api/v1/scholarships",
            get(scholarships::handle_list_scholarships),
        )
        .with_state(state)
}
