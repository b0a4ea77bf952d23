pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::documents::handlers as documents;
use crate::matching::handlers as matching;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Intake
        .route("/parse-resume", post(documents::handle_parse_resume))
        .route("/analyze-jd", post(documents::handle_analyze_jd))
        .route("/resumes/:id", get(documents::handle_get_resume))
        .route(
            "/job-descriptions/:id",
            get(documents::handle_get_job_description),
        )
        // Matching
        .route("/match", post(matching::handle_match))
        .route("/match-scores", get(matching::handle_list_match_scores))
        .with_state(state)
}
