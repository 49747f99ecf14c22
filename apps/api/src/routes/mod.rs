pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::intake::handlers as intake;
use crate::intake::MAX_UPLOAD_BYTES;
use crate::interviews::handlers as interviews;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Intake
        .route(
            "/api/v1/uploads",
            post(intake::handle_upload).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + 16 * 1024)),
        )
        // Analysis pipelines
        .route("/api/v1/analysis/cv", post(analysis::handle_analyze_cv))
        .route(
            "/api/v1/analysis/feedback",
            post(analysis::handle_analyze_feedback),
        )
        // Interview sessions
        .route(
            "/api/v1/interviews",
            post(interviews::handle_create_interview).get(interviews::handle_list_interviews),
        )
        .route(
            "/api/v1/interviews/:id",
            get(interviews::handle_get_interview),
        )
        .route(
            "/api/v1/interviews/:id/answers",
            post(interviews::handle_record_answer),
        )
        .route(
            "/api/v1/interviews/:id/complete",
            post(interviews::handle_complete_interview),
        )
        .with_state(state)
}
