pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::careers::handlers as careers;
use crate::cv::handlers as cv;
use crate::email::handlers as email;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        // Careers API
        .route("/api/v1/careers/catalog", get(careers::handle_get_catalog))
        .route("/api/v1/careers/catalog/:id", get(careers::handle_get_career))
        .route("/api/v1/careers/match", post(careers::handle_match))
        .route(
            "/api/v1/careers/assessments",
            get(careers::handle_list_assessments),
        )
        // CV API
        .route("/api/v1/cv/analyze", post(cv::handle_analyze))
        .route(
            "/api/v1/cv/upload",
            post(cv::handle_upload).layer(upload_limit),
        )
        .route("/api/v1/cv/documents", get(cv::handle_list_documents))
        // Admin
        .route(
            "/api/v1/admin/email-campaigns",
            get(email::handle_list_campaigns).post(email::handle_send_campaign),
        )
        .route(
            "/api/v1/admin/email-campaigns/test",
            post(email::handle_send_test_email),
        )
        .with_state(state)
}
