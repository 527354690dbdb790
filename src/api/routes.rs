use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tower::ServiceBuilder;
use axum::extract::DefaultBodyLimit;

use super::handlers::*;
use super::AppState;

/// Largest accepted form body. Report text itself is not validated; this only
/// bounds what a single request may buffer.
pub const REPORT_BODY_LIMIT: usize = 16 * 1024 * 1024;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/report", post(submit_report))
        .route("/report/rating", post(rate_report))
        .route("/api/poles", get(list_poles))
        .route("/api/sos", get(list_sos))
        .route("/api/reports", get(list_reports))
        .route("/api/reports.csv", get(download_reports))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(REPORT_BODY_LIMIT))
                .layer(CorsLayer::permissive())
        )
        .with_state(state)
}
