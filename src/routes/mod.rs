pub mod health;
pub mod process;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::services::AppState;

/// Maximum accepted upload size (the PDF dominates the form)
const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

pub fn create_router(state: AppState, metrics_router: Router) -> Router {
    let api_routes = Router::new()
        .route("/process", post(process::process_document))
        .route("/health", get(health::health_check))
        .with_state(state);

    api_routes
        .merge(metrics_router)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}
