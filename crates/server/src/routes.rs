use std::sync::Arc;

use axum::{
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;
use service::registry::ClassRegistry;

pub mod classes;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router around one registry handle.
pub fn build_router(registry: Arc<ClassRegistry>, cors: CorsLayer) -> Router {
    // /api/classes/search must stay a static segment next to /:id; axum
    // resolves static segments before captures.
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/classes",
            get(classes::list_classes).post(classes::create_class),
        )
        .route("/api/classes/search", get(classes::search_classes))
        .route(
            "/api/classes/:id",
            get(classes::get_class)
                .put(classes::update_class)
                .delete(classes::delete_class),
        )
        .with_state(registry)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
