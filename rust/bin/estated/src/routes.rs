//! Route registration: module routes plus system endpoints.

use std::any::Any;

use axum::Router;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use estate_core::{Module, ServiceError};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Build the complete router.
///
/// Module routes are merged at the root, so the property module's `/`,
/// `/get/{id}`, ... are served as-is.
pub fn build_router(modules: &[&dyn Module]) -> Router {
    let mut app = Router::new()
        .route("/health", get(health))
        .route("/version", get(version));

    for module in modules {
        info!("Mounting module {}", module.name());
        app = app.merge(module.routes());
    }

    // Wrong method on a known path answers like an unknown path. Applies
    // to the routes registered above, so it must follow the merges.
    app.method_not_allowed_fallback(route_not_found)
        .fallback(route_not_found)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn health() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "status": "ok",
    }))
}

async fn version() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": "estated",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn route_not_found() -> ServiceError {
    ServiceError::NotFound("Route not found".into())
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    ServiceError::Internal(format!("handler panicked: {detail}")).into_response()
}
