//! Axum router configuration with middleware.
//!
//! All routes are under `/api/v1/`. Middleware: CORS, tracing.
//!
//! The static chat/sessions/settings pages are served from `web/`
//! (configurable via `CONFAB_WEB_DIR`). API routes take priority; unknown
//! paths fall through to the directory's `index.html`. If the directory
//! does not exist, only the API is served.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Chat dispatch
        .route("/chat", post(handlers::chat::chat))
        // Session browser
        .route(
            "/actors/{actor_id}/sessions",
            get(handlers::session::list_sessions),
        )
        .route(
            "/actors/{actor_id}/sessions/{session_id}/transcript",
            get(handlers::session::get_transcript),
        )
        // Settings & diagnostics
        .route("/settings", get(handlers::settings::get_settings))
        .route(
            "/settings/test-runtime",
            post(handlers::settings::test_runtime),
        )
        .route(
            "/settings/test-memory",
            post(handlers::settings::test_memory),
        );

    let mut router = Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Serve the static pages from disk if the directory exists. API routes
    // and /health take priority; unknown paths fall through to index.html.
    let web_dir = std::env::var("CONFAB_WEB_DIR").unwrap_or_else(|_| "web".to_string());
    if std::path::Path::new(&web_dir).exists() {
        let index_path = format!("{}/index.html", web_dir);
        let serve_dir = ServeDir::new(&web_dir).fallback(ServeFile::new(index_path));
        router = router.fallback_service(serve_dir);
        tracing::info!(path = %web_dir, "Static page serving enabled");
    }

    router
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
