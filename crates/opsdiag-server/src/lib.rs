pub mod error;
pub mod routes;
pub mod state;

use axum::routing::get;
use axum::Router;
use std::path::PathBuf;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the axum Router with all API routes and middleware.
/// Used by `serve()` and available for integration testing.
pub fn build_router(root: PathBuf) -> Router {
    build_router_with(state::AppState::new(root))
}

pub fn build_router_with(app_state: state::AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(routes::health::health))
        // Assessment
        .route("/api/assessment", get(routes::assessment::get_assessment))
        // Roadmap
        .route("/api/roadmap", get(routes::roadmap::get_roadmap))
        .route("/api/roadmap/rollup", get(routes::roadmap::get_rollup))
        .route("/api/ranking", get(routes::ranking::get_ranking))
        // Feedback
        .route(
            "/api/feedback",
            get(routes::feedback::list_feedback).post(routes::feedback::submit_feedback),
        )
        .route("/api/feedback/{id}", get(routes::feedback::get_feedback))
        // Registry
        .route("/api/diagnostics", get(routes::diagnostics::list_diagnostics))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// Start the diagnostics API server.
///
/// `document` overrides the configured document sources for every request.
pub async fn serve(
    root: PathBuf,
    document: Option<PathBuf>,
    port: u16,
    open_browser: bool,
) -> anyhow::Result<()> {
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    serve_on(root, document, listener, open_browser).await
}

/// Start the server on a pre-bound listener, so callers can bind port 0 and
/// read back the port the OS picked.
pub async fn serve_on(
    root: PathBuf,
    document: Option<PathBuf>,
    listener: tokio::net::TcpListener,
    open_browser: bool,
) -> anyhow::Result<()> {
    let actual_port = listener.local_addr()?.port();
    let app = build_router_with(state::AppState::new(root).with_document(document));

    tracing::info!("opsdiag server listening on http://localhost:{actual_port}");

    if open_browser {
        let url = format!("http://localhost:{actual_port}/api/roadmap");
        let _ = open::that(&url);
    }

    axum::serve(listener, app).await?;
    Ok(())
}
