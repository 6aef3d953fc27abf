//! Axum server assembly: shared state, router, and startup.

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Settings;
use crate::error::Result;
use crate::history::HistoryStore;
use crate::providers::LlmProvider;

/// Audio and screenshot uploads; generous but bounded.
const MAX_BODY_BYTES: usize = 20 * 1024 * 1024;

/// Shared state for all API handlers, constructed once at startup and
/// injected into the router.
pub struct AppState {
    pub settings: Settings,
    /// Per-session answer history. Owned exclusively by this state; handlers
    /// only ever hand out copies of records.
    pub history: HistoryStore,
    /// Boundary to the hosted model API.
    pub provider: Arc<dyn LlmProvider>,
}

impl AppState {
    pub fn new(settings: Settings, provider: Arc<dyn LlmProvider>) -> Self {
        let history = HistoryStore::new(settings.history_ttl, settings.history_capacity);
        Self {
            settings,
            history,
            provider,
        }
    }
}

/// CORS for the browser UI: either wide open (`*`) or an exact origin list.
fn cors_layer(allow_origins: &[String]) -> CorsLayer {
    let headers = [
        HeaderName::from_static("content-type"),
        HeaderName::from_static("x-session-id"),
    ];
    if allow_origins.iter().any(|origin| origin == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }
    let origins: Vec<HeaderValue> = allow_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(headers)
}

/// Build the axum router with all API routes.
pub fn build_router(state: AppState, static_dir: Option<PathBuf>) -> Router {
    let cors = cors_layer(&state.settings.allow_origins);
    let shared_state = Arc::new(state);

    let api = Router::new()
        .route("/health", get(super::routes::health::get_health))
        .route("/api/history", get(super::routes::history::get_history))
        .route(
            "/api/interview",
            post(super::routes::interview::post_interview),
        )
        .route(
            "/api/image-question",
            post(super::routes::vision::post_image_question),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(shared_state);

    if let Some(dir) = static_dir {
        api.fallback_service(tower_http::services::ServeDir::new(dir))
    } else {
        api
    }
}

/// Start the API server and run until the listener fails.
pub async fn start_server(state: AppState, static_dir: Option<PathBuf>) -> Result<()> {
    let addr = format!("{}:{}", state.settings.bind, state.settings.port);
    let app = build_router(state, static_dir);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("greenroom API server listening on {addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
