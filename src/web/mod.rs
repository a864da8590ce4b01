// Demo web server: the relying-party side of the Duo iframe flow.
//
//   GET  /?user=<name>  render the prompt page with a signed request
//   POST /              verify the sig_response posted back by the iframe
//   GET  /health        liveness check
//
// The two client assets the page loads are served from DUO_STATIC_DIR by
// exact name. Nothing else in that directory is reachable.
// Credentials are loaded once and shared read-only through AppState.

use std::sync::Arc;

use anyhow::Result;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use tower_http::services::ServeFile;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::credentials::Credentials;

pub mod handlers;

/// Files the prompt page references, served from the static directory.
pub const CLIENT_ASSETS: [&str; 2] = ["Duo-Web-v2.js", "Duo-Frame.css"];

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub credentials: Arc<Credentials>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let credentials = config.credentials();
        Self {
            config: Arc::new(config),
            credentials: Arc::new(credentials),
        }
    }
}

/// Start the Axum web server and block until it exits.
pub async fn run_server(config: Config) -> Result<()> {
    let addr = format!("{}:{}", config.bind, config.port);
    let app = build_router(AppState::new(config));

    info!("Duo demo listening on http://{addr}");
    info!("Visit http://{addr}/?user=myname to start a prompt");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    let static_dir = &state.config.static_dir;
    let mut router = Router::new()
        .route(
            "/",
            get(handlers::prompt::show_prompt).post(handlers::response::submit_response),
        )
        .route("/health", get(health));
    for asset in CLIENT_ASSETS {
        router = router.route_service(&format!("/{asset}"), ServeFile::new(static_dir.join(asset)));
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({ "status": "ok" })),
    )
}
