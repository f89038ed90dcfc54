use anyhow::{Context, Result};
use axum::{
    Router,
    body::Body,
    http::Request,
    routing::get,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::{self, AppState};

/// Path the dashboard page has always been served from
pub const INDEX_PATH: &str = "/app/templates/index.html";

/// Request span without the query string, which carries provider API keys
fn request_span(request: &Request<Body>) -> tracing::Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
    )
}

/// Full application router: JSON API, dashboard page and middleware
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", api::router())
        .route(INDEX_PATH, get(api::index))
        .route("/", get(api::index))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http().make_span_with(request_span))
                .layer(cors),
        )
        .with_state(state)
}

pub async fn run(state: AppState) -> Result<()> {
    let addr = state.config.server.bind_address();
    let port = state.config.server.port;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Web server running at http://localhost:{}", port);

    axum::serve(listener, app(state))
        .await
        .context("Web server terminated")
}
