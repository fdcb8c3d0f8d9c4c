mod config;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::http::{header, HeaderValue};
use axum::response::{Html, IntoResponse};
use axum::{extract::State, routing::get, Router};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use config::ServerConfig;

/// Build a cache-controlled static file router.
///
/// Separated so tests can exercise the caching layer with arbitrary directories.
fn cached_static_router(dir: &Path, cache_header: &'static str) -> Router {
    let layer = SetResponseHeaderLayer::overriding(
        header::CACHE_CONTROL,
        HeaderValue::from_static(cache_header),
    );
    Router::new()
        .fallback_service(ServeDir::new(dir))
        .layer(layer)
}

const CACHE_1DAY: &str = "public, max-age=86400, must-revalidate";
const CACHE_IMMUTABLE: &str = "public, max-age=31536000, immutable";
const CACHE_NONE: &str = "no-cache";

/// Build the full application router.
fn build_app(dist_dir: &Path) -> Router {
    let dist = Arc::new(dist_dir.to_path_buf());

    Router::new()
        .route("/", get(serve_index))
        .route("/national", get(serve_index))
        .with_state(dist)
        .nest(
            "/assets",
            cached_static_router(&dist_dir.join("assets"), CACHE_IMMUTABLE),
        )
        .fallback_service(cached_static_router(dist_dir, CACHE_1DAY))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

async fn serve_index(State(dist): State<Arc<PathBuf>>) -> impl IntoResponse {
    // Try to serve the built frontend, fall back to a simple message
    let page = match tokio::fs::read_to_string(dist.join("index.html")).await {
        Ok(html) => html,
        Err(e) => {
            tracing::warn!(error = %e, dist = %dist.display(), "Frontend bundle not found");
            r#"<!DOCTYPE html>
<html>
<head><title>Radar Map</title></head>
<body>
<h1>Radar Map</h1>
<p>Frontend not built yet. Run <code>dx build --release</code> in crates/frontend.</p>
</body>
</html>"#
                .to_string()
        }
    };
    ([(header::CACHE_CONTROL, CACHE_NONE)], Html(page))
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env();
    let app = build_app(&config.dist_dir);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(dist = %config.dist_dir.display(), "Server running at http://localhost:{}", config.port);

    axum::serve(listener, app).await
}
