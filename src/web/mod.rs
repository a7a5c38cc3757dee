use axum::http::Method;
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::config::AppConfig;

pub mod assets;
pub mod error;
pub mod routes;

/// Shared handler state. The config is all there is; the profile file on
/// disk is the only thing resembling storage.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
}

async fn health_check_handler() -> &'static str {
    "OK"
}

pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(vec![Method::GET, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(health_check_handler))
        .route("/data", get(routes::get_data))
        .fallback(assets::static_handler)
        .with_state(state)
        .layer(cors)
}

/// Binds the listener and serves until the process is killed. Requests are
/// independent; concurrent `/data` reads may race a running regeneration,
/// and nothing guards against that.
pub async fn run_server(config: AppConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let addr: SocketAddr = config.listen_addr.parse()?;
    let state = Arc::new(AppState {
        config: Arc::new(config),
    });
    let app = create_router(state);

    let socket = if addr.is_ipv4() {
        tokio::net::TcpSocket::new_v4()?
    } else {
        tokio::net::TcpSocket::new_v6()?
    };
    socket.set_reuseaddr(true)?;
    socket.set_keepalive(true)?;
    socket.bind(addr)?;
    let listener = socket.listen(1024)?;
    info!(address = %addr, "HTTP server listening");

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
