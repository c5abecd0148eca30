//! ephemd server binary.
//!
//! Boot sequence:
//! - tracing subscriber from `RUST_LOG`
//! - config from `ephemd.yaml` (optional) + `PORT`/`ENVIRONMENT` overrides
//! - shared state (task store, metrics, readiness probes)
//! - axum router, served until ctrl-c

use std::net::SocketAddr;
use tracing_subscriber::{fmt, EnvFilter};

use ephemd_server::{app_state, config, router};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cfg = config::load(config::DEFAULT_PATH).expect("config load failed");
    let listen: SocketAddr = cfg
        .server
        .listen
        .parse()
        .expect("server.listen must be a valid SocketAddr");

    let state = app_state::AppState::new(cfg).expect("state build failed");
    let app = router::build_router(state);

    tracing::info!(%listen, "ephemd-server starting");
    let listener = tokio::net::TcpListener::bind(listen).await.expect("failed to bind");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server failed");

    tracing::info!("ephemd-server shut down");
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("shutdown signal received");
    }
}
