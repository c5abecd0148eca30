//! Axum router wiring.
//!
//! Route table covers the probe/metrics surface plus the demo task API.
//! Every route runs through the trusted-host check and the metrics layer;
//! CORS sits innermost so preflights are counted and host-checked too.

use axum::{
    http::HeaderValue,
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::{api, app_state::AppState, middleware};

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state);

    Router::new()
        .route("/", get(api::meta::root))
        .route("/health", get(api::meta::health))
        .route("/health/ready", get(api::meta::readiness))
        .route("/health/live", get(api::meta::liveness))
        .route("/metrics", get(api::metrics::exposition))
        .route("/tasks", post(api::tasks::create_task).get(api::tasks::list_tasks))
        .route(
            "/tasks/:task_id",
            get(api::tasks::get_task).delete(api::tasks::delete_task),
        )
        .layer(cors)
        .layer(from_fn_with_state(state.clone(), middleware::enforce_trusted_host))
        .layer(from_fn_with_state(state.clone(), middleware::track_metrics))
        .with_state(state)
}

/// `["*"]` opens the API up entirely (demo default); otherwise only the
/// configured origins are admitted. Unparseable entries are skipped with a
/// warning rather than failing boot.
fn cors_layer(state: &AppState) -> CorsLayer {
    let origins = &state.cfg().server.allowed_origins;
    if origins.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "allowed_origins entry is not a valid header value");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(parsed))
        .allow_methods(Any)
        .allow_headers(Any)
}
