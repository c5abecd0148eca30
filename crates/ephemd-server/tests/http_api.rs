#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use ephemd_core::error::{EphemdError, Result};
use ephemd_server::{app_state::AppState, config, probe::ReadinessProbe, router::build_router};

const TEST_CONFIG: &str = r#"
version: 1
tasks:
  processing_delay_ms: 20
"#;

fn test_app() -> Router {
    let cfg = config::load_from_str(TEST_CONFIG).expect("config");
    build_router(AppState::new(cfg).expect("state"))
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let res = app.oneshot(req).await.expect("request");
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.expect("body");
    let value = serde_json::from_slice(&bytes).expect("json body");
    (status, value)
}

async fn past_delay() {
    tokio::time::sleep(Duration::from_millis(100)).await;
    tokio::task::yield_now().await;
}

#[tokio::test(start_paused = true)]
async fn create_then_fetch_reports_lifecycle() {
    let app = test_app();

    let (status, body) = send(
        app.clone(),
        json_request("POST", "/tasks", json!({"task_id": "t1", "data": {"x": 1}, "priority": 5})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["task_id"], json!("t1"));
    assert_eq!(body["status"], json!("accepted"));
    assert_eq!(body["message"], json!("Task created successfully"));

    // immediately after creation the stored state is pending, result null
    let (status, body) = send(app.clone(), get_request("/tasks/t1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("pending"));
    assert_eq!(body["result"], Value::Null);

    past_delay().await;

    let (status, body) = send(app, get_request("/tasks/t1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("completed"));
    assert_eq!(body["result"]["message"], json!("Task completed successfully"));
    assert!(body["result"]["processed_at"].as_f64().unwrap() > 0.0);
}

#[tokio::test]
async fn unknown_task_is_not_found() {
    let app = test_app();

    let (status, body) = send(app, get_request("/tasks/unknown")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], json!("NOT_FOUND"));
}

#[tokio::test(start_paused = true)]
async fn deleted_task_stays_deleted_past_the_delay() {
    let app = test_app();

    let (status, _) = send(
        app.clone(),
        json_request("POST", "/tasks", json!({"task_id": "t1", "data": {}})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(app.clone(), json_request("DELETE", "/tasks/t1", json!(null))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Task deleted successfully"));

    let (status, _) = send(app.clone(), get_request("/tasks/t1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // the late completion step must not resurrect the record
    past_delay().await;
    let (status, _) = send(app.clone(), get_request("/tasks/t1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(app, json_request("DELETE", "/tasks/t1", json!(null))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], json!("NOT_FOUND"));
}

#[tokio::test(start_paused = true)]
async fn list_echoes_stored_records_and_count() {
    let app = test_app();

    for id in ["a", "b", "c"] {
        let (status, _) = send(
            app.clone(),
            json_request("POST", "/tasks", json!({"task_id": id, "data": {"id": id}})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = send(app.clone(), get_request("/tasks")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], json!(3));
    let tasks = body["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 3);

    // records echo stored fields verbatim; result is absent while pending
    let a = tasks.iter().find(|t| t["task_id"] == json!("a")).unwrap();
    assert_eq!(a["status"], json!("pending"));
    assert_eq!(a["data"], json!({"id": "a"}));
    assert_eq!(a["priority"], json!(1));
    assert!(a["created_at"].as_f64().unwrap() > 0.0);
    assert!(a.get("result").is_none());

    let (status, _) = send(app.clone(), json_request("DELETE", "/tasks/b", json!(null))).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(app, get_request("/tasks")).await;
    assert_eq!(body["count"], json!(2));
    assert_eq!(body["tasks"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn duplicate_create_overwrites_silently() {
    let app = test_app();

    for (x, priority) in [(1, 1), (2, 9)] {
        let (status, body) = send(
            app.clone(),
            json_request(
                "POST",
                "/tasks",
                json!({"task_id": "t1", "data": {"x": x}, "priority": priority}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], json!("accepted"));
    }

    let (_, body) = send(app, get_request("/tasks")).await;
    assert_eq!(body["count"], json!(1));
    let t = &body["tasks"].as_array().unwrap()[0];
    assert_eq!(t["data"], json!({"x": 2}));
    assert_eq!(t["priority"], json!(9));
}

#[tokio::test]
async fn health_surface_responds() {
    let app = test_app();

    let (status, body) = send(app.clone(), get_request("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("healthy"));
    assert_eq!(body["version"], json!("1.0.0"));
    assert_eq!(body["environment"], json!("development"));
    assert!(body["timestamp"].as_f64().unwrap() > 0.0);

    let (status, body) = send(app.clone(), get_request("/health/ready")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("ready"));

    let (status, body) = send(app.clone(), get_request("/health/live")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("alive"));

    let (status, body) = send(app, get_request("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["docs"], json!("/docs"));
    assert_eq!(body["health"], json!("/health"));
    assert_eq!(body["version"], json!("1.0.0"));
}

struct AlwaysDown;

#[async_trait::async_trait]
impl ReadinessProbe for AlwaysDown {
    fn name(&self) -> &'static str {
        "downstream"
    }

    async fn check(&self) -> Result<()> {
        Err(EphemdError::NotReady("connection refused".into()))
    }
}

#[tokio::test]
async fn failing_probe_turns_readiness_503() {
    let cfg = config::load_from_str(TEST_CONFIG).expect("config");
    let state = AppState::with_probes(cfg, vec![Arc::new(AlwaysDown)]).expect("state");
    let app = build_router(state);

    let (status, body) = send(app, get_request("/health/ready")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], json!("NOT_READY"));
    assert!(body["message"].as_str().unwrap().contains("downstream"));
}

#[tokio::test]
async fn metrics_expose_request_counts() {
    let app = test_app();

    let (status, _) = send(app.clone(), get_request("/health")).await;
    assert_eq!(status, StatusCode::OK);

    let res = app.oneshot(get_request("/metrics")).await.expect("request");
    assert_eq!(res.status(), StatusCode::OK);
    let content_type = res
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("text/plain"));

    let bytes = to_bytes(res.into_body(), usize::MAX).await.expect("body");
    let text = String::from_utf8(bytes.to_vec()).expect("utf8");

    assert!(text.contains("# TYPE http_requests_total counter"));
    assert!(text.contains(r#"endpoint="/health""#));
    assert!(text.contains("# TYPE http_request_duration_seconds histogram"));
    assert!(text.contains("ephemd_tasks_tracked 0"));
}

#[tokio::test]
async fn untrusted_host_header_is_rejected() {
    let cfg = config::load_from_str(
        r#"
version: 1
server:
  allowed_hosts: ["api.example.com"]
tasks:
  processing_delay_ms: 20
"#,
    )
    .expect("config");
    let app = build_router(AppState::new(cfg).expect("state"));

    let req = Request::builder()
        .uri("/health")
        .header(header::HOST, "evil.com")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app.clone(), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("BAD_REQUEST"));

    let req = Request::builder()
        .uri("/health")
        .header(header::HOST, "api.example.com:8000")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(app, req).await;
    assert_eq!(status, StatusCode::OK);
}
