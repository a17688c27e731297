use std::{
    path::PathBuf,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use locallens_api::{
    config::AppConfig,
    gateway::{CompletionBackend, Gateway, GatewayError},
    middleware::auth::issue_token,
    routes::create_api_router,
    state::AppState,
    storage::ObjectStore,
};
use sea_orm::{DatabaseBackend, MockDatabase};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;
use uuid::Uuid;

const SECRET: &str = "test-secret";

#[derive(Default)]
struct CountingBackend {
    calls: AtomicUsize,
}

#[async_trait]
impl CompletionBackend for CountingBackend {
    async fn complete(&self, _system: &str, _prompt: &str) -> Result<String, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(GatewayError::Backend("offline".into()))
    }

    fn name(&self) -> &'static str {
        "counting"
    }
}

fn app(backend: Arc<CountingBackend>) -> Router {
    let upload_dir = std::env::temp_dir().join(format!("locallens-api-{}", Uuid::new_v4()));
    let config = AppConfig {
        database_url: "postgres://localhost/unused".into(),
        host: "127.0.0.1".into(),
        port: 0,
        jwt_secret: SECRET.into(),
        model: "stub".into(),
        upload_dir: PathBuf::from(&upload_dir),
        public_base_url: "http://localhost".into(),
        max_upload_bytes: 1024,
    };
    // Never reached by the routes under test; audit writes would time out and warn.
    let pool = PgPoolOptions::new()
        .acquire_timeout(Duration::from_millis(100))
        .connect_lazy(&config.database_url)
        .expect("lazy pool");
    let state = AppState {
        pool,
        orm: Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection()),
        gateway: Gateway::new(backend),
        storage: ObjectStore::new(upload_dir, "http://localhost", 1024),
        config: Arc::new(config),
    };
    Router::new()
        .nest("/api", create_api_router())
        .with_state(state)
}

fn bearer() -> String {
    let token = issue_token(SECRET, Uuid::new_v4(), "user").expect("token");
    format!("Bearer {token}")
}

fn post_json(uri: &str, body: serde_json::Value, auth: Option<String>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("request")
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

fn itinerary() -> serde_json::Value {
    serde_json::json!({
        "destination": "Delhi",
        "duration": 1,
        "days": [{
            "day": 1,
            "activities": [
                { "time": "09:00", "location": "A" },
                { "time": "11:00", "location": "B" },
                { "time": "14:00", "location": "C" }
            ]
        }]
    })
}

fn locations(body: &serde_json::Value) -> Vec<String> {
    body["data"]["days"][0]["activities"]
        .as_array()
        .expect("activities")
        .iter()
        .map(|a| a["location"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[tokio::test]
async fn edit_requires_a_token() {
    let app = app(Arc::default());
    let request = post_json(
        "/api/planner/edit",
        serde_json::json!({ "itinerary": itinerary(), "edit": { "op": "remove_activity", "day_index": 0, "activity_index": 0 } }),
        None,
    );

    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn edit_moves_an_activity_up() {
    let app = app(Arc::default());
    let request = post_json(
        "/api/planner/edit",
        serde_json::json!({
            "itinerary": itinerary(),
            "edit": { "op": "reorder_activity", "day_index": 0, "activity_index": 1, "direction": "up" }
        }),
        Some(bearer()),
    );

    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(locations(&body), ["B", "A", "C"]);
}

#[tokio::test]
async fn edit_out_of_range_is_a_bad_request() {
    let app = app(Arc::default());
    let request = post_json(
        "/api/planner/edit",
        serde_json::json!({
            "itinerary": itinerary(),
            "edit": { "op": "remove_activity", "day_index": 4, "activity_index": 0 }
        }),
        Some(bearer()),
    );

    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["data"]["error"].as_str().is_some());
}

#[tokio::test]
async fn unique_extras_drops_planned_places() {
    let app = app(Arc::default());
    let request = post_json(
        "/api/planner/unique-extras",
        serde_json::json!({
            "itinerary": itinerary(),
            "suggestions": [{ "location": " a " }, { "location": "D" }]
        }),
        Some(bearer()),
    );

    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["meta"]["total"], 1);
    assert_eq!(body["data"]["items"][0]["location"], "D");
}

#[tokio::test]
async fn merge_of_a_single_itinerary_is_refused_before_any_lookup() {
    let backend = Arc::new(CountingBackend::default());
    let app = app(backend.clone());
    let id = Uuid::new_v4();
    let request = post_json(
        "/api/itineraries/merge",
        serde_json::json!({ "itinerary_ids": [id, id] }),
        Some(bearer()),
    );

    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn gateway_failures_map_to_bad_gateway() {
    let backend = Arc::new(CountingBackend::default());
    let app = app(backend.clone());
    let request = post_json(
        "/api/planner/prompt",
        serde_json::json!({ "prompt": "Three relaxed days in Goa" }),
        Some(bearer()),
    );

    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
}
