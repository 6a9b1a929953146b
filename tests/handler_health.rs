mod common;

use axum::http::StatusCode;
use axum::{Router, routing::get};
use axum_test::TestServer;
use common::InMemoryUserRepository;
use serde_json::{Value, json};
use std::sync::Arc;
use users_api::api::middleware::panic;
use users_api::routes::api_router;

#[tokio::test]
async fn test_health_endpoint() {
    let state = common::create_test_state(Arc::new(InMemoryUserRepository::new()));
    let server = TestServer::new(api_router(state)).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_health_does_not_touch_storage() {
    let repository = Arc::new(InMemoryUserRepository::new());
    repository.fail_all();
    let server = TestServer::new(api_router(common::create_test_state(repository))).unwrap();

    server.get("/health").await.assert_status_ok();
}

async fn exploding_handler() -> &'static str {
    panic!("handler exploded")
}

#[tokio::test]
async fn test_panic_becomes_json_500() {
    let app = Router::new()
        .route("/boom", get(exploding_handler))
        .layer(panic::layer());
    let server = TestServer::new(app).unwrap();

    let response = server.get("/boom").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Internal server error" })
    );
}
