//! Router-level checks: probes, auth and request-shape rejections, error
//! rendering and the middleware stack. Only the 500 case talks to a (mock)
//! database; everything else is rejected before a query is built.

use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use sea_orm::{DatabaseBackend, DatabaseConnection, DbErr, MockDatabase};
use serde_json::{Value, json};

use foodgram_api::router::build_router;
use foodgram_api::state::AppState;
use foodgram_testing::auth::{MockAuth, test_keys};

fn server() -> TestServer {
    server_with(DatabaseConnection::Disconnected)
}

fn server_with(db: DatabaseConnection) -> TestServer {
    let state = AppState {
        db,
        tokens: test_keys(),
    };
    TestServer::new(build_router(state)).unwrap()
}

// ── Probes ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_answer_liveness_probe() {
    server().get("/healthz").await.assert_status_ok();
}

#[tokio::test]
async fn should_report_not_ready_without_database() {
    server()
        .get("/readyz")
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

// ── Authentication ───────────────────────────────────────────────────────────

#[tokio::test]
async fn should_require_token_on_private_endpoints() {
    let server = server();
    for path in [
        "/api/users/me/",
        "/api/users/subscriptions/",
        "/api/recipes/download_shopping_cart/",
    ] {
        let response = server.get(path).await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(response.json::<Value>()["kind"], "UNAUTHORIZED", "{path}");
    }
    server
        .post("/api/recipes/1/favorite/")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .delete("/api/users/2/subscribe/")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_reject_invalid_token_on_public_endpoint() {
    server()
        .get("/api/recipes/")
        .add_header(AUTHORIZATION, HeaderValue::from_static("Bearer not-a-jwt"))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_reject_token_with_wrong_scheme() {
    server()
        .get("/api/users/me/")
        .add_header(AUTHORIZATION, HeaderValue::from_static("Token abc"))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_log_out_with_valid_token() {
    server()
        .post("/api/auth/token/logout/")
        .add_header(AUTHORIZATION, MockAuth::user(5).header_value())
        .await
        .assert_status(StatusCode::NO_CONTENT);
}

// ── Request shape ────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_malformed_json_with_400() {
    let server = server();

    let response = server
        .post("/api/auth/token/login/")
        .json(&json!({ "email": "ada@example.com" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "BAD_REQUEST");

    server
        .post("/api/auth/token/login/")
        .text("{not json")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn should_reject_bad_query_flag_with_400() {
    server()
        .get("/api/recipes/?is_favorited=maybe")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn should_reject_non_numeric_id() {
    let server = server();
    for path in ["/api/recipes/abc/", "/api/users/abc/", "/api/tags/1.5/"] {
        let response = server.get(path).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["kind"], "BAD_REQUEST", "{path}");
    }

    let response = server
        .delete("/api/users/x/subscribe/")
        .add_header(AUTHORIZATION, MockAuth::user(5).header_value())
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "BAD_REQUEST");
}

#[tokio::test]
async fn should_reject_oversized_recipes_limit() {
    let server = server();
    for path in [
        "/api/users/subscriptions/?recipes_limit=18446744073709551615",
        "/api/users/subscriptions/?recipes_limit=-1",
    ] {
        let response = server
            .get(path)
            .add_header(AUTHORIZATION, MockAuth::user(5).header_value())
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["kind"], "BAD_REQUEST", "{path}");
    }

    server
        .post("/api/users/2/subscribe/?recipes_limit=9223372036854775808")
        .add_header(AUTHORIZATION, MockAuth::user(5).header_value())
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn should_hide_database_errors_behind_500() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors([DbErr::Custom("connection reset by peer".into())])
        .into_connection();
    let response = server_with(db).get("/api/tags/").await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.json::<Value>();
    assert_eq!(body["kind"], "INTERNAL");
    assert_eq!(body["message"], "internal error");
}

// ── Middleware ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_assign_request_id() {
    let response = server().get("/healthz").await;
    let id = response.header("x-request-id");
    assert!(!id.is_empty());
}

#[tokio::test]
async fn should_propagate_client_request_id() {
    let response = server()
        .get("/healthz")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("req-123"),
        )
        .await;
    assert_eq!(response.header("x-request-id"), "req-123");
}
