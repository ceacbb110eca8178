use axum::{body::Body, middleware::from_fn_with_state, routing::get, Router};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use http::{header, Request, StatusCode};
use tower::ServiceExt;

use shopkeep::{config::AdminConfig, middleware::require_basic_auth};

// Low bcrypt cost keeps the tests fast; the verification path is the same.
fn admin_config(password: &str) -> AdminConfig {
    AdminConfig {
        username: "admin".to_string(),
        password_hash: bcrypt::hash(password, 4).expect("bcrypt hash"),
    }
}

fn gated_router(admin: AdminConfig) -> Router {
    Router::new()
        .route("/admin", get(|| async { "ok" }))
        .route_layer(from_fn_with_state(admin, require_basic_auth))
}

fn basic_header(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}

#[tokio::test]
async fn missing_header_is_rejected_with_a_challenge() {
    let app = gated_router(admin_config("hunter2"));

    let response = app
        .oneshot(Request::builder().uri("/admin").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        "Basic"
    );
}

#[tokio::test]
async fn wrong_password_is_rejected() {
    let app = gated_router(admin_config("hunter2"));

    let request = Request::builder()
        .uri("/admin")
        .header(header::AUTHORIZATION, basic_header("admin", "wrongpass"))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        "Basic"
    );
}

#[tokio::test]
async fn wrong_username_is_rejected_even_with_the_right_password() {
    let app = gated_router(admin_config("hunter2"));

    let request = Request::builder()
        .uri("/admin")
        .header(header::AUTHORIZATION, basic_header("root", "hunter2"))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn malformed_header_is_rejected() {
    let app = gated_router(admin_config("hunter2"));

    let request = Request::builder()
        .uri("/admin")
        .header(header::AUTHORIZATION, "Basic %%%not-base64%%%")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn valid_credentials_are_admitted() {
    let app = gated_router(admin_config("hunter2"));

    let request = Request::builder()
        .uri("/admin")
        .header(header::AUTHORIZATION, basic_header("admin", "hunter2"))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
