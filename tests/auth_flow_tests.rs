// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Email/password session flow tests.
//!
//! Register, login, and logout through the router, checking both the JSON
//! bodies and the session cookie attributes.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
};
use tower::ServiceExt;

mod common;

fn session_cookie(response: &Response) -> String {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|value| value.to_str().unwrap().to_string())
        .find(|value| value.starts_with("mtb_token="))
        .expect("missing mtb_token Set-Cookie header")
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_register_sets_session_cookie() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/auth/register",
            serde_json::json!({
                "email": "new@example.com",
                "password": "password123",
                "first_name": "New",
                "last_name": "Rider",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let cookie = session_cookie(&response);
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("Max-Age=604800"));

    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .unwrap();
    let session: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(session["message"], "Registration successful");
    assert_eq!(session["athlete"]["email"], "new@example.com");
    assert!(session["athlete"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email_rejected() {
    let (app, state) = common::create_test_app();
    common::seed_athlete(&state, "taken@example.com");

    let response = app
        .oneshot(json_request(
            "POST",
            "/auth/register",
            serde_json::json!({
                "email": "taken@example.com",
                "password": "password123",
                "first_name": "Second",
                "last_name": "Rider",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_validation_failures() {
    let (app, _) = common::create_test_app();

    // Bad email and short password
    for payload in [
        serde_json::json!({
            "email": "not-an-email",
            "password": "password123",
            "first_name": "A",
            "last_name": "B",
        }),
        serde_json::json!({
            "email": "ok@example.com",
            "password": "short",
            "first_name": "A",
            "last_name": "B",
        }),
    ] {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/auth/register", payload))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_login_roundtrip() {
    let (app, _) = common::create_test_app();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/auth/register",
            serde_json::json!({
                "email": "rider@example.com",
                "password": "password123",
                "first_name": "Test",
                "last_name": "Rider",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/auth/login",
            serde_json::json!({
                "email": "rider@example.com",
                "password": "password123",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // The fresh cookie must authenticate API requests
    let cookie = session_cookie(&response);
    let cookie_pair = cookie.split(';').next().unwrap().to_string();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/me")
                .header(header::COOKIE, cookie_pair)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let (app, state) = common::create_test_app();
    common::seed_athlete(&state, "rider@example.com");

    let response = app
        .oneshot(json_request(
            "POST",
            "/auth/login",
            serde_json::json!({
                "email": "rider@example.com",
                "password": "wrong-password",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .unwrap();
    let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["details"], "Invalid email or password");
}

#[tokio::test]
async fn test_login_unknown_email_same_error() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/auth/login",
            serde_json::json!({
                "email": "nobody@example.com",
                "password": "password123",
            }),
        ))
        .await
        .unwrap();

    // Same error as a wrong password so the response doesn't leak
    // which emails are registered
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .unwrap();
    let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["details"], "Invalid email or password");
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/logout")
                .header(header::COOKIE, "mtb_token=some-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let cookie = session_cookie(&response);
    assert!(cookie.contains("Max-Age=0"));
    assert!(cookie.contains("Path=/"));
}
