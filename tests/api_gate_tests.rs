//! 管理员门禁集成测试
//!
//! 应用连接的是一个不可达的数据库：只要请求越过门禁触达仓储层，
//! 响应就会变成 500，所以 401 本身就证明了处理器没有执行。

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use biosite_cms::models::admin::AdminRole;
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

mod common;
use common::{body_json, create_offline_app, json_request};

const GATED: &[(&str, &str)] = &[
    ("GET", "/api/admin/auth/me"),
    ("POST", "/api/admin/auth/logout"),
    ("PUT", "/api/admin/auth/password"),
    ("GET", "/api/admin/admins"),
    ("GET", "/api/admin/services"),
    ("DELETE", "/api/admin/services/8a4f0c55-5d8e-4b43-9a51-9a0f4f1e2b11"),
    ("GET", "/api/admin/settings"),
    ("GET", "/api/admin/page-content"),
    ("GET", "/api/admin/blogs"),
    ("GET", "/api/admin/dashboard/stats"),
    ("POST", "/api/upload"),
    ("DELETE", "/api/upload"),
];

async fn assert_unauthorized(response: axum::response::Response) {
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "unauthorized");
}

#[tokio::test]
async fn test_gated_routes_require_token() {
    let (app, _) = create_offline_app();

    for (method, uri) in GATED {
        let response = app
            .clone()
            .oneshot(json_request(method, uri, None, None))
            .await
            .unwrap();

        assert_eq!(
            response.status(),
            StatusCode::UNAUTHORIZED,
            "{} {} should be gated",
            method,
            uri
        );
    }
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let (app, state) = create_offline_app();
    let token = state
        .jwt_service
        .issue_expired(&Uuid::new_v4(), AdminRole::Admin)
        .unwrap();

    let response = app
        .oneshot(json_request("GET", "/api/admin/auth/me", None, Some(&token)))
        .await
        .unwrap();

    assert_unauthorized(response).await;
}

#[tokio::test]
async fn test_expired_cookie_rejected() {
    let (app, state) = create_offline_app();
    let token = state
        .jwt_service
        .issue_expired(&Uuid::new_v4(), AdminRole::Superadmin)
        .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/admin/dashboard/stats")
                .header(header::COOKIE, format!("admin_token={}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_unauthorized(response).await;
}

#[tokio::test]
async fn test_malformed_and_forged_tokens_rejected() {
    let (app, _) = create_offline_app();

    // 其它密钥签发的令牌
    let forged = {
        let mut config = common::create_test_config();
        config.security.jwt_secret =
            secrecy::Secret::new("another-secret-entirely-but-32-chars-long!".to_string());
        biosite_cms::auth::JwtService::from_config(&config)
            .unwrap()
            .issue(&Uuid::new_v4(), AdminRole::Superadmin)
            .unwrap()
    };

    for token in ["not-a-jwt", "a.b.c", forged.as_str()] {
        let response = app
            .clone()
            .oneshot(json_request("GET", "/api/admin/services", None, Some(token)))
            .await
            .unwrap();

        assert_unauthorized(response).await;
    }
}

#[tokio::test]
async fn test_non_bearer_authorization_ignored() {
    let (app, state) = create_offline_app();
    let token = state.jwt_service.issue(&Uuid::new_v4(), AdminRole::Admin).unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/admin/auth/me")
                .header(header::AUTHORIZATION, format!("Token {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_unauthorized(response).await;
}

#[tokio::test]
async fn test_login_requires_email_and_password() {
    let (app, _) = create_offline_app();

    for body in [
        json!({}),
        json!({ "email": "curator@example-bio.com" }),
        json!({ "password": "LabBench2024" }),
        json!({ "email": "   ", "password": "LabBench2024" }),
        json!({ "email": "curator@example-bio.com", "password": "" }),
    ] {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/admin/auth/login", Some(body), None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "validation_error");
    }
}

#[tokio::test]
async fn test_login_rejects_malformed_body() {
    let (app, _) = create_offline_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/admin/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{\"email\": "))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "bad_request");
}

#[tokio::test]
async fn test_database_failure_is_sanitized() {
    let (app, _) = create_offline_app();

    let response = app
        .oneshot(json_request("GET", "/api/services", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["error"], "database_error");
    assert_eq!(json["message"], "Database error occurred");
}

#[tokio::test]
async fn test_malformed_query_string_uses_error_envelope() {
    let (app, _) = create_offline_app();

    for uri in ["/api/blogs?limit=abc", "/api/blogs?offset=-x&tag=crispr"] {
        let response = app
            .clone()
            .oneshot(json_request("GET", uri, None, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "GET {}", uri);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json",
            "GET {}",
            uri
        );
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "bad_request");
    }
}
