//! 认证 API 集成测试（需要 TEST_DATABASE_URL 指向的 PostgreSQL）

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::json;
use serial_test::serial;
use tower::ServiceExt;

mod common;
use common::{
    body_json, create_test_admin, create_test_app, json_request, login, set_admin_active,
    setup_test_db, TEST_PASSWORD,
};

#[tokio::test]
#[ignore] // 需要数据库
#[serial]
async fn test_login_success_sets_cookie_and_me_matches() {
    let config = common::create_test_config();
    let pool = setup_test_db(&config).await;
    let admin_id =
        create_test_admin(&pool, "curator", "curator@example-bio.com", TEST_PASSWORD, true).await;
    let (app, _) = create_test_app(pool.clone()).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/admin/auth/login",
            Some(json!({ "email": "Curator@Example-Bio.com", "password": TEST_PASSWORD })),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response.headers()[header::SET_COOKIE]
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("admin_token="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));
    assert!(set_cookie.contains("Max-Age=604800"));

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["admin"]["id"], admin_id.to_string());
    assert!(json["data"]["admin"].get("password_hash").is_none());
    assert!(json["data"]["admin"]["last_login_at"].is_string());
    let token = json["data"]["token"].as_str().unwrap().to_string();

    // Bearer
    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/admin/auth/me", None, Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], admin_id.to_string());

    // Cookie
    let cookie_pair = set_cookie.split(';').next().unwrap().to_string();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/admin/auth/me")
                .header(header::COOKIE, cookie_pair)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], admin_id.to_string());
}

#[tokio::test]
#[ignore] // 需要数据库
#[serial]
async fn test_wrong_password_and_unknown_email_are_indistinguishable() {
    let config = common::create_test_config();
    let pool = setup_test_db(&config).await;
    create_test_admin(&pool, "curator", "curator@example-bio.com", TEST_PASSWORD, true).await;
    let (app, _) = create_test_app(pool).await;

    let wrong_password = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/admin/auth/login",
            Some(json!({ "email": "curator@example-bio.com", "password": "WrongPass123" })),
            None,
        ))
        .await
        .unwrap();

    let unknown_email = app
        .oneshot(json_request(
            "POST",
            "/api/admin/auth/login",
            Some(json!({ "email": "nobody@example-bio.com", "password": TEST_PASSWORD })),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    assert!(wrong_password.headers().get(header::SET_COOKIE).is_none());

    let wrong_password = body_json(wrong_password).await;
    let unknown_email = body_json(unknown_email).await;
    assert_eq!(wrong_password, unknown_email);
    assert_eq!(wrong_password["message"], "Invalid email or password");
}

#[tokio::test]
#[ignore] // 需要数据库
#[serial]
async fn test_inactive_admin_cannot_login() {
    let config = common::create_test_config();
    let pool = setup_test_db(&config).await;
    create_test_admin(&pool, "retired", "retired@example-bio.com", TEST_PASSWORD, false).await;
    let (app, _) = create_test_app(pool).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/admin/auth/login",
            Some(json!({ "email": "retired@example-bio.com", "password": TEST_PASSWORD })),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    let json = body_json(response).await;
    assert_eq!(json["message"], "This account has been deactivated");
}

#[tokio::test]
#[ignore] // 需要数据库
#[serial]
async fn test_token_of_deactivated_admin_is_rejected() {
    let config = common::create_test_config();
    let pool = setup_test_db(&config).await;
    let admin_id =
        create_test_admin(&pool, "curator", "curator@example-bio.com", TEST_PASSWORD, true).await;
    let (app, _) = create_test_app(pool.clone()).await;

    let token = login(&app, "curator@example-bio.com", TEST_PASSWORD).await;
    set_admin_active(&pool, admin_id, false).await;

    let response = app
        .oneshot(json_request("GET", "/api/admin/services", None, Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore] // 需要数据库
#[serial]
async fn test_token_of_deleted_admin_is_rejected() {
    let config = common::create_test_config();
    let pool = setup_test_db(&config).await;
    let admin_id =
        create_test_admin(&pool, "curator", "curator@example-bio.com", TEST_PASSWORD, true).await;
    let (app, _) = create_test_app(pool.clone()).await;

    let token = login(&app, "curator@example-bio.com", TEST_PASSWORD).await;
    sqlx::query("DELETE FROM admins WHERE id = $1")
        .bind(admin_id)
        .execute(&pool)
        .await
        .unwrap();

    let response = app
        .oneshot(json_request("GET", "/api/admin/auth/me", None, Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore] // 需要数据库
#[serial]
async fn test_logout_clears_cookie() {
    let config = common::create_test_config();
    let pool = setup_test_db(&config).await;
    create_test_admin(&pool, "curator", "curator@example-bio.com", TEST_PASSWORD, true).await;
    let (app, _) = create_test_app(pool).await;

    let token = login(&app, "curator@example-bio.com", TEST_PASSWORD).await;

    let response = app
        .oneshot(json_request("POST", "/api/admin/auth/logout", None, Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(set_cookie.starts_with("admin_token=;"));
    assert!(set_cookie.contains("Max-Age=0"));
}

#[tokio::test]
#[ignore] // 需要数据库
#[serial]
async fn test_change_password() {
    let config = common::create_test_config();
    let pool = setup_test_db(&config).await;
    create_test_admin(&pool, "curator", "curator@example-bio.com", TEST_PASSWORD, true).await;
    let (app, _) = create_test_app(pool).await;

    let token = login(&app, "curator@example-bio.com", TEST_PASSWORD).await;

    // 当前密码错误
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/admin/auth/password",
            Some(json!({ "current_password": "Nope12345", "new_password": "Sequencer2025" })),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // 不满足密码策略
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/admin/auth/password",
            Some(json!({ "current_password": TEST_PASSWORD, "new_password": "short" })),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/admin/auth/password",
            Some(json!({ "current_password": TEST_PASSWORD, "new_password": "Sequencer2025" })),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // 新密码可以登录
    login(&app, "curator@example-bio.com", "Sequencer2025").await;
}

#[tokio::test]
#[ignore] // 需要数据库
#[serial]
async fn test_duplicate_admin_is_conflict() {
    let config = common::create_test_config();
    let pool = setup_test_db(&config).await;
    create_test_admin(&pool, "curator", "curator@example-bio.com", TEST_PASSWORD, true).await;
    let (app, _) = create_test_app(pool).await;

    let token = login(&app, "curator@example-bio.com", TEST_PASSWORD).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/admin/admins",
            Some(json!({
                "username": "editor",
                "email": "editor@example-bio.com",
                "password": "Pipette2024"
            })),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["role"], "admin");
    assert!(json["data"].get("password_hash").is_none());

    for body in [
        json!({ "username": "editor2", "email": "EDITOR@example-bio.com", "password": "Pipette2024" }),
        json!({ "username": "Editor", "email": "other@example-bio.com", "password": "Pipette2024" }),
    ] {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/admin/admins", Some(body), Some(&token)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let json = body_json(response).await;
        assert_eq!(json["error"], "conflict");
    }
}

#[tokio::test]
#[ignore] // 需要数据库
#[serial]
async fn test_admin_cannot_deactivate_self() {
    let config = common::create_test_config();
    let pool = setup_test_db(&config).await;
    let admin_id =
        create_test_admin(&pool, "curator", "curator@example-bio.com", TEST_PASSWORD, true).await;
    let other_id =
        create_test_admin(&pool, "editor", "editor@example-bio.com", TEST_PASSWORD, true).await;
    let (app, _) = create_test_app(pool).await;

    let token = login(&app, "curator@example-bio.com", TEST_PASSWORD).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/admin/admins/{}/status", admin_id),
            Some(json!({ "is_active": false })),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/admin/admins/{}/status", other_id),
            Some(json!({ "is_active": false })),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore] // 需要数据库
#[serial]
async fn test_blank_username_is_rejected() {
    let config = common::create_test_config();
    let pool = setup_test_db(&config).await;
    create_test_admin(&pool, "curator", "curator@example-bio.com", TEST_PASSWORD, true).await;
    let (app, _) = create_test_app(pool.clone()).await;

    let token = login(&app, "curator@example-bio.com", TEST_PASSWORD).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/admin/admins",
            Some(json!({
                "username": "   ",
                "email": "blank@example-bio.com",
                "password": TEST_PASSWORD
            })),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "validation_error");

    let response = app
        .oneshot(json_request(
            "PUT",
            "/api/admin/auth/profile",
            Some(json!({ "username": "    " })),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM admins WHERE username = ''")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
#[ignore] // 需要数据库
#[serial]
async fn test_profile_update_conflicts_with_other_admin() {
    let config = common::create_test_config();
    let pool = setup_test_db(&config).await;
    create_test_admin(&pool, "curator", "curator@example-bio.com", TEST_PASSWORD, true).await;
    create_test_admin(&pool, "editor", "editor@example-bio.com", TEST_PASSWORD, true).await;
    let (app, _) = create_test_app(pool).await;

    let token = login(&app, "curator@example-bio.com", TEST_PASSWORD).await;

    for body in [
        json!({ "email": "Editor@example-bio.com" }),
        json!({ "username": "EDITOR" }),
    ] {
        let response = app
            .clone()
            .oneshot(json_request("PUT", "/api/admin/auth/profile", Some(body), Some(&token)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let json = body_json(response).await;
        assert_eq!(json["error"], "conflict");
    }

    // 保持自己的邮箱和用户名不算冲突，其它字段照常更新
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/admin/auth/profile",
            Some(json!({
                "email": "curator@example-bio.com",
                "username": "curator",
                "display_name": "Lab Curator"
            })),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["display_name"], "Lab Curator");
    assert_eq!(json["data"]["email"], "curator@example-bio.com");

    // 部分更新：未提供的字段保持不变
    let response = app
        .oneshot(json_request(
            "PUT",
            "/api/admin/auth/profile",
            Some(json!({ "username": "chief-curator" })),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["username"], "chief-curator");
    assert_eq!(json["data"]["display_name"], "Lab Curator");
    assert_eq!(json["data"]["email"], "curator@example-bio.com");
}
