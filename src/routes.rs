//! 路由注册
//! 创建所有 API 路由并应用中间件

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::{auth, handlers, middleware::AppState};

// multipart 边界与其它字段的余量
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// 上传路由的请求体上限：文件上限加 multipart 余量
fn upload_body_limit(max_upload_bytes: usize) -> usize {
    max_upload_bytes.saturating_add(MULTIPART_OVERHEAD_BYTES)
}

/// 创建应用路由
pub fn create_router(state: Arc<AppState>) -> Router {
    // 公开端点：健康检查 + 网站前台读取
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .route("/api/services", get(handlers::service::list_public_services))
        .route("/api/services/{slug}", get(handlers::service::get_public_service))
        .route("/api/blogs", get(handlers::blog::list_public_blogs))
        .route("/api/blogs/{slug}", get(handlers::blog::get_public_blog))
        .route("/api/settings", get(handlers::setting::list_public_settings))
        .route("/api/page-content", get(handlers::page_content::list_public_sections));

    // 登录无需认证
    let auth_routes = Router::new().route("/api/admin/auth/login", post(handlers::auth::login));

    // 需要管理员身份的路由
    let admin_routes = Router::new()
        .route("/api/admin/auth/logout", post(handlers::auth::logout))
        .route("/api/admin/auth/me", get(handlers::auth::me))
        .route("/api/admin/auth/profile", put(handlers::auth::update_profile))
        .route("/api/admin/auth/password", put(handlers::auth::change_password))
        // 管理员账号
        .route(
            "/api/admin/admins",
            get(handlers::admin::list_admins).post(handlers::admin::create_admin),
        )
        .route(
            "/api/admin/admins/{id}/status",
            put(handlers::admin::update_admin_status),
        )
        // 服务项目
        .route(
            "/api/admin/services",
            get(handlers::service::list_services).post(handlers::service::create_service),
        )
        .route(
            "/api/admin/services/{id}",
            get(handlers::service::get_service)
                .put(handlers::service::update_service)
                .delete(handlers::service::delete_service),
        )
        // 站点设置
        .route(
            "/api/admin/settings",
            get(handlers::setting::list_settings).post(handlers::setting::create_setting),
        )
        .route(
            "/api/admin/settings/{id}",
            get(handlers::setting::get_setting)
                .put(handlers::setting::update_setting)
                .delete(handlers::setting::delete_setting),
        )
        // 页面内容
        .route(
            "/api/admin/page-content",
            get(handlers::page_content::list_sections)
                .post(handlers::page_content::create_section),
        )
        .route(
            "/api/admin/page-content/{id}",
            get(handlers::page_content::get_section)
                .put(handlers::page_content::update_section)
                .delete(handlers::page_content::delete_section),
        )
        // 博客
        .route(
            "/api/admin/blogs",
            get(handlers::blog::list_blogs).post(handlers::blog::create_blog),
        )
        .route(
            "/api/admin/blogs/{id}",
            get(handlers::blog::get_blog)
                .put(handlers::blog::update_blog)
                .delete(handlers::blog::delete_blog),
        )
        .route("/api/admin/dashboard/stats", get(handlers::dashboard::stats))
        // 图片上传代理
        .route(
            "/api/upload",
            post(handlers::upload::upload_image)
                .delete(handlers::upload::delete_image)
                .layer(DefaultBodyLimit::max(
                    upload_body_limit(state.media_service.max_upload_bytes()),
                )),
        )
        // route_layer：未匹配的路径仍返回 404 而不是 401
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth::require_admin,
        ));

    Router::new()
        .merge(public_routes)
        .merge(auth_routes)
        .merge(admin_routes)
        .layer(axum::middleware::from_fn(crate::middleware::request_tracking_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(crate::middleware::cors_layer(&state.config.cors.allowed_origins))
        .with_state(state)
}
