//! HTTP 处理器模块

pub mod admin;
pub mod auth;
pub mod blog;
pub mod dashboard;
pub mod health;
pub mod page_content;
pub mod service;
pub mod setting;
pub mod upload;

use crate::error::AppError;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query,
    },
    http::StatusCode,
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use uuid::Uuid;
use validator::Validate;

/// 请求体解析失败（缺字段、类型不符、非 JSON）统一返回 400
pub fn parse_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            tracing::debug!(reason = %rejection.body_text(), "Malformed request body");
            Err(AppError::BadRequest(format!(
                "Invalid request body: {}",
                rejection.body_text()
            )))
        }
    }
}

/// 解析并按 validator 规则校验请求体
pub fn validated_body<T: Validate>(
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, AppError> {
    let body = parse_body(payload)?;
    body.validate().map_err(|e| AppError::validation(&e))?;
    Ok(body)
}

/// 路径中的 ID 不是合法 UUID 时返回 400
pub fn path_id(path: Result<Path<Uuid>, PathRejection>) -> Result<Uuid, AppError> {
    path.map(|Path(id)| id)
        .map_err(|e| AppError::BadRequest(format!("Invalid id: {}", e.body_text())))
}

/// 查询参数类型不符时返回 400，保持统一的错误信封
pub fn parse_query<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    query
        .map(|Query(q)| q)
        .map_err(|e| AppError::BadRequest(format!("Invalid query string: {}", e.body_text())))
}

/// `{success: true, data}`
pub fn ok<T: Serialize>(data: T) -> Json<Value> {
    Json(json!({ "success": true, "data": data }))
}

/// `{success: true, message, data}`
pub fn ok_with_message<T: Serialize>(message: &str, data: T) -> Json<Value> {
    Json(json!({ "success": true, "message": message, "data": data }))
}

/// 201 + `{success: true, message, data}`
pub fn created<T: Serialize>(message: &str, data: T) -> (StatusCode, Json<Value>) {
    (StatusCode::CREATED, ok_with_message(message, data))
}

/// `{success: true, message}`
pub fn message(message: &str) -> Json<Value> {
    Json(json!({ "success": true, "message": message }))
}
