//! 生物科技官网内容管理后端
//! 管理员认证、内容 CRUD、公开读取接口与图片上传代理

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod telemetry;
