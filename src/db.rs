//! 数据库连接池、迁移与初始管理员
//! 启动时按顺序执行一次：建池 -> 迁移 -> 种子管理员，之后才开始接收请求

use crate::{
    auth::password::PasswordHasher,
    config::{DatabaseConfig, SeedConfig},
    models::admin::{AdminRole, CreateAdminRequest},
    repository::AdminRepository,
};
use secrecy::ExposeSecret;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

/// 创建数据库连接池
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, DbError> {
    tracing::debug!("Creating database connection pool...");

    let pool = pool_options(config)
        .connect(config.url.expose_secret())
        .await
        .map_err(|e| {
            tracing::error!("Failed to create database pool: {}", e);
            DbError::ConnectionFailed(e.to_string())
        })?;

    tracing::info!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "Database pool created successfully"
    );

    Ok(pool)
}

/// 创建延迟连接的连接池，首次查询时才真正建立连接
pub fn create_lazy_pool(config: &DatabaseConfig) -> Result<PgPool, DbError> {
    pool_options(config)
        .min_connections(0)
        .connect_lazy(config.url.expose_secret())
        .map_err(|e| DbError::ConnectionFailed(e.to_string()))
}

fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
        .test_before_acquire(true)
}

/// 运行数据库迁移
pub async fn run_migrations(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running database migrations...");

    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| {
            tracing::error!("Migration failed: {}", e);
            DbError::MigrationFailed(e.to_string())
        })?;

    tracing::info!("Migrations completed successfully");
    Ok(())
}

/// 确保种子管理员存在；已存在（按邮箱）则不做任何修改
pub async fn seed_admin(pool: &PgPool, seed: &SeedConfig) -> Result<bool, DbError> {
    let repo = AdminRepository::new(pool.clone());

    let existing = repo
        .find_by_email(&seed.email)
        .await
        .map_err(|e| DbError::SeedFailed(e.to_string()))?;
    if existing.is_some() {
        tracing::debug!(email = %seed.email, "Seed admin already present");
        return Ok(false);
    }

    let password_hash = PasswordHasher::new()
        .hash(seed.password.expose_secret())
        .map_err(|e| DbError::SeedFailed(e.to_string()))?;

    let req = CreateAdminRequest {
        username: seed.username.clone(),
        email: seed.email.clone(),
        password: String::new(),
        display_name: seed.display_name.clone(),
        role: AdminRole::parse(&seed.role),
        is_active: Some(true),
    };

    repo.create(&req, &password_hash)
        .await
        .map_err(|e| DbError::SeedFailed(e.to_string()))?;

    tracing::info!(email = %seed.email, role = %seed.role, "Seed admin created");
    Ok(true)
}

/// 数据库健康检查
pub async fn health_check(pool: &PgPool) -> HealthStatus {
    match sqlx::query("SELECT 1").fetch_one(pool).await {
        Ok(_) => {
            tracing::debug!("Database health check: OK");
            HealthStatus::Healthy
        }
        Err(e) => {
            tracing::warn!("Database health check failed: {}", e);
            HealthStatus::Unhealthy(e.to_string())
        }
    }
}

/// 记录数据库连接池指标
pub fn record_pool_metrics(pool: &PgPool) {
    metrics::gauge!("db.pool.size").set(pool.size() as f64);
    metrics::gauge!("db.pool.idle").set(pool.num_idle() as f64);
}

/// 数据库错误类型
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Seeding admin failed: {0}")]
    SeedFailed(String),
}

/// 健康状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy,
    Unhealthy(String),
}
