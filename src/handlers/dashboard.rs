//! 后台首页统计

use super::ok;
use crate::{error::AppError, middleware::AppState, repository::DashboardRepository};
use axum::{extract::State, response::IntoResponse};
use std::sync::Arc;

pub async fn stats(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, AppError> {
    let stats = DashboardRepository::new(state.db.clone()).stats().await?;
    Ok(ok(stats))
}
