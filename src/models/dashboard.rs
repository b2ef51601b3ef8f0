//! Dashboard aggregate counts

use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize, sqlx::FromRow)]
pub struct DashboardStats {
    pub services_total: i64,
    pub services_active: i64,
    pub blogs_total: i64,
    pub blogs_published: i64,
    pub page_sections: i64,
    pub settings: i64,
    pub admins_total: i64,
    pub admins_active: i64,
}
