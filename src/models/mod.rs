//! 数据模型模块

use once_cell::sync::Lazy;
use regex::Regex;

pub mod admin;
pub mod auth;
pub mod blog;
pub mod dashboard;
pub mod media;
pub mod page_content;
pub mod service;
pub mod setting;

/// URL slug: lowercase words joined by single dashes
pub static SLUG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("valid slug regex"));

/// Setting key: `contact_email`, `seo.default_title`
pub static SETTING_KEY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z][a-z0-9_]*(?:\.[a-z][a-z0-9_]*)*$").expect("valid setting key regex")
});

/// Admin list pagination
#[derive(Debug, serde::Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

pub(crate) fn default_limit() -> i64 {
    50
}

/// 反序列化时去掉首尾空白，校验规则作用于去空白后的值
pub(crate) fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = <String as serde::Deserialize>::deserialize(deserializer)?;
    Ok(s.trim().to_string())
}

pub(crate) fn trimmed_opt<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = <Option<String> as serde::Deserialize>::deserialize(deserializer)?;
    Ok(s.map(|s| s.trim().to_string()))
}

/// 可置空字段：缺省为 `None`（不修改），`null` 为 `Some(None)`（清空），有值为 `Some(Some(v))`
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::Deserialize<'de>,
{
    <Option<T> as serde::Deserialize>::deserialize(deserializer).map(Some)
}

/// 限制分页参数范围
pub fn clamp_page(limit: i64, offset: i64) -> (i64, i64) {
    (limit.clamp(1, 200), offset.max(0))
}
