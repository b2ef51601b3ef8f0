//! 配置系统
//! 从环境变量加载所有配置，使用 Secret 包装敏感信息

use config::{Config, ConfigError, Environment};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址，例如 "0.0.0.0:3000"
    pub addr: String,
    /// 优雅关闭超时时间（秒）
    pub graceful_shutdown_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// 数据库连接 URL（使用 Secret 包装，防止日志泄露）
    pub url: Secret<String>,
    pub max_connections: u32,
    pub min_connections: u32,
    /// 获取连接超时时间（秒）
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别: trace, debug, info, warn, error
    pub level: String,
    /// 日志格式: json, pretty
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    /// JWT 签名密钥（至少 32 字符）
    pub jwt_secret: Secret<String>,
    /// 会话令牌有效期（秒），默认 7 天
    pub token_ttl_secs: u64,
    /// admin_token cookie 是否带 Secure 标记（HTTPS 部署时开启）
    pub cookie_secure: bool,
    pub password_min_length: usize,
    pub password_require_uppercase: bool,
    pub password_require_digit: bool,
    pub password_require_special: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// 允许携带凭据访问的前端来源，逗号分隔
    pub allowed_origins: Vec<String>,
}

/// 第三方媒体托管（Cloudinary 兼容接口）
#[derive(Debug, Clone, Deserialize)]
pub struct MediaConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: Secret<String>,
    /// 默认上传目录
    pub folder: String,
    pub api_base_url: String,
    /// 单个文件上限（字节）
    pub max_upload_bytes: usize,
    /// 上游请求超时（秒）
    pub request_timeout_secs: u64,
}

impl MediaConfig {
    /// 三项凭据齐全才允许代理上传
    pub fn is_configured(&self) -> bool {
        !self.cloud_name.is_empty()
            && !self.api_key.is_empty()
            && !self.api_secret.expose_secret().is_empty()
    }
}

/// 启动时确保存在的初始管理员
#[derive(Debug, Clone, Deserialize)]
pub struct SeedConfig {
    pub email: String,
    pub username: String,
    pub password: Secret<String>,
    pub display_name: Option<String>,
    #[serde(default = "default_seed_role")]
    pub role: String,
}

fn default_seed_role() -> String {
    "superadmin".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub security: SecurityConfig,
    pub cors: CorsConfig,
    pub media: MediaConfig,
    pub seed: Option<SeedConfig>,
}

const MIN_TOKEN_TTL_SECS: u64 = 60;
const MAX_TOKEN_TTL_SECS: u64 = 30 * 24 * 3600;

impl AppConfig {
    /// 从环境变量加载配置（前缀 CMS_，层级分隔符 __）
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut settings = Config::builder();

        settings = settings
            .set_default("server.addr", "0.0.0.0:3000")?
            .set_default("server.graceful_shutdown_timeout_secs", 30)?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("database.acquire_timeout_secs", 30)?
            .set_default("database.idle_timeout_secs", 600)?
            .set_default("database.max_lifetime_secs", 1800)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "json")?
            .set_default("security.jwt_secret", "change-this-secret-in-production-min-32-chars!")?
            .set_default("security.token_ttl_secs", 7 * 24 * 3600)?
            .set_default("security.cookie_secure", false)?
            .set_default("security.password_min_length", 8)?
            .set_default("security.password_require_uppercase", true)?
            .set_default("security.password_require_digit", true)?
            .set_default("security.password_require_special", false)?
            .set_default("cors.allowed_origins", Vec::<String>::new())?
            .set_default("media.cloud_name", "")?
            .set_default("media.api_key", "")?
            .set_default("media.api_secret", "")?
            .set_default("media.folder", "biosciences")?
            .set_default("media.api_base_url", "https://api.cloudinary.com/v1_1")?
            .set_default("media.max_upload_bytes", 10 * 1024 * 1024)?
            .set_default("media.request_timeout_secs", 30)?;

        settings = settings.add_source(
            Environment::with_prefix("CMS")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("cors.allowed_origins")
                .try_parsing(true),
        );

        let config: AppConfig = settings.build()?.try_deserialize()?;

        config.validate()?;

        Ok(config)
    }

    /// 验证配置合法性
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(port_str) = self.server.addr.split(':').next_back() {
            if let Ok(port) = port_str.parse::<u16>() {
                if port != 0 && port < 1024 {
                    return Err(ConfigError::Message("Server port should be >= 1024".to_string()));
                }
            }
        }

        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::Message(format!(
                    "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                    self.logging.level
                )))
            }
        }

        match self.logging.format.to_lowercase().as_str() {
            "json" | "pretty" => {}
            _ => {
                return Err(ConfigError::Message(format!(
                    "Invalid log format: {}. Must be one of: json, pretty",
                    self.logging.format
                )))
            }
        }

        if self.database.max_connections < self.database.min_connections {
            return Err(ConfigError::Message(
                "max_connections must be >= min_connections".to_string(),
            ));
        }

        if self.security.jwt_secret.expose_secret().len() < 32 {
            return Err(ConfigError::Message(
                "JWT secret must be at least 32 characters long".to_string(),
            ));
        }

        if self.security.token_ttl_secs < MIN_TOKEN_TTL_SECS
            || self.security.token_ttl_secs > MAX_TOKEN_TTL_SECS
        {
            return Err(ConfigError::Message(
                "token_ttl_secs must be between 60 and 2592000 (1 minute to 30 days)".to_string(),
            ));
        }

        if self.security.password_min_length < 6 || self.security.password_min_length > 128 {
            return Err(ConfigError::Message(
                "password_min_length must be between 6 and 128".to_string(),
            ));
        }

        if self.cors.allowed_origins.iter().any(|o| o.trim() == "*") {
            // 携带 cookie 的跨域请求不能使用通配来源
            return Err(ConfigError::Message(
                "cors.allowed_origins must list explicit origins, '*' is not allowed".to_string(),
            ));
        }

        if self.media.max_upload_bytes == 0 {
            return Err(ConfigError::Message("media.max_upload_bytes must be > 0".to_string()));
        }

        if let Some(seed) = &self.seed {
            if crate::models::admin::AdminRole::parse(&seed.role).is_none() {
                return Err(ConfigError::Message(format!(
                    "Invalid seed role: {}. Must be one of: admin, superadmin",
                    seed.role
                )));
            }
        }

        Ok(())
    }
}
