use catalog_infra::database::DatabaseSettings;
use catalog_infra::security::{parse_rules, RateLimitRuleError};
use catalog_web::RateLimitPolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub rate_limit: RateLimitConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 1000,
            host: "0.0.0.0".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    /// 单次存储操作的超时时间
    pub operation_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://.database/data_source.db?mode=rwc".to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 5,
            operation_timeout_secs: 5,
        }
    }
}

impl DatabaseConfig {
    pub fn settings(&self) -> DatabaseSettings {
        DatabaseSettings {
            url: self.url.clone(),
            max_connections: self.max_connections,
            min_connections: self.min_connections,
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
        }
    }

    pub fn operation_timeout(&self) -> Duration {
        Duration::from_secs(self.operation_timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    pub enabled: bool,
    /// 按客户端计数，所有路由共享
    pub default_limits: Vec<String>,
    /// 按路由和客户端计数，在默认限制之外额外生效
    pub route_limits: Vec<String>,
    pub max_entries: usize,
    pub trust_forwarded_headers: bool,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            default_limits: vec!["200 per day".to_string(), "50 per hour".to_string()],
            route_limits: vec!["1 per second".to_string()],
            max_entries: 10_000,
            trust_forwarded_headers: false,
        }
    }
}

impl RateLimitConfig {
    pub fn policy(&self) -> Result<RateLimitPolicy, RateLimitRuleError> {
        Ok(RateLimitPolicy {
            enabled: self.enabled,
            default_rules: parse_rules(&self.default_limits)?,
            route_rules: parse_rules(&self.route_limits)?,
            trust_forwarded_headers: self.trust_forwarded_headers,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// EnvFilter指令，`RUST_LOG` 优先
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        // 如果存在.env文件，先加载到环境变量
        let _ = dotenv::dotenv();

        let home_dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        let config_path = home_dir.join(".catalog").join("catalog.toml");

        let config = Self::builder()?
            .add_source(config::File::with_name("catalog.toml").required(false))
            .add_source(config::File::from(config_path.as_path()).required(false))
            .add_source(
                config::Environment::with_prefix("CATALOG")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(";")
                    .with_list_parse_key("rate_limit.default_limits")
                    .with_list_parse_key("rate_limit.route_limits"),
            )
            .build()?;
        config.try_deserialize()
    }

    /// 以内置默认值为底的配置构建器
    fn builder(
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
        Ok(config::Config::builder().add_source(config::Config::try_from(&Config::default())?))
    }
}
