//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;
use crate::domain::book::ChangeThresholds;
use crate::domain::{PricingPolicy, RoyaltyPolicy};

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 环境变量前缀
const ENV_PREFIX: &str = "KDP";

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `KDP_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `KDP_SERVER__PORT=8080`
/// - `KDP_DATABASE__PATH=/data/kdp_tracker.db`
/// - `KDP_ROYALTY__EBOOK_STANDARD_RATE=0.7`
/// - `KDP_TRACKING__PRICE_CHANGE_THRESHOLD=1.0`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 首先设置默认值（最低优先级）；领域参数的默认值由各结构体的 serde(default) 提供
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5000)?
        .set_default("database.path", "data/kdp_tracker.db")?
        .set_default("database.max_connections", 5)?
        .set_default("search.url", "https://www.googleapis.com/books/v1/volumes")?
        .set_default("search.timeout_secs", 10)?
        .set_default("search.max_results", 10)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 添加配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 添加环境变量（最高优先级）
    // 例如: KDP_SEARCH__URL=http://localhost:9000/volumes
    // 注意: 环境变量名会被转换为小写
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.database.path.is_empty() {
        return Err(ConfigError::ValidationError(
            "Database path cannot be empty".to_string(),
        ));
    }

    if config.database.max_connections == 0 {
        return Err(ConfigError::ValidationError(
            "Database max_connections cannot be 0".to_string(),
        ));
    }

    if config.search.url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Search URL cannot be empty".to_string(),
        ));
    }

    // 领域参数：转换即校验
    config
        .royalty
        .to_policy()
        .map_err(ConfigError::ValidationError)?;
    config
        .pricing
        .to_policy()
        .map_err(ConfigError::ValidationError)?;
    config
        .tracking
        .to_thresholds()
        .map_err(ConfigError::ValidationError)?;

    Ok(())
}

/// 已校验的领域参数
#[derive(Debug, Clone)]
pub struct DomainPolicies {
    pub royalty: RoyaltyPolicy,
    pub pricing: PricingPolicy,
    pub thresholds: ChangeThresholds,
}

impl AppConfig {
    /// 转换出领域参数
    pub fn domain_policies(&self) -> Result<DomainPolicies, ConfigError> {
        Ok(DomainPolicies {
            royalty: self
                .royalty
                .to_policy()
                .map_err(ConfigError::ValidationError)?,
            pricing: self
                .pricing
                .to_policy()
                .map_err(ConfigError::ValidationError)?,
            thresholds: self
                .tracking
                .to_thresholds()
                .map_err(ConfigError::ValidationError)?,
        })
    }
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("Public Base URL: {}", config.server.public_base_url());
    if config.server.static_files.enabled {
        tracing::info!("Static Files: {:?}", config.server.static_files.dir);
    }
    tracing::info!("Database: {}", config.database.path);
    tracing::info!("Database Max Connections: {}", config.database.max_connections);
    tracing::info!("Search URL: {}", config.search.url);
    tracing::info!("Search Timeout: {}s", config.search.timeout_secs);
    tracing::info!(
        "Ebook Standard Band: {} - {} at {}",
        config.royalty.ebook_standard_min,
        config.royalty.ebook_standard_max,
        config.royalty.ebook_standard_rate
    );
    tracing::info!("Pricing Market Weight: {}", config.pricing.market_weight);
    tracing::info!(
        "Notify On: price change > {}, rating change >= {}",
        config.tracking.price_change_threshold,
        config.tracking.rating_change_threshold
    );
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
