//! Configuration Types
//!
//! 定义所有配置结构体。比例与金额在配置文件中写作浮点数，
//! 进入领域前统一转换为 Decimal。

use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;

use crate::domain::book::ChangeThresholds;
use crate::domain::pricing::DefaultPriceTier;
use crate::domain::royalty::RangeRule;
use crate::domain::{PricingPolicy, RoyaltyPolicy};

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 数据库配置
    #[serde(default)]
    pub database: DatabaseConfig,

    /// 外部图书目录检索配置
    #[serde(default)]
    pub search: SearchConfig,

    /// 版税计算参数
    #[serde(default)]
    pub royalty: RoyaltyConfig,

    /// 定价建议参数
    #[serde(default)]
    pub pricing: PricingConfig,

    /// 价格变动通知阈值
    #[serde(default)]
    pub tracking: TrackingConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// f64 配置项转为 Decimal（取最短十进制表示，0.7 -> 0.7）
pub(crate) fn to_decimal(name: &str, value: f64) -> Result<Decimal, String> {
    if !value.is_finite() {
        return Err(format!("{} must be a finite number", name));
    }
    Decimal::from_str(&value.to_string())
        .map_err(|e| format!("{} is not a valid decimal ({}): {}", name, value, e))
}

// ============================================================================
// Server
// ============================================================================

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 公开访问的 Base URL
    /// 如果未设置，则使用 http://{host}:{port}
    #[serde(default)]
    pub base_url: Option<String>,

    /// 静态文件服务配置
    #[serde(default)]
    pub static_files: StaticFilesConfig,
}

/// 静态文件服务配置（前端页面）
#[derive(Debug, Clone, Deserialize)]
pub struct StaticFilesConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_static_dir")]
    pub dir: PathBuf,
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            dir: default_static_dir(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            base_url: None,
            static_files: StaticFilesConfig::default(),
        }
    }
}

impl ServerConfig {
    /// 获取公开的 Base URL
    pub fn public_base_url(&self) -> String {
        self.base_url.clone().unwrap_or_else(|| {
            let host = if self.host == "0.0.0.0" {
                "localhost"
            } else {
                &self.host
            };
            format!("http://{}:{}", host, self.port)
        })
    }
}

// ============================================================================
// Database / Search
// ============================================================================

/// 数据库配置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// 数据库文件路径
    #[serde(default = "default_db_path")]
    pub path: String,

    /// 最大连接数
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_db_path() -> String {
    "data/kdp_tracker.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

/// 外部检索配置
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Google Books volumes 接口
    #[serde(default = "default_search_url")]
    pub url: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_search_timeout")]
    pub timeout_secs: u64,

    /// 每次检索返回的最大条数
    #[serde(default = "default_search_max_results")]
    pub max_results: u32,
}

fn default_search_url() -> String {
    "https://www.googleapis.com/books/v1/volumes".to_string()
}

fn default_search_timeout() -> u64 {
    10
}

fn default_search_max_results() -> u32 {
    10
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            url: default_search_url(),
            timeout_secs: default_search_timeout(),
            max_results: default_search_max_results(),
        }
    }
}

// ============================================================================
// Royalty
// ============================================================================

/// 版税参数
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RoyaltyConfig {
    pub ebook_standard_min: f64,
    pub ebook_standard_max: f64,
    pub ebook_standard_rate: f64,
    pub ebook_reduced_rate: f64,
    /// 每 MB 传输费
    pub delivery_cost_per_mb: f64,
    pub paperback_rate: f64,
    pub hardcover_rate: f64,
    pub ebook_range_multiplier: f64,
    pub ebook_range_ceiling: f64,
    pub paperback_range_multiplier: f64,
    pub paperback_range_ceiling: f64,
    pub hardcover_range_multiplier: f64,
    pub hardcover_range_ceiling: f64,
}

impl Default for RoyaltyConfig {
    fn default() -> Self {
        Self {
            ebook_standard_min: 2.99,
            ebook_standard_max: 9.99,
            ebook_standard_rate: 0.70,
            ebook_reduced_rate: 0.35,
            delivery_cost_per_mb: 0.15,
            paperback_rate: 0.60,
            hardcover_rate: 0.55,
            ebook_range_multiplier: 3.0,
            ebook_range_ceiling: 9.99,
            paperback_range_multiplier: 3.0,
            paperback_range_ceiling: 49.99,
            hardcover_range_multiplier: 4.0,
            hardcover_range_ceiling: 79.99,
        }
    }
}

impl RoyaltyConfig {
    /// 转换为领域政策并校验
    pub fn to_policy(&self) -> Result<RoyaltyPolicy, String> {
        let policy = RoyaltyPolicy {
            ebook_standard_min: to_decimal("royalty.ebook_standard_min", self.ebook_standard_min)?,
            ebook_standard_max: to_decimal("royalty.ebook_standard_max", self.ebook_standard_max)?,
            ebook_standard_rate: to_decimal("royalty.ebook_standard_rate", self.ebook_standard_rate)?,
            ebook_reduced_rate: to_decimal("royalty.ebook_reduced_rate", self.ebook_reduced_rate)?,
            delivery_cost_per_mb: to_decimal(
                "royalty.delivery_cost_per_mb",
                self.delivery_cost_per_mb,
            )?,
            paperback_rate: to_decimal("royalty.paperback_rate", self.paperback_rate)?,
            hardcover_rate: to_decimal("royalty.hardcover_rate", self.hardcover_rate)?,
            ebook_range: RangeRule::new(
                to_decimal("royalty.ebook_range_multiplier", self.ebook_range_multiplier)?,
                to_decimal("royalty.ebook_range_ceiling", self.ebook_range_ceiling)?,
            ),
            paperback_range: RangeRule::new(
                to_decimal("royalty.paperback_range_multiplier", self.paperback_range_multiplier)?,
                to_decimal("royalty.paperback_range_ceiling", self.paperback_range_ceiling)?,
            ),
            hardcover_range: RangeRule::new(
                to_decimal("royalty.hardcover_range_multiplier", self.hardcover_range_multiplier)?,
                to_decimal("royalty.hardcover_range_ceiling", self.hardcover_range_ceiling)?,
            ),
        };
        policy.validate()?;
        Ok(policy)
    }
}

// ============================================================================
// Pricing
// ============================================================================

/// 默认价格档
#[derive(Debug, Clone, Deserialize)]
pub struct PriceTierConfig {
    /// 篇幅严格大于该页数时适用
    pub min_pages: i64,
    pub price: f64,
}

/// 定价建议参数
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    pub market_weight: f64,
    pub rating_threshold: f64,
    pub rating_premium: f64,
    pub rating_discount: f64,
    pub long_page_ratio: f64,
    pub long_page_premium: f64,
    pub short_page_ratio: f64,
    pub short_page_discount: f64,
    pub band: f64,
    pub fallback_band: f64,
    pub price_floor: f64,
    pub default_price: f64,
    pub default_price_tiers: Vec<PriceTierConfig>,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            market_weight: 0.60,
            rating_threshold: 0.5,
            rating_premium: 0.15,
            rating_discount: 0.10,
            long_page_ratio: 1.3,
            long_page_premium: 0.10,
            short_page_ratio: 0.7,
            short_page_discount: 0.05,
            band: 0.15,
            fallback_band: 0.20,
            price_floor: 0.99,
            default_price: 2.99,
            default_price_tiers: vec![
                PriceTierConfig {
                    min_pages: 300,
                    price: 4.99,
                },
                PriceTierConfig {
                    min_pages: 500,
                    price: 9.99,
                },
            ],
        }
    }
}

impl PricingConfig {
    /// 转换为领域政策并校验
    pub fn to_policy(&self) -> Result<PricingPolicy, String> {
        let default_price_tiers = self
            .default_price_tiers
            .iter()
            .map(|tier| {
                Ok(DefaultPriceTier {
                    min_pages: tier.min_pages,
                    price: to_decimal("pricing.default_price_tiers.price", tier.price)?,
                })
            })
            .collect::<Result<Vec<_>, String>>()?;

        let policy = PricingPolicy {
            market_weight: to_decimal("pricing.market_weight", self.market_weight)?,
            rating_threshold: to_decimal("pricing.rating_threshold", self.rating_threshold)?,
            rating_premium: to_decimal("pricing.rating_premium", self.rating_premium)?,
            rating_discount: to_decimal("pricing.rating_discount", self.rating_discount)?,
            long_page_ratio: to_decimal("pricing.long_page_ratio", self.long_page_ratio)?,
            long_page_premium: to_decimal("pricing.long_page_premium", self.long_page_premium)?,
            short_page_ratio: to_decimal("pricing.short_page_ratio", self.short_page_ratio)?,
            short_page_discount: to_decimal(
                "pricing.short_page_discount",
                self.short_page_discount,
            )?,
            band: to_decimal("pricing.band", self.band)?,
            fallback_band: to_decimal("pricing.fallback_band", self.fallback_band)?,
            price_floor: to_decimal("pricing.price_floor", self.price_floor)?,
            default_price: to_decimal("pricing.default_price", self.default_price)?,
            default_price_tiers,
        };
        policy.validate()?;
        Ok(policy)
    }
}

// ============================================================================
// Tracking
// ============================================================================

/// 价格/评分变动通知阈值
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    /// 价格变动超过该值时通知
    pub price_change_threshold: f64,
    /// 评分变动达到该值时通知
    pub rating_change_threshold: f64,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            price_change_threshold: 0.50,
            rating_change_threshold: 0.3,
        }
    }
}

impl TrackingConfig {
    pub fn to_thresholds(&self) -> Result<ChangeThresholds, String> {
        let thresholds = ChangeThresholds {
            price_delta: to_decimal("tracking.price_change_threshold", self.price_change_threshold)?,
            rating_delta: to_decimal(
                "tracking.rating_change_threshold",
                self.rating_change_threshold,
            )?,
        };
        if thresholds.price_delta < Decimal::ZERO || thresholds.rating_delta < Decimal::ZERO {
            return Err("tracking thresholds cannot be negative".to_string());
        }
        Ok(thresholds)
    }
}

// ============================================================================
// Log
// ============================================================================

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
