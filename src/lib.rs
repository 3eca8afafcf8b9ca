//! KDP Tracker - 图书定价与版税追踪服务
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Royalty Context: 版税与单本利润计算
//! - Pricing Context: 基于竞品的定价建议
//! - Book Context: 图书摘要、价格/评分变动检测
//!
//! 应用层 (application/):
//! - Ports: 端口定义（BookRepository, WatchlistRepository, NotificationRepository, BookSearch）
//! - Commands: CQRS 命令处理器
//! - Queries: CQRS 查询处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API + 静态页面
//! - Persistence: SQLite 存储
//! - Adapters: Google Books 检索客户端

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
