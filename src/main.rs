//! KDP Tracker - 图书定价与版税追踪服务
//!
//! 启动流程：配置 -> 日志 -> 数据库 -> 适配器 -> HTTP 服务

use std::sync::Arc;

use kdp_tracker::config::{load_config, print_config, LogConfig};
use kdp_tracker::domain::{PricingAdvisor, RoyaltyCalculator};
use kdp_tracker::infrastructure::adapters::{GoogleBooksClient, GoogleBooksClientConfig};
use kdp_tracker::infrastructure::http::{AppState, DomainServices, HttpServer, ServerConfig};
use kdp_tracker::infrastructure::persistence::sqlite::{
    create_pool, run_migrations, DatabaseConfig, SqliteBookRepository,
    SqliteNotificationRepository, SqliteWatchlistRepository,
};

fn init_tracing(log: &LogConfig) {
    let log_filter = format!(
        "{},kdp_tracker={},tower_http=debug,sqlx=warn",
        log.level, log.level
    );
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config.log);

    tracing::info!("KDP Tracker - 图书定价与版税追踪服务");
    print_config(&config);

    let policies = config
        .domain_policies()
        .map_err(|e| anyhow::anyhow!("Invalid domain parameters: {}", e))?;

    // 确保数据目录存在
    if let Some(parent) = std::path::Path::new(&config.database.path).parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    // 初始化数据库
    let db_config = DatabaseConfig::new(&config.database.path, config.database.max_connections);
    let pool = create_pool(&db_config).await?;
    run_migrations(&pool).await?;

    // 创建 Repository 适配器
    let book_repo = Arc::new(SqliteBookRepository::new(pool.clone()));
    let notification_repo = Arc::new(SqliteNotificationRepository::new(pool.clone()));
    let watchlist_repo = Arc::new(SqliteWatchlistRepository::new(pool.clone()));

    // 创建图书检索客户端
    let search_config = GoogleBooksClientConfig {
        api_url: config.search.url.clone(),
        timeout_secs: config.search.timeout_secs,
    };
    let book_search = Arc::new(GoogleBooksClient::new(search_config)?);

    let services = DomainServices {
        royalty: RoyaltyCalculator::new(policies.royalty),
        pricing: PricingAdvisor::new(policies.pricing),
        thresholds: policies.thresholds,
        search_max_results: config.search.max_results,
    };

    let state = AppState::new(
        book_repo,
        notification_repo,
        watchlist_repo,
        book_search,
        services,
    );

    // 创建 HTTP 服务器
    let mut server_config = ServerConfig::new(&config.server.host, config.server.port);
    if config.server.static_files.enabled {
        server_config = server_config.with_static_dir(config.server.static_files.dir.clone());
    }
    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
