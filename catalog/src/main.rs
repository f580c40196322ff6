mod config;
mod error;
mod server;

use axum::serve;
use catalog_infra::database::DatabaseManager;
use crate::config::Config;
use crate::error::Result;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::load()?;

    // 初始化日志
    catalog_infra::logging::init(&config.logging.level, config.logging.json)?;
    info!("Starting catalog service...");

    // 初始化数据库连接并执行迁移
    let db_manager = DatabaseManager::connect(&config.database.settings()).await?;
    db_manager.migrate().await?;
    info!("Database ready");

    // 初始化应用状态
    let app_state = server::init_app_state(&config, &db_manager)?;

    // 创建路由
    let app = catalog_web::create_router(app_state);

    // 启动HTTP服务器
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| format!("Invalid address: {}", e))?;

    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(server::shutdown_signal())
    .await?;

    info!("Catalog service stopped");
    Ok(())
}
