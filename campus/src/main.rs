mod config;
mod error;
mod server;

use axum::serve;
use config::Config;
use error::Result;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::load()?;

    // 初始化日志
    campus_infra::logging::init(&config.logging.level, config.logging.json)?;
    info!("Starting campus content service...");

    // 初始化应用状态
    let app_state = server::init_app_state(&config).await?;
    info!(backend = ?config.database.backend, "Application state initialized");

    // 创建路由
    let app = campus_web::create_router(app_state, &server::router_config(&config));

    // 启动HTTP服务器
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    serve(listener, app.into_make_service()).await?;

    Ok(())
}
