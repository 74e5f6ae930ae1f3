mod config;
mod error;
mod frame;
mod render;

use std::sync::Arc;

use anyhow::Result;
use axum::{routing::get, Router};
use clap::Parser;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::info;

use crate::config::Config;
use crate::frame::SharedConfig;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .init();

    let config = Config::parse();
    let addr = config.bind;
    info!(base_url = %config.base_url, assets = %config.assets_dir.display(), "加载配置");

    let app = create_routes(Arc::new(config));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "服务器正在监听");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("服务器已停止");
    Ok(())
}

/// 所有路由。牌局状态全部由请求携带，共享的只有只读配置。
fn create_routes(config: SharedConfig) -> Router {
    let assets = ServeDir::new(&config.assets_dir);
    Router::new()
        .route("/healthz", get(health))
        .route("/api", get(frame::frame_get).post(frame::frame_post))
        .route("/api/image", get(frame::frame_image))
        .nest_service("/api/assets", assets)
        .layer(TraceLayer::new_for_http())
        .with_state(config)
}

async fn health() -> &'static str {
    "ok"
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c().await.ok();
    info!("收到退出信号");
}
