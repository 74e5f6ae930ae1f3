use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

/// 服务器配置，命令行参数优先，其次是环境变量 (支持 .env 文件)
#[derive(Parser, Debug, Clone)]
#[command(name = "wavyjack_server", about = "WavyJack blackjack frame server")]
pub struct Config {
    /// 监听地址
    #[arg(long, env = "WAVYJACK_BIND", default_value = "0.0.0.0:5173")]
    pub bind: SocketAddr,

    /// 对外访问的根地址，用于拼接图片和资源的绝对 URL
    #[arg(long, env = "BASE_URL", default_value = "http://localhost:5173")]
    pub base_url: String,

    /// 卡牌图片所在目录
    #[arg(long, env = "WAVYJACK_ASSETS_DIR", default_value = "./assets")]
    pub assets_dir: PathBuf,

    #[arg(long, env = "WAVYJACK_TITLE", default_value = "WavyJack")]
    pub title: String,
}

impl Config {
    /// 去掉末尾斜杠的根地址
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn asset_url(&self, asset: &str) -> String {
        format!("{}/api/assets/{}", self.base_url(), asset)
    }
}
