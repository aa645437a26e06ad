// ==========================================
// 机场运行状态引擎 - 命令行主入口
// ==========================================
// 协议: stdin 每行一个 JSON 命令，stdout 每行一个 JSON 响应
// 日志: stderr
// ==========================================

use anyhow::Context;
use tokio::io::BufReader;

use airport_ops::app::{serve, AppState};
use airport_ops::config::ConfigLoader;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    airport_ops::logging::init();
    airport_ops::perf::configure_from_env();

    tracing::info!("==================================================");
    tracing::info!("{}", airport_ops::APP_NAME);
    tracing::info!("系统版本: {}", airport_ops::VERSION);
    tracing::info!("==================================================");

    let config = ConfigLoader::load().context("加载配置失败")?;
    let state = AppState::new(config).context("初始化AppState失败")?;

    let stdin = BufReader::new(tokio::io::stdin());
    serve(&state, stdin, tokio::io::stdout())
        .await
        .context("命令流读写失败")?;

    tracing::info!("输入结束，退出");
    Ok(())
}
