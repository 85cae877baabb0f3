use cafe_scout::utils::{logger, validation::Validate};
use cafe_scout::{AppConfig, AppState};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::parse();

    // 初始化日誌
    logger::init_server_logger(config.verbose);

    tracing::info!("Starting cafe-scout server");
    if config.verbose {
        tracing::debug!("Server config: {:?}", config);
    }

    // 驗證配置；金鑰或網址缺漏屬啟動期錯誤，不留到個別請求
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let port = config.port;
    let state = AppState::new(config)?;
    if state.sealer.is_some() {
        tracing::info!("🔐 Sealed-response endpoint enabled");
    }

    let app = cafe_scout::router(state);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;

    tracing::info!("✅ cafe-scout API 啟動於 http://localhost:{}", port);
    axum::serve(listener, app).await?;

    Ok(())
}
