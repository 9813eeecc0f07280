use anyhow::Context;
use outfit_stylist_api_server::{build_router, config::ServerConfig, AppState};
use outfit_stylist_genai_client::GeminiImageClient;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env().context("failed to load server configuration")?;

    // Optional daily rolling log file next to stdout
    let (file_layer, _log_guard) = match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "api-server.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,outfit_stylist_api_server=debug,api_server=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();

    let client = GeminiImageClient::with_options(
        config.api_key.clone(),
        config.base_url.clone(),
        config.model.clone(),
        config.request_timeout,
    )
    .context("failed to build image service client")?;
    tracing::info!(model = %client.model(), "Image service client ready");

    let app = build_router(AppState::new(Arc::new(client)));

    tracing::info!("Starting API server on {}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
