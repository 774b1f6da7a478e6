use anyhow::{Context, Result};
use clap::Parser;
use ecos_interpreter::{build_config, router, AppState, Args};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = build_config(&args)?;

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    let state = AppState::from_config(&config).context("failed to build upstream client")?;
    let app = router(Arc::new(state));

    info!(
        addr = %config.listen,
        provider = ?config.provider,
        strategy = ?config.oracle.strategy,
        generator = ?config.oracle.generator,
        convention = ?config.oracle.convention,
        "interpreter service listening"
    );
    let listener = tokio::net::TcpListener::bind(config.listen)
        .await
        .with_context(|| format!("failed to bind {}", config.listen))?;
    axum::serve(listener, app).await?;
    Ok(())
}
