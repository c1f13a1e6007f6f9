//! LoanScope web server
//!
//! Run with: cargo run -p loanscope-web

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use loanscope_web::config::Config;
use loanscope_web::router::build_router;
use loanscope_web::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("loanscope=debug,info")),
        )
        .init();

    info!("Starting LoanScope...");

    let config = Config::load().context("reading configuration")?;
    let addr = config.server.bind;

    let state = AppState::load(config).await?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
