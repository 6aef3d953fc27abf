//! Binary entry point: load configuration, wire the state, serve.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use greenroom::api::{start_server, AppState};
use greenroom::config::Settings;
use greenroom::providers::{LlmProvider, OpenAiProvider};

#[derive(Parser)]
#[command(name = "greenroom", version, about = "AI interview copilot backend")]
struct Cli {
    /// Host to bind to (overrides GREENROOM_BIND).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides GREENROOM_PORT).
    #[arg(long)]
    port: Option<u16>,

    /// Directory with a built frontend, served on every non-API path.
    #[arg(long)]
    static_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("greenroom=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();
    let mut settings = Settings::from_env().context("failed to load settings")?;
    if let Some(host) = cli.host {
        settings.bind = host;
    }
    if let Some(port) = cli.port {
        settings.port = port;
    }
    settings
        .require_api_key()
        .context("greenroom cannot answer questions without a model API key")?;

    let provider =
        Arc::new(OpenAiProvider::new(settings.openai_api_key.clone())) as Arc<dyn LlmProvider>;
    let state = AppState::new(settings, provider);

    start_server(state, cli.static_dir)
        .await
        .context("server exited with an error")?;
    Ok(())
}
