use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use finetune_server::{configuration, logging, routes, AppState};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Override the configured listen port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let _guard = logging::setup_logging(Some("finetuned"))?;

    let cli = Cli::parse();
    let mut settings = configuration::Settings::new()?;
    if let Some(port) = cli.port {
        settings.port = port;
    }

    // Missing upstream credentials abort here, before we accept traffic.
    let state = AppState::from_env()?;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = routes::configure(state).layer(cors);

    let listener = tokio::net::TcpListener::bind(settings.socket_addr()).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
