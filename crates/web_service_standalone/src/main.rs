use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use web_service::ServiceConfig;

#[derive(Parser, Debug)]
#[command(name = "forkchat-server", about = "Branching chat history service")]
struct Args {
    /// Listen port (overrides APP_PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Storage base directory (overrides FORKCHAT_DATA_DIR)
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_line_number(true)
                .with_file(false),
        )
        .init();

    let args = Args::parse();
    let mut config = ServiceConfig::from_env();
    if let Some(port) = args.port {
        config = config.with_port(port);
    }
    if let Some(data_dir) = args.data_dir {
        config = config.with_data_dir(data_dir);
    }

    tracing::info!("Starting standalone history service...");

    if let Err(e) = web_service::server::run(config).await {
        tracing::error!("Failed to run history service: {}", e);
        std::process::exit(1);
    }
}
