use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::anyhow;
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::info;

use ivr_relay::{
    ServerConfig,
    server::{self, shutdown_on_ctrl_c},
    state::AppState,
    transport::IvrStreamService,
};

/// IVR relay - bidirectional gRPC audio stream handler
#[derive(Parser, Debug)]
#[command(name = "ivr-relay")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (YAML)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Commands {
    /// Run the gRPC relay, plus the webhook service when enabled (default)
    Serve,

    /// Run only the gRPC relay
    Grpc,

    /// Run only the call-setup webhook service
    Webhook,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists (must be done before config loading)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Serve);

    let mut config = if let Some(config_path) = cli.config {
        println!("Loading configuration from {}", config_path.display());
        ServerConfig::from_file(&config_path).map_err(|e| anyhow!(e.to_string()))?
    } else {
        ServerConfig::from_env().map_err(|e| anyhow!(e.to_string()))?
    };

    if command == Commands::Webhook {
        config.webhook.enabled = true;
        config.validate().map_err(|e| anyhow!(e.to_string()))?;
    }

    let run_grpc = command != Commands::Webhook;
    let run_webhook = config.webhook.enabled && command != Commands::Grpc;

    let shutdown = shutdown_on_ctrl_c();

    let grpc_task = if run_grpc {
        let listener = bind(&config.grpc_address()).await?;
        let service = IvrStreamService::new(config.stream_channel_capacity);
        let token = shutdown.clone();
        Some(tokio::spawn(async move {
            let result = server::serve_grpc(listener, service, token.clone()).await;
            // Bring the other listener down too if this one exits on its own
            token.cancel();
            result
        }))
    } else {
        None
    };

    let webhook_task = if run_webhook {
        let state = AppState::new(&config.webhook).map_err(|e| anyhow!(e.to_string()))?;
        let listener = bind(&config.webhook_address()).await?;
        let token = shutdown.clone();
        Some(tokio::spawn(async move {
            let result = server::serve_webhook(listener, state, token.clone()).await;
            token.cancel();
            result
        }))
    } else {
        None
    };

    if let Some(task) = grpc_task {
        task.await?
            .map_err(|e| anyhow!("gRPC server error: {}", e))?;
    }

    if let Some(task) = webhook_task {
        task.await?
            .map_err(|e| anyhow!("Webhook server error: {}", e))?;
    }

    info!("Shutdown complete");
    Ok(())
}

async fn bind(address: &str) -> anyhow::Result<TcpListener> {
    let socket_addr: SocketAddr = address
        .parse()
        .map_err(|e| anyhow!("Invalid server address '{}': {}", address, e))?;

    TcpListener::bind(socket_addr)
        .await
        .map_err(|e| anyhow!("Failed to bind {}: {}", socket_addr, e))
}
