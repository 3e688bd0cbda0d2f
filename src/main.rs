//! AirPaste - An Ephemeral Text-Sharing Relay
//!
//! This is the main entry point for the AirPaste server.
//! It checks the random source, builds the gateway, and serves HTTP until Ctrl+C.

use airpaste::config::{Config, ConfigAction};
use airpaste::gateway::Gateway;
use airpaste::keys::assert_random_source;
use airpaste::server::serve;
use anyhow::Context;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn print_help() {
    println!(
        r#"
AirPaste - An Ephemeral Text-Sharing Relay

USAGE:
    airpaste [OPTIONS]

OPTIONS:
    -h, --host <HOST>    Host to bind to (default: 127.0.0.1)
    -p, --port <PORT>    Port to listen on (default: $PORT, else 8080)
    -v, --version        Print version information
        --help           Print this help message

EXAMPLES:
    airpaste                       # Start on 127.0.0.1:8080
    PORT=9000 airpaste             # Start on port 9000
    airpaste --host 0.0.0.0        # Listen on all interfaces

USING IT:
    $ curl -d value="some text" http://127.0.0.1:8080/air-copy
    k3v9
    $ curl http://127.0.0.1:8080/air-paste/k3v9
    some text
"#
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command-line arguments and environment
    let config = match Config::load() {
        Ok(ConfigAction::Run(config)) => config,
        Ok(ConfigAction::Help) => {
            print_help();
            return Ok(());
        }
        Ok(ConfigAction::Version) => {
            println!("AirPaste version {}", airpaste::VERSION);
            return Ok(());
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            print_help();
            std::process::exit(1);
        }
    };

    // Set up logging
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    // Refuse to run without a working secure random source
    if let Err(e) = assert_random_source() {
        error!(error = %e, "Secure random source check failed");
        return Err(e).context("cannot start without a secure random source");
    }

    let gateway = Arc::new(Gateway::in_memory());
    info!(version = airpaste::VERSION, "Gateway initialized");

    let listener = TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_address()))?;
    info!("Listening on {}", config.bind_address());

    // Set up graceful shutdown
    let shutdown = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
        info!("Shutdown signal received, stopping server...");
    };

    serve(listener, gateway, shutdown)
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}
