//! wirekv - A Minimal Key-Value Server over a Binary Protocol
//!
//! This is the main entry point for the wirekv server.
//! It sets up the TCP listener, the store, and handles incoming connections.

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use wirekv::storage::Store;

/// Server configuration
struct Config {
    /// Host to bind to
    host: String,
    /// Port to listen on
    port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: wirekv::DEFAULT_HOST.to_string(),
            port: wirekv::DEFAULT_PORT,
        }
    }
}

impl Config {
    /// Parse configuration from command-line arguments
    fn from_args() -> Self {
        let mut config = Config::default();
        let args: Vec<String> = std::env::args().collect();

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--host" | "-h" => {
                    if i + 1 < args.len() {
                        config.host = args[i + 1].clone();
                        i += 2;
                    } else {
                        eprintln!("Error: --host requires a value");
                        std::process::exit(1);
                    }
                }
                "--port" | "-p" => {
                    if i + 1 < args.len() {
                        config.port = args[i + 1].parse().unwrap_or_else(|_| {
                            eprintln!("Error: invalid port number");
                            std::process::exit(1);
                        });
                        i += 2;
                    } else {
                        eprintln!("Error: --port requires a value");
                        std::process::exit(1);
                    }
                }
                "--help" => {
                    print_help();
                    std::process::exit(0);
                }
                "--version" | "-v" => {
                    println!("wirekv version {}", wirekv::VERSION);
                    std::process::exit(0);
                }
                _ => {
                    eprintln!("Unknown argument: {}", args[i]);
                    print_help();
                    std::process::exit(1);
                }
            }
        }

        config
    }

    /// Returns the bind address as a string
    fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn print_help() {
    println!(
        r#"
wirekv - A Minimal Key-Value Server over a Binary Protocol

USAGE:
    wirekv [OPTIONS]

OPTIONS:
    -h, --host <HOST>    Host to bind to (default: 127.0.0.1)
    -p, --port <PORT>    Port to listen on (default: 7700)
    -v, --version        Print version information
        --help           Print this help message

EXAMPLES:
    wirekv                        # Start on 127.0.0.1:7700
    wirekv --port 7800            # Start on port 7800
    wirekv --host 0.0.0.0         # Listen on all interfaces

CONNECTING:
    Use the bundled client to talk to the server:
    $ wirekv-cli set name wirekv
    OK
    $ wirekv-cli get name
    OK wirekv
"#
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command-line arguments
    let config = Config::from_args();

    // Set up logging
    let _subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    // Create the store (shared across all connections)
    let store = Arc::new(Store::new());

    // Bind the TCP listener
    let listener = TcpListener::bind(config.bind_address()).await?;
    info!("wirekv v{} listening on {}", wirekv::VERSION, config.bind_address());

    // Set up graceful shutdown
    let shutdown = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
        info!("Shutdown signal received, stopping server...");
    };

    tokio::select! {
        _ = wirekv::server::run(listener, store) => {}
        _ = shutdown => {}
    }

    info!("Server shutdown complete");
    Ok(())
}
