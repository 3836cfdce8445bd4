//! minimvc binary
//!
//! # Architecture Overview
//!
//! ```text
//!     config file ──▶ config ──▶ lifecycle::startup
//!                                   │
//!                    SCAN ─▶ INSTANTIATE ─▶ INJECT ─▶ COMPILE_ROUTES
//!                                   │
//!                                   ▼
//!     Client Request ──▶ http server ──▶ dispatch ──▶ controller method
//!     Client Response ◀────────────── outcome ◀────────────┘
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tokio::net::TcpListener;

use minimvc::config::load_or_default;
use minimvc::lifecycle::{Application, Shutdown};
use minimvc::observability::{logging, metrics};
use minimvc::{demo, HttpServer};

#[derive(Parser)]
#[command(name = "minimvc")]
#[command(about = "Minimal MVC request-dispatch engine", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured bind address
    #[arg(short, long)]
    bind: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve,
    /// Print the compiled route table and exit
    Routes {
        /// Emit JSON instead of plain lines
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct RouteRow {
    pattern: String,
    handler: String,
    arity: usize,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_or_default(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init(&config.observability.log_level);
    tracing::info!("minimvc v{} starting", env!("CARGO_PKG_VERSION"));

    let app = Application::bootstrap(&demo::catalog(), &config.context)?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Routes { json } => print_routes(&app, json)?,
        Commands::Serve => {
            if config.observability.metrics_enabled {
                match config.observability.metrics_address.parse() {
                    Ok(addr) => metrics::init_metrics(addr),
                    Err(_) => tracing::error!(
                        metrics_address = %config.observability.metrics_address,
                        "Failed to parse metrics address"
                    ),
                }
            }

            let listener = TcpListener::bind(&config.listener.bind_address).await?;
            tracing::info!(address = %listener.local_addr()?, "Listening for connections");

            let shutdown = Shutdown::new();
            HttpServer::new(app).run(listener, shutdown.subscribe()).await?;
            tracing::info!("Shutdown complete");
        }
    }

    Ok(())
}

fn print_routes(app: &Application, json: bool) -> Result<(), serde_json::Error> {
    let rows: Vec<RouteRow> = app
        .routes()
        .routes()
        .iter()
        .map(|route| RouteRow {
            pattern: route.pattern.as_str().to_string(),
            handler: route.handler_name(),
            arity: route.arity(),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        for row in &rows {
            println!("{:<32} {} ({} args)", row.pattern, row.handler, row.arity);
        }
    }
    Ok(())
}
