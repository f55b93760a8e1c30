//! Logistics map dev server.
//!
//! # Architecture Overview
//!
//! ```text
//!   map-dev-server.toml ──▶ config::loader ──▶ config::assembler ──▶ EffectiveConfig
//!   (optional)                                       ▲                    │
//!   --host/--port ───────────────────────────────────┘                    ▼
//!                                                                  net::listener
//!                                                                         │
//!   Browser navigation ──▶ http::server ──▶ routing::RouteTable ──────────┘
//!                              │                  │
//!                              │                  ├─ Matched  → HTML shell (200)
//!                              │                  └─ NotFound → 404
//!                              └─ /__dev/*  → admin introspection (JSON)
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use serde_json::json;

use map_dev_server::config::{ConfigError, PreparedConfig, ServerBindConfig};
use map_dev_server::lifecycle::startup::{self, EXIT_CONFIG, EXIT_RUNTIME};
use map_dev_server::lifecycle::{Shutdown, StartupError};
use map_dev_server::observability::logging::init_logging;
use map_dev_server::routing::Resolution;

/// Exit code for `resolve` when no route matches.
const EXIT_NOT_FOUND: u8 = 3;

#[derive(Parser)]
#[command(name = "map-dev-server")]
#[command(version, about = "Development server for the logistics map app", long_about = None)]
struct Cli {
    /// TOML configuration file. Without one the built-in config is used.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    bind: BindArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Bind override. Both flags together replace the configured binding.
#[derive(Args)]
struct BindArgs {
    /// Listen host (IP literal or hostname).
    #[arg(long, global = true, requires = "port")]
    host: Option<String>,

    /// Listen port.
    #[arg(long, global = true, requires = "host")]
    port: Option<u32>,
}

impl BindArgs {
    fn into_override(self) -> Option<ServerBindConfig> {
        match (self.host, self.port) {
            (Some(host), Some(port)) => Some(ServerBindConfig { host, port }),
            _ => None,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Start the dev server (default)
    Serve,
    /// Validate the configuration and print the effective config
    Check,
    /// Print the route table
    Routes,
    /// Resolve one navigation path against the route table
    Resolve {
        /// Absolute path, e.g. "/"
        path: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Serve);

    let prepared = match startup::prepare(cli.config.as_deref(), cli.bind.into_override()) {
        Ok(prepared) => prepared,
        Err(e) => return report_config_error(&e),
    };

    match command {
        Commands::Serve => serve(prepared).await,
        Commands::Check => print_json(&json!({
            "effective": prepared.effective,
            "runtime": prepared.runtime,
        })),
        Commands::Routes => {
            let routes: Vec<_> = prepared
                .routes
                .entries()
                .iter()
                .map(|e| json!({ "name": e.name, "path": e.pattern(), "view": e.view }))
                .collect();
            print_json(&routes)
        }
        Commands::Resolve { path } => match prepared.routes.resolve(&path) {
            Resolution::Matched(entry) => print_json(&json!({
                "path": path,
                "route": entry.name,
                "view": entry.view,
            })),
            Resolution::NotFound => {
                eprintln!("{path}: no matching route");
                ExitCode::from(EXIT_NOT_FOUND)
            }
        },
    }
}

async fn serve(prepared: PreparedConfig) -> ExitCode {
    init_logging(&prepared.observability);
    tracing::info!("map-dev-server v{} starting", env!("CARGO_PKG_VERSION"));

    let shutdown = Shutdown::new();
    match startup::start(prepared, &shutdown).await {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            report_startup_error(&e)
        }
    }
}

fn report_config_error(e: &ConfigError) -> ExitCode {
    eprintln!("error: {e}");
    ExitCode::from(EXIT_CONFIG)
}

fn report_startup_error(e: &StartupError) -> ExitCode {
    eprintln!("error: {e}");
    ExitCode::from(e.exit_code())
}

fn print_json<T: serde::Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(text) => {
            println!("{text}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(EXIT_RUNTIME)
        }
    }
}
