//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration
//! - Start the metrics exporter when enabled
//! - Bind the listener and hand it to the HTTP server
//! - Map failures to process exit codes
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal, nothing is partially started
//! - Listener binds last (traffic only when ready)

use std::path::Path;

use metrics_exporter_prometheus::BuildError;
use thiserror::Error;

use crate::config::{load_config, ConfigError, DevServerConfig, PreparedConfig, ServerBindConfig};
use crate::http::DevServer;
use crate::lifecycle::Shutdown;
use crate::net::listener::{self, ListenerError};
use crate::observability::metrics;

/// Exit code for configuration defects.
pub const EXIT_CONFIG: u8 = 2;

/// Exit code for bind and serve failures.
pub const EXIT_RUNTIME: u8 = 1;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Bind(#[from] ListenerError),

    #[error("metrics exporter: {0}")]
    Metrics(#[from] BuildError),

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

impl StartupError {
    pub fn exit_code(&self) -> u8 {
        match self {
            StartupError::Config(_) => EXIT_CONFIG,
            StartupError::Bind(_) | StartupError::Metrics(_) | StartupError::Serve(_) => {
                EXIT_RUNTIME
            }
        }
    }
}

/// Read the config file if one is given, otherwise use the canonical config,
/// then apply a CLI bind override and validate.
pub fn prepare(
    path: Option<&Path>,
    bind_override: Option<ServerBindConfig>,
) -> Result<PreparedConfig, ConfigError> {
    let config = match path {
        Some(path) => load_config(path)?,
        None => DevServerConfig::default(),
    };
    let prepared = config.with_server_override(bind_override).prepare()?;
    Ok(prepared)
}

/// Bind and serve until shutdown.
pub async fn start(prepared: PreparedConfig, shutdown: &Shutdown) -> Result<(), StartupError> {
    if let Some(addr) = prepared.metrics_address {
        metrics::init_metrics(addr)?;
    }

    tracing::info!(
        bind_address = %prepared.effective.server,
        plugins = ?prepared.effective.plugins,
        include = ?prepared.effective.optimize_deps.include,
        exclude = ?prepared.effective.optimize_deps.exclude,
        "Configuration loaded"
    );

    let listener = listener::bind(&prepared.effective.server).await?;
    let server = DevServer::new(prepared);
    server
        .run(listener, shutdown.subscribe())
        .await
        .map_err(StartupError::Serve)
}
