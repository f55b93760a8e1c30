//! Configuration loading from disk and preparation for startup.

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::assembler::assemble;
use crate::config::schema::{DevServerConfig, EffectiveConfig, ObservabilityConfig, RuntimeConfig};
use crate::config::validation::{validate_observability, validate_runtime, ConfigValidationError};
use crate::routing::RouteTable;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Validation(#[from] ConfigValidationError),
}

/// Everything the server needs, validated and immutable.
#[derive(Debug)]
pub struct PreparedConfig {
    pub effective: EffectiveConfig,
    pub routes: RouteTable,
    pub runtime: RuntimeConfig,
    pub observability: ObservabilityConfig,
    /// Exporter address, present only when metrics are enabled.
    pub metrics_address: Option<SocketAddr>,
}

/// Load a configuration file. Semantic validation happens in [`DevServerConfig::prepare`].
pub fn load_config(path: &Path) -> Result<DevServerConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: DevServerConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), routes = config.routes.len(), "Configuration file loaded");
    Ok(config)
}

impl DevServerConfig {
    /// Assemble the effective config and compile the route table.
    pub fn prepare(&self) -> Result<PreparedConfig, ConfigValidationError> {
        let effective = assemble(&self.build_config(), self.server.as_ref())?;
        validate_runtime(&self.runtime)?;
        let metrics_address = validate_observability(&self.observability)?;
        let routes = RouteTable::from_config(&self.routes)?;

        Ok(PreparedConfig {
            effective,
            routes,
            runtime: self.runtime.clone(),
            observability: self.observability.clone(),
            metrics_address,
        })
    }
}
