//! Configuration schema definitions.
//!
//! This module defines the on-disk configuration of the dev server and the
//! validated values the assembler produces from it. File-facing types derive
//! Serde traits for deserialization from TOML.

use std::collections::BTreeSet;
use std::fmt;
use std::net::Ipv6Addr;

use serde::{Deserialize, Serialize};

use crate::routing::ViewRef;

/// Host used when no server override is configured.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Port used when no server override is configured.
pub const DEFAULT_PORT: u16 = 5173;

/// Root configuration for the dev server.
///
/// `Default` is the canonical configuration of the logistics map app.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DevServerConfig {
    /// Build plugins, in declaration order.
    pub plugins: Vec<PluginRef>,

    /// Dependency pre-bundling sets.
    pub optimize_deps: OptimizeDeps,

    /// Server binding override. Absent means the default binding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerBindConfig>,

    /// Route declarations, in match order.
    pub routes: Vec<RouteConfig>,

    /// Request handling limits.
    pub runtime: RuntimeConfig,

    /// Logging and metrics settings.
    pub observability: ObservabilityConfig,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            plugins: vec![PluginRef::vue()],
            optimize_deps: OptimizeDeps {
                include: BTreeSet::from(["pbf".to_string()]),
                exclude: BTreeSet::from(["ol".to_string()]),
            },
            server: Some(ServerBindConfig {
                host: "0.0.0.0".to_string(),
                port: u32::from(DEFAULT_PORT),
            }),
            routes: default_routes(),
            runtime: RuntimeConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl DevServerConfig {
    /// The build half of the configuration, as handed to the assembler.
    pub fn build_config(&self) -> BuildConfig {
        BuildConfig {
            plugins: self.plugins.clone(),
            optimize_deps: self.optimize_deps.clone(),
        }
    }

    /// Replace the server override wholesale. `None` keeps the current one.
    pub fn with_server_override(mut self, server: Option<ServerBindConfig>) -> Self {
        if server.is_some() {
            self.server = server;
        }
        self
    }
}

/// The single route the map app declares.
pub fn default_routes() -> Vec<RouteConfig> {
    vec![RouteConfig {
        path: "/".to_string(),
        name: "Map".to_string(),
        view: ViewRef::LogisticsMap,
    }]
}

/// Reference to a build plugin by name (e.g. `"vue"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct PluginRef(String);

impl PluginRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn vue() -> Self {
        Self::new("vue")
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PluginRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Modules the build tool force-includes in or excludes from pre-bundling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct OptimizeDeps {
    pub include: BTreeSet<String>,
    pub exclude: BTreeSet<String>,
}

impl OptimizeDeps {
    pub fn new<I, E>(include: I, exclude: E) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
        E: IntoIterator,
        E::Item: Into<String>,
    {
        Self {
            include: include.into_iter().map(Into::into).collect(),
            exclude: exclude.into_iter().map(Into::into).collect(),
        }
    }
}

/// Build settings the assembler copies into the effective configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct BuildConfig {
    pub plugins: Vec<PluginRef>,
    pub optimize_deps: OptimizeDeps,
}

/// Server binding override as written in the file.
///
/// The port is kept wide so out-of-range values reach validation instead of
/// failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServerBindConfig {
    /// IP literal or hostname (e.g., "0.0.0.0").
    pub host: String,

    /// Listen port, 1-65535.
    pub port: u32,
}

/// Route declaration as written in the file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Absolute path pattern (e.g., "/").
    pub path: String,

    /// Unique route name.
    pub name: String,

    /// View mounted when the route matches.
    pub view: ViewRef,
}

/// Request handling limits.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Maximum requests handled concurrently.
    pub max_concurrent_requests: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
            max_concurrent_requests: 1024,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    pub log_level: String,

    /// Start the Prometheus exporter.
    pub metrics_enabled: bool,

    /// Prometheus exporter bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9464".to_string(),
        }
    }
}

/// A validated listen address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerBinding {
    pub host: String,
    pub port: u16,
}

impl ServerBinding {
    /// Address string accepted by `TcpListener::bind`. Bare IPv6 hosts are
    /// bracketed.
    pub fn socket_addr(&self) -> String {
        if self.host.parse::<Ipv6Addr>().is_ok() {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

impl Default for ServerBinding {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl fmt::Display for ServerBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.socket_addr())
    }
}

/// Output of the assembler: the build settings plus one concrete binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectiveConfig {
    pub plugins: Vec<PluginRef>,
    pub optimize_deps: OptimizeDeps,
    pub server: ServerBinding,
}
