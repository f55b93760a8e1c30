//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → CLI bind flags replace [server] when given
//!     → assembler.rs (merge build settings with bind override)
//!     → validation.rs (semantic checks)
//!     → PreparedConfig (validated, immutable)
//!     → shared via Arc with the HTTP server
//! ```
//!
//! # Design Decisions
//! - Config is assembled once per process; no reload
//! - All sections have defaults; the default is the canonical map app config
//! - Validation separates syntactic (serde) from semantic checks

pub mod assembler;
pub mod loader;
pub mod schema;
pub mod validation;

pub use assembler::assemble;
pub use loader::{load_config, ConfigError, PreparedConfig};
pub use schema::{
    BuildConfig, DevServerConfig, EffectiveConfig, ObservabilityConfig, OptimizeDeps, PluginRef,
    RouteConfig, RuntimeConfig, ServerBindConfig, ServerBinding,
};
pub use validation::ConfigValidationError;
