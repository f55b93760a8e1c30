//! Development server for the logistics map single-page app.
//!
//! Assembles the build/serve configuration once at startup, compiles the
//! route table, binds the configured address and answers navigation
//! requests with the view the route table selects.

pub mod admin;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod routing;

pub use config::{assemble, DevServerConfig, EffectiveConfig};
pub use http::DevServer;
pub use lifecycle::Shutdown;
pub use routing::{Resolution, RouteTable, ViewRef};
