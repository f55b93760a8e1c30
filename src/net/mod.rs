//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! EffectiveConfig.server (host, port)
//!     → listener.rs (resolve & bind)
//!     → Hand off to HTTP layer (axum::serve)
//! ```

pub mod listener;
