//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Navigation request (path)
//!     → router.rs (route lookup)
//!     → matcher.rs (evaluate pattern)
//!     → Return: Matched(entry) → view.rs (view to mount) or NotFound
//!
//! Route Compilation (at startup):
//!     RouteConfig[]
//!     → Validate patterns and names
//!     → Compile matchers
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Deterministic: same input always matches same route
//! - First match wins (declaration order)

pub mod matcher;
pub mod router;
pub mod view;

pub use router::{Resolution, RouteEntry, RouteTable};
pub use view::ViewRef;
