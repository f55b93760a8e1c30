//! Known views.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A view the route table can mount. Closed set: adding a view means adding
/// a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum ViewRef {
    /// Delivery map with live package positions.
    LogisticsMap,
}

impl ViewRef {
    /// Component name the client bundle registers.
    pub fn component(self) -> &'static str {
        match self {
            ViewRef::LogisticsMap => "LogisticsMap",
        }
    }

    /// DOM id the client mounts the app into.
    pub fn mount_id(self) -> &'static str {
        match self {
            ViewRef::LogisticsMap => "app",
        }
    }

    /// Document title used by the HTML shell.
    pub fn title(self) -> &'static str {
        match self {
            ViewRef::LogisticsMap => "Logistics Map",
        }
    }
}

impl fmt::Display for ViewRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.component())
    }
}
