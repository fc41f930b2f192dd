//! Executable-level parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Network endpoints for the executable's equipment connections.
#[derive(Debug, Clone, Deserialize)]
pub struct GuideExecParams {
    /// Endpoint the range sensor publishes its scan stream on (SUB, connect).
    pub scan_endpoint: String,

    /// Endpoint velocity demands are published on (PUB, bind).
    pub vel_endpoint: String,

    /// Endpoint of the navigation service (REQ, connect).
    pub nav_endpoint: String,
}
