//! Autonomous navigation parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the autonomous navigator.
#[derive(Debug, Clone, Deserialize)]
pub struct AutoNavParams {
    /// Coordinate frame goals are expressed in.
    pub frame_id: String,

    /// Time to wait for the navigation service to complete a goal before canceling it.
    ///
    /// Units: seconds
    pub goal_timeout_s: f64,

    /// Interval between goal state polls while waiting for completion.
    ///
    /// Units: seconds
    pub state_poll_interval_s: f64,
}
