//! Drive parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Speed table and safety threshold shared by the drivers.
#[derive(Debug, Clone, Deserialize)]
pub struct DriveParams {
    /// Linear speed of an ungated forward command.
    ///
    /// Units: meters/second
    pub forward_speed_ms: f64,

    /// Linear speed of an ungated turn command.
    ///
    /// Units: meters/second
    pub turn_speed_ms: f64,

    /// Linear speed of an assisted turn, overridden or not. Lower than the ungated turn speed:
    /// while turns are being gated the robot trades speed for safety margin.
    ///
    /// Units: meters/second
    pub gated_speed_ms: f64,

    /// Magnitude of the yaw rate demand for turn commands.
    ///
    /// Units: radians/second
    pub turn_rate_rads: f64,

    /// Range below which a bearing counts as obstructed.
    ///
    /// Units: meters
    pub obstacle_threshold_m: f64,
}
