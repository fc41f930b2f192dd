//! # Velocity demand messages

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Body-frame velocity demand published to the robot base.
///
/// Every field is zero unless a command or monitor rule sets it explicitly, and each decision
/// cycle starts over from [`VelCmd::zero`]. A demand has no persistence across cycles.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct VelCmd {
    /// Forward velocity demand.
    ///
    /// Units: meters/second
    pub linear_x_ms: f64,

    /// Lateral velocity demand. The base is non-holonomic so this is always zero.
    ///
    /// Units: meters/second
    pub linear_y_ms: f64,

    /// Yaw rate demand, following the right hand rule about the body Z+ (upwards) axis, so that
    /// positive rates turn the robot to the left.
    ///
    /// Units: radians/second
    pub angular_z_rads: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl VelCmd {
    /// An all-zero demand, bringing the robot to a stop.
    pub fn zero() -> Self {
        Self::default()
    }
}
