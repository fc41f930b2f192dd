//! # Drive module
//!
//! Maps discrete drive commands to velocity demands. Two drivers share the mapping:
//! [`ManualDriver`] applies it directly with no safety gating, [`AssistedDriver`] consults the
//! obstacle monitor's latest ranges first and overrides any command that would move the robot
//! towards a sensed obstacle.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod assisted;
mod manual;
mod params;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use assisted::{AssistedDriver, AssistedInput};
pub use manual::ManualDriver;
pub use params::DriveParams;

use comms_if::eqpt::vel::VelCmd;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Result of stepping a driver with a single command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DriveStep {
    /// Publish this demand and await the next command token.
    Publish(VelCmd),

    /// The session is over, nothing is published.
    EndSession,
}

/// Possible errors that can occur during driver processing.
#[derive(Debug, thiserror::Error)]
pub enum DriveError {
    #[error("Driver parameters are not loaded, init must be called first")]
    NotInit,
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Status report for a single drive step.
#[derive(Debug, Clone, Copy, Default)]
pub struct DriveReport {
    /// The command token was not recognised.
    pub unknown_cmd: bool,

    /// An obstacle override replaced the commanded motion.
    pub override_engaged: bool,
}

// ---------------------------------------------------------------------------
// TEST SUPPORT
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) fn test_params() -> DriveParams {
    DriveParams {
        forward_speed_ms: 0.5,
        turn_speed_ms: 0.5,
        gated_speed_ms: 0.1,
        turn_rate_rads: 0.75,
        obstacle_threshold_m: 1.5,
    }
}
