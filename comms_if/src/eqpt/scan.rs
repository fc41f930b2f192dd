//! # Laser scan stream messages

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A single sweep of the range sensor.
///
/// `ranges_m` is ordered by angular step: element `i` is the distance measured at
/// `angle_min_rad + i * angle_increment_rad` about the sensor's vertical axis.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LaserScan {
    /// Angle of the first sample relative to the sensor's forward axis.
    ///
    /// Units: radians
    pub angle_min_rad: f64,

    /// Angular separation between consecutive samples.
    ///
    /// Units: radians
    pub angle_increment_rad: f64,

    /// Maximum measurable range. Samples beyond this distance are reported as non-finite values.
    ///
    /// Units: meters
    pub range_max_m: f64,

    /// Measured distances, one per angular step.
    ///
    /// Units: meters
    pub ranges_m: Vec<f64>,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl LaserScan {
    /// Get the sample at the given angular index, or `None` if the sweep doesn't extend that far.
    pub fn range_at(&self, index: usize) -> Option<f64> {
        self.ranges_m.get(index).copied()
    }
}
