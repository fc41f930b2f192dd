//! Obstacle monitor parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the obstacle monitor.
///
/// The sample indices are configuration matching the physical sensor's angular layout: the
/// sweep starts to the robot's rear right and advances counter-clockwise, so the right bearing
/// sits early in the sweep and the left bearing late.
#[derive(Debug, Clone, Deserialize)]
pub struct ObsMonParams {
    /// Index of the forward bearing sample in the scan sweep.
    pub front_index: usize,

    /// Index of the left bearing sample in the scan sweep.
    pub left_index: usize,

    /// Index of the right bearing sample in the scan sweep.
    pub right_index: usize,
}
