//! Goal check parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use nalgebra::Point2;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for goal reachability checking.
///
/// The zone table is configuration describing the deployment map's known obstacles, not logic:
/// redeploying in a different environment means editing the parameter file, not the code.
#[derive(Debug, Clone, Deserialize)]
pub struct GoalCheckParams {
    /// Global map bounds on x as `[min, max]`.
    ///
    /// Units: meters
    pub x_lim_m: [f64; 2],

    /// Global map bounds on y as `[min, max]`.
    ///
    /// Units: meters
    pub y_lim_m: [f64; 2],

    /// Known-obstacle exclusion zones.
    pub exclusion_zones: Vec<ExclusionZone>,
}

/// A rectangular exclusion region of the map.
///
/// Each bound is optional; an absent bound leaves the zone unbounded in that direction, which
/// lets a single zone shape express half-planes and bands as well as boxes. Bounds are
/// inclusive.
#[derive(Debug, Clone, Deserialize)]
pub struct ExclusionZone {
    /// Name used when reporting a rejected goal.
    pub name: String,

    /// Lower x bound of the zone, meters.
    pub x_min_m: Option<f64>,

    /// Upper x bound of the zone, meters.
    pub x_max_m: Option<f64>,

    /// Lower y bound of the zone, meters.
    pub y_min_m: Option<f64>,

    /// Upper y bound of the zone, meters.
    pub y_max_m: Option<f64>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ExclusionZone {
    /// True if the target lies inside this zone.
    pub fn contains(&self, target: &Point2<f64>) -> bool {
        self.x_min_m.map_or(true, |min| target.x >= min)
            && self.x_max_m.map_or(true, |max| target.x <= max)
            && self.y_min_m.map_or(true, |min| target.y >= min)
            && self.y_max_m.map_or(true, |max| target.y <= max)
    }
}
