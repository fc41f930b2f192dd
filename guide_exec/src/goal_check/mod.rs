//! # Goal check module
//!
//! Classifies a target coordinate as reachable or unreachable against the known obstacle map.
//! The map is a global bounding box plus a declarative list of named exclusion zones loaded
//! from the parameter file; a target is reachable iff it lies inside the box and inside no
//! zone. The check is a pure function of the target: no side effects, deterministic, defined
//! for all finite inputs.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::Point2;
use std::fmt::Display;

// Internal
pub use params::{ExclusionZone, GoalCheckParams};
use util::params::LoadError;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Goal reachability checker.
pub struct GoalCheck {
    params: GoalCheckParams,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The reason a target is not reachable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalViolation {
    /// The target lies outside the global map bounds.
    OutOfBounds,

    /// The target lies inside the named exclusion zone.
    Zone(String),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl GoalCheck {
    /// Initialise the checker from the given parameter file.
    pub fn init(params_path: &str) -> Result<Self, LoadError> {
        Ok(Self {
            params: util::params::load(params_path)?,
        })
    }

    /// Create a checker from already-loaded parameters.
    pub fn new(params: GoalCheckParams) -> Self {
        Self { params }
    }

    /// True if the target is reachable.
    pub fn is_reachable(&self, target: &Point2<f64>) -> bool {
        self.violation(target).is_none()
    }

    /// Get the reason the target is not reachable, or `None` if it is.
    ///
    /// The bounding box is checked first, then the zones in table order; the first violation
    /// wins.
    pub fn violation(&self, target: &Point2<f64>) -> Option<GoalViolation> {
        let [x_min, x_max] = self.params.x_lim_m;
        let [y_min, y_max] = self.params.y_lim_m;

        if target.x < x_min || target.x > x_max || target.y < y_min || target.y > y_max {
            return Some(GoalViolation::OutOfBounds);
        }

        self.params
            .exclusion_zones
            .iter()
            .find(|zone| zone.contains(target))
            .map(|zone| GoalViolation::Zone(zone.name.clone()))
    }
}

impl Display for GoalViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GoalViolation::OutOfBounds => write!(f, "outside the map bounds"),
            GoalViolation::Zone(name) => write!(f, "inside the {} exclusion zone", name),
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    /// The zone table shipped with the software, for the survey map the robot deploys in.
    fn map_check() -> GoalCheck {
        let params: GoalCheckParams =
            toml::from_str(include_str!("../../../params/goal_check.toml"))
                .expect("shipped goal_check.toml must parse");
        GoalCheck::new(params)
    }

    fn zone(
        name: &str,
        x_min_m: Option<f64>,
        x_max_m: Option<f64>,
        y_min_m: Option<f64>,
        y_max_m: Option<f64>,
    ) -> ExclusionZone {
        ExclusionZone {
            name: name.into(),
            x_min_m,
            x_max_m,
            y_min_m,
            y_max_m,
        }
    }

    #[test]
    fn test_out_of_bounds_is_unreachable() {
        let check = map_check();

        // One point beyond each edge of the box, plus far field corners
        for &(x, y) in &[
            (-5.1, 0.0),
            (5.1, 0.0),
            (-4.0, -8.1),
            (-4.0, 8.3),
            (10.0, 0.0),
            (-100.0, 100.0),
        ] {
            assert_eq!(
                check.violation(&Point2::new(x, y)),
                Some(GoalViolation::OutOfBounds),
                "({}, {}) should be out of bounds",
                x,
                y
            );
        }
    }

    #[test]
    fn test_known_points_against_shipped_table() {
        let check = map_check();

        // Inside the wall band at x = 1, y > 0
        assert!(!check.is_reachable(&Point2::new(1.0, 0.1)));

        // Open floor in the south west
        assert!(check.is_reachable(&Point2::new(-4.0, -4.0)));

        // A few more known free positions
        assert!(check.is_reachable(&Point2::new(-4.0, 4.0)));
        assert!(check.is_reachable(&Point2::new(0.5, -3.0)));

        // And known obstructed ones
        assert!(!check.is_reachable(&Point2::new(0.0, -6.5)));
        assert!(!check.is_reachable(&Point2::new(3.0, 3.0)));
        assert!(!check.is_reachable(&Point2::new(2.5, -2.0)));
    }

    #[test]
    fn test_violation_names_the_zone() {
        let check = map_check();

        match check.violation(&Point2::new(3.0, 3.0)) {
            Some(GoalViolation::Zone(_)) => (),
            v => panic!("expected a zone violation, got {:?}", v),
        }
    }

    #[test]
    fn test_zone_band_unbounded_directions() {
        // A half-plane: everything left of x = -2 between two y values
        let z = zone("west_wall", None, Some(-2.0), Some(0.0), Some(0.8));

        assert!(z.contains(&Point2::new(-3.0, 0.4)));
        assert!(z.contains(&Point2::new(-100.0, 0.8)));
        assert!(!z.contains(&Point2::new(-1.9, 0.4)));
        assert!(!z.contains(&Point2::new(-3.0, 0.9)));
    }

    #[test]
    fn test_zone_degenerate_band() {
        // A wall of zero thickness at x = 1, extending upwards
        let z = zone("wall", Some(1.0), Some(1.0), Some(0.0), None);

        assert!(z.contains(&Point2::new(1.0, 0.1)));
        assert!(z.contains(&Point2::new(1.0, 100.0)));
        assert!(!z.contains(&Point2::new(1.1, 0.1)));
        assert!(!z.contains(&Point2::new(1.0, -0.1)));
    }

    #[test]
    fn test_unbounded_zone_contains_everything() {
        let z = zone("everywhere", None, None, None, None);

        assert!(z.contains(&Point2::new(0.0, 0.0)));
        assert!(z.contains(&Point2::new(-1e9, 1e9)));
    }
}
