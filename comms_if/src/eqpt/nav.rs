//! # Navigation service messages
//!
//! The navigation service accepts one goal at a time. A goal is submitted with
//! [`NavRequest::Goto`], its progress polled with [`NavRequest::GetState`], and it may be
//! abandoned with [`NavRequest::Cancel`]. The service replies to every request with a single
//! [`NavResponse`].

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A goal submitted to the navigation service.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NavGoal {
    /// Coordinate frame the target position is expressed in.
    pub frame_id: String,

    /// Target position x coordinate in the goal frame.
    ///
    /// Units: meters
    pub x_m: f64,

    /// Target position y coordinate in the goal frame.
    ///
    /// Units: meters
    pub y_m: f64,

    /// Orientation quaternion w component. `1.0` is the default forward heading, which is all
    /// this software ever demands.
    pub orientation_w: f64,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Requests accepted by the navigation service.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub enum NavRequest {
    /// Submit a new goal, replacing any active one.
    Goto(NavGoal),

    /// Query the state of the active goal.
    GetState,

    /// Cancel the active goal, if any.
    Cancel,
}

/// Responses returned by the navigation service.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum NavResponse {
    /// The submitted goal was accepted and is being pursued.
    Accepted,

    /// The submitted goal was refused and will not be pursued.
    Rejected,

    /// The state of the active goal.
    State(NavGoalState),

    /// The cancel request was executed.
    CancelOk,
}

/// Lifecycle state of a navigation goal.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavGoalState {
    /// No goal has been submitted.
    None,

    /// The goal is being pursued.
    Active,

    /// Terminal: the service reports the target position was reached.
    Reached,

    /// Terminal: the service gave up on the goal.
    Aborted,

    /// Terminal: the goal was replaced or canceled on the service side.
    Preempted,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl NavGoalState {
    /// True if the goal is no longer being pursued.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Reached | Self::Aborted | Self::Preempted)
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(!NavGoalState::None.is_terminal());
        assert!(!NavGoalState::Active.is_terminal());
        assert!(NavGoalState::Reached.is_terminal());
        assert!(NavGoalState::Aborted.is_terminal());
        assert!(NavGoalState::Preempted.is_terminal());
    }
}
