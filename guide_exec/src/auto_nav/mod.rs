//! # Autonomous navigation module
//!
//! Submits a validated goal to the navigation service and awaits bounded-time completion. Each
//! pursuit is one session: `Idle -> Validating -> {Unreachable, Pursuing} -> {Succeeded,
//! TimedOut}`, and every pursuit ends in a terminal [`GoalOutcome`]. One goal per session, no
//! retries: a failed goal is reported once and the session is over.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{info, warn};
use nalgebra::Point2;
use std::thread;
use std::time::{Duration, Instant};

// Internal
use crate::goal_check::GoalCheck;
use crate::nav_client::{NavClientError, NavEndpoint};
use comms_if::eqpt::nav::{NavGoal, NavResponse};
pub use params::AutoNavParams;
use util::params::LoadError;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Terminal outcome of a goal pursuit session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalOutcome {
    /// The target failed validation and was never submitted.
    Unreachable,

    /// The service reported a terminal state within the timeout window.
    ///
    /// The terminal state itself is deliberately not discriminated: any completion notification
    /// within the window counts as success.
    Succeeded,

    /// The timeout elapsed before the service reported completion. The goal has been canceled.
    TimedOut,

    /// The service refused the goal at submission.
    Canceled,
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Autonomous navigator.
pub struct AutoNav {
    params: AutoNavParams,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl AutoNav {
    /// Initialise the navigator from the given parameter file.
    pub fn init(params_path: &str) -> Result<Self, LoadError> {
        Ok(Self {
            params: util::params::load(params_path)?,
        })
    }

    /// Create a navigator from already-loaded parameters.
    pub fn new(params: AutoNavParams) -> Self {
        Self { params }
    }

    /// Pursue the given target, blocking until the session reaches a terminal outcome.
    ///
    /// An unreachable target is rejected before anything is submitted to the service; a
    /// submitted goal is polled until it completes or the timeout elapses, at which point it is
    /// canceled.
    pub fn pursue<N: NavEndpoint>(
        &mut self,
        nav: &mut N,
        goal_check: &GoalCheck,
        target: Point2<f64>,
    ) -> Result<GoalOutcome, NavClientError> {
        // Validate the target before anything is submitted
        if let Some(violation) = goal_check.violation(&target) {
            warn!(
                "Goal ({:.2}, {:.2}) is not reachable ({}), the target will be deleted",
                target.x, target.y, violation
            );
            nav.cancel_goal()?;

            return Ok(GoalOutcome::Unreachable);
        }

        // Build and submit the goal
        let goal = NavGoal {
            frame_id: self.params.frame_id.clone(),
            x_m: target.x,
            y_m: target.y,
            orientation_w: 1.0,
        };

        info!("Sending goal ({:.2}, {:.2})", goal.x_m, goal.y_m);

        match nav.send_goal(&goal)? {
            NavResponse::Accepted => (),
            NavResponse::Rejected => {
                warn!("The navigation service refused the goal");
                return Ok(GoalOutcome::Canceled);
            }
            r => return Err(NavClientError::UnexpectedResponse(r)),
        }

        // Wait for the goal to finish, for up to the configured timeout
        let deadline = Instant::now() + Duration::from_secs_f64(self.params.goal_timeout_s);

        while Instant::now() < deadline {
            let state = nav.goal_state()?;

            if state.is_terminal() {
                info!("Navigation finished ({:?}), the robot has reached the target", state);
                return Ok(GoalOutcome::Succeeded);
            }

            thread::sleep(Duration::from_secs_f64(self.params.state_poll_interval_s));
        }

        // Timed out: cancel the goal so the service doesn't keep driving
        warn!(
            "The robot has not reached the target within {} s, canceling the goal",
            self.params.goal_timeout_s
        );
        nav.cancel_goal()?;

        Ok(GoalOutcome::TimedOut)
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::goal_check::GoalCheckParams;
    use comms_if::eqpt::nav::NavGoalState;

    /// A scripted navigation service which records how it was used.
    struct StubNav {
        submit_response: NavResponse,
        states: Vec<NavGoalState>,

        goals_sent: usize,
        state_polls: usize,
        cancels: usize,
    }

    impl StubNav {
        fn new(submit_response: NavResponse, states: Vec<NavGoalState>) -> Self {
            Self {
                submit_response,
                states,
                goals_sent: 0,
                state_polls: 0,
                cancels: 0,
            }
        }
    }

    impl NavEndpoint for StubNav {
        fn send_goal(&mut self, _goal: &NavGoal) -> Result<NavResponse, NavClientError> {
            self.goals_sent += 1;
            Ok(self.submit_response.clone())
        }

        fn goal_state(&mut self) -> Result<NavGoalState, NavClientError> {
            self.state_polls += 1;
            if self.states.is_empty() {
                Ok(NavGoalState::Active)
            } else {
                Ok(self.states.remove(0))
            }
        }

        fn cancel_goal(&mut self) -> Result<(), NavClientError> {
            self.cancels += 1;
            Ok(())
        }
    }

    fn nav_params(goal_timeout_s: f64) -> AutoNavParams {
        AutoNavParams {
            frame_id: "map".into(),
            goal_timeout_s,
            state_poll_interval_s: 0.001,
        }
    }

    /// An open 10 x 10 map with no zones.
    fn open_map() -> GoalCheck {
        GoalCheck::new(GoalCheckParams {
            x_lim_m: [-5.0, 5.0],
            y_lim_m: [-5.0, 5.0],
            exclusion_zones: Vec::new(),
        })
    }

    #[test]
    fn test_unreachable_target_never_submitted() {
        let mut nav = StubNav::new(NavResponse::Accepted, vec![NavGoalState::Reached]);
        let mut auto_nav = AutoNav::new(nav_params(30.0));

        let start = Instant::now();
        let outcome = auto_nav
            .pursue(&mut nav, &open_map(), Point2::new(10.0, 0.0))
            .unwrap();

        assert_eq!(outcome, GoalOutcome::Unreachable);

        // No goal submitted, no state polled, any pending goal canceled
        assert_eq!(nav.goals_sent, 0);
        assert_eq!(nav.state_polls, 0);
        assert_eq!(nav.cancels, 1);

        // And no timeout wait was incurred
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_reached_within_timeout_succeeds() {
        let mut nav = StubNav::new(
            NavResponse::Accepted,
            vec![NavGoalState::Active, NavGoalState::Reached],
        );
        let mut auto_nav = AutoNav::new(nav_params(30.0));

        let outcome = auto_nav
            .pursue(&mut nav, &open_map(), Point2::new(1.0, 1.0))
            .unwrap();

        assert_eq!(outcome, GoalOutcome::Succeeded);
        assert_eq!(nav.goals_sent, 1);
        assert_eq!(nav.cancels, 0);
    }

    #[test]
    fn test_any_terminal_state_counts_as_success() {
        // The terminal state is deliberately not discriminated: an abort reported within the
        // window is still a completed session
        for terminal in [NavGoalState::Aborted, NavGoalState::Preempted] {
            let mut nav = StubNav::new(NavResponse::Accepted, vec![terminal]);
            let mut auto_nav = AutoNav::new(nav_params(30.0));

            let outcome = auto_nav
                .pursue(&mut nav, &open_map(), Point2::new(1.0, 1.0))
                .unwrap();

            assert_eq!(outcome, GoalOutcome::Succeeded, "for {:?}", terminal);
        }
    }

    #[test]
    fn test_timeout_cancels_goal() {
        // The stub never reports a terminal state, so the short timeout must fire
        let mut nav = StubNav::new(NavResponse::Accepted, Vec::new());
        let mut auto_nav = AutoNav::new(nav_params(0.01));

        let outcome = auto_nav
            .pursue(&mut nav, &open_map(), Point2::new(1.0, 1.0))
            .unwrap();

        assert_eq!(outcome, GoalOutcome::TimedOut);
        assert_eq!(nav.goals_sent, 1);
        assert_eq!(nav.cancels, 1);
        assert!(nav.state_polls > 0);
    }

    #[test]
    fn test_rejected_submission_is_canceled() {
        let mut nav = StubNav::new(NavResponse::Rejected, Vec::new());
        let mut auto_nav = AutoNav::new(nav_params(30.0));

        let outcome = auto_nav
            .pursue(&mut nav, &open_map(), Point2::new(1.0, 1.0))
            .unwrap();

        assert_eq!(outcome, GoalOutcome::Canceled);
        assert_eq!(nav.state_polls, 0);
    }
}
