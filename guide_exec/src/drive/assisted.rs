//! Assisted driver: the manual mapping gated by the obstacle monitor.
//!
//! When the commanded motion points at a bearing the monitor reports as obstructed the command
//! is overridden rather than refused: a blocked forward becomes a stop, a blocked turn becomes
//! a turn away from the obstructed side. The robot prefers yielding away from a sensed obstacle
//! over continuing towards open space it is less sure about, so every assisted turn also runs
//! at the reduced gated speed.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{info, warn};

// Internal
use super::{DriveError, DriveParams, DriveReport, DriveStep};
use crate::obs_mon::RangeReading;
use comms_if::{eqpt::vel::VelCmd, tc::DriveCmd};
use util::{module::State, params, session::Session};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Input to an assisted drive step.
pub struct AssistedInput {
    /// The command to execute.
    pub cmd: DriveCmd,

    /// Snapshot of the obstacle monitor's latest ranges.
    pub ranges: RangeReading,
}

/// Assisted driver module state.
#[derive(Default)]
pub struct AssistedDriver {
    pub(crate) params: Option<DriveParams>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl State for AssistedDriver {
    type InitData = &'static str;
    type InitError = params::LoadError;

    type InputData = AssistedInput;
    type OutputData = DriveStep;
    type StatusReport = DriveReport;
    type ProcError = DriveError;

    /// Initialise the assisted driver.
    ///
    /// Expected init data is the path to the parameter file
    fn init(&mut self, init_data: Self::InitData, _session: &Session)
        -> Result<(), Self::InitError>
    {
        self.params = Some(params::load(init_data)?);

        Ok(())
    }

    /// Map a single command to a demand, applying the obstacle overrides.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>
    {
        let params = self.params.as_ref().ok_or(DriveError::NotInit)?;

        let mut report = DriveReport::default();

        // Every evaluation starts over from an all-zero demand
        let mut vel = VelCmd::zero();

        match input_data.cmd {
            DriveCmd::Forward => {
                if input_data.ranges.front_m < params.obstacle_threshold_m {
                    // Hold position, the demand stays all-zero
                    info!(
                        "Obstacle {:.2} m ahead, the robot can't move forward",
                        input_data.ranges.front_m
                    );
                    report.override_engaged = true;
                } else {
                    vel.linear_x_ms = params.forward_speed_ms;
                }
            }
            DriveCmd::TurnLeft => {
                vel.linear_x_ms = params.gated_speed_ms;

                if input_data.ranges.left_m < params.obstacle_threshold_m {
                    // Yield away from the obstructed side
                    info!(
                        "Obstacle {:.2} m on the left, turning right instead",
                        input_data.ranges.left_m
                    );
                    vel.angular_z_rads = -params.turn_rate_rads;
                    report.override_engaged = true;
                } else {
                    vel.angular_z_rads = params.turn_rate_rads;
                }
            }
            DriveCmd::TurnRight => {
                vel.linear_x_ms = params.gated_speed_ms;

                if input_data.ranges.right_m < params.obstacle_threshold_m {
                    // Yield away from the obstructed side
                    info!(
                        "Obstacle {:.2} m on the right, turning left instead",
                        input_data.ranges.right_m
                    );
                    vel.angular_z_rads = params.turn_rate_rads;
                    report.override_engaged = true;
                } else {
                    vel.angular_z_rads = -params.turn_rate_rads;
                }
            }
            DriveCmd::Stop => (),
            DriveCmd::SwitchMode => {
                return Ok((DriveStep::EndSession, report));
            }
            DriveCmd::Unknown(token) => {
                // Not an error: report it and demand a stop, the session continues
                warn!("Unknown command: {}", token);
                report.unknown_cmd = true;
            }
        }

        Ok((DriveStep::Publish(vel), report))
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::drive::test_params;

    fn driver() -> AssistedDriver {
        AssistedDriver {
            params: Some(test_params()),
        }
    }

    fn ranges(front_m: f64, left_m: f64, right_m: f64) -> RangeReading {
        RangeReading {
            front_m,
            left_m,
            right_m,
        }
    }

    fn step(cmd: DriveCmd, ranges: RangeReading) -> (DriveStep, DriveReport) {
        driver()
            .proc(&AssistedInput { cmd, ranges })
            .expect("proc should not fail")
    }

    fn demand(step: DriveStep) -> VelCmd {
        match step {
            DriveStep::Publish(vel) => vel,
            DriveStep::EndSession => panic!("expected a published demand"),
        }
    }

    #[test]
    fn test_forward_blocked_holds_position() {
        let (out, report) = step(DriveCmd::Forward, ranges(1.0, 9.0, 9.0));

        assert_eq!(demand(out), VelCmd::zero());
        assert!(report.override_engaged);
    }

    #[test]
    fn test_forward_clear_proceeds() {
        let (out, report) = step(DriveCmd::Forward, ranges(2.0, 9.0, 9.0));

        let vel = demand(out);
        assert_eq!(vel.linear_x_ms, 0.5);
        assert_eq!(vel.angular_z_rads, 0.0);
        assert!(!report.override_engaged);
    }

    #[test]
    fn test_turn_left_blocked_turns_right() {
        let (out, report) = step(DriveCmd::TurnLeft, ranges(9.0, 1.0, 9.0));

        let vel = demand(out);
        assert_eq!(vel.linear_x_ms, 0.1);
        assert_eq!(vel.angular_z_rads, -0.75);
        assert!(report.override_engaged);
    }

    #[test]
    fn test_turn_left_clear_at_gated_speed() {
        let (out, report) = step(DriveCmd::TurnLeft, ranges(9.0, 2.0, 9.0));

        let vel = demand(out);
        assert_eq!(vel.linear_x_ms, 0.1);
        assert_eq!(vel.angular_z_rads, 0.75);
        assert!(!report.override_engaged);
    }

    #[test]
    fn test_turn_right_blocked_turns_left() {
        let (out, report) = step(DriveCmd::TurnRight, ranges(9.0, 9.0, 1.0));

        let vel = demand(out);
        assert_eq!(vel.linear_x_ms, 0.1);
        assert_eq!(vel.angular_z_rads, 0.75);
        assert!(report.override_engaged);
    }

    #[test]
    fn test_turn_right_clear_at_gated_speed() {
        let (out, _) = step(DriveCmd::TurnRight, ranges(9.0, 9.0, 2.0));

        let vel = demand(out);
        assert_eq!(vel.linear_x_ms, 0.1);
        assert_eq!(vel.angular_z_rads, -0.75);
    }

    #[test]
    fn test_sentinel_ranges_never_gate() {
        // Before the first sweep all bearings read as infinitely far, so no override can engage
        let (out, report) = step(DriveCmd::Forward, RangeReading::default());

        assert_eq!(demand(out).linear_x_ms, 0.5);
        assert!(!report.override_engaged);
    }

    #[test]
    fn test_stop_unknown_and_switch_match_manual() {
        let blocked = ranges(1.0, 1.0, 1.0);

        let (out, _) = step(DriveCmd::Stop, blocked);
        assert_eq!(demand(out), VelCmd::zero());

        let (out, report) = step(DriveCmd::Unknown('x'), blocked);
        assert_eq!(demand(out), VelCmd::zero());
        assert!(report.unknown_cmd);

        let (out, _) = step(DriveCmd::SwitchMode, blocked);
        assert_eq!(out, DriveStep::EndSession);
    }
}
