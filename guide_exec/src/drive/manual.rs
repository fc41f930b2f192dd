//! Manual driver: direct command to demand mapping with no safety gating.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::warn;

// Internal
use super::{DriveError, DriveParams, DriveReport, DriveStep};
use comms_if::{eqpt::vel::VelCmd, tc::DriveCmd};
use util::{module::State, params, session::Session};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Manual driver module state.
#[derive(Default)]
pub struct ManualDriver {
    pub(crate) params: Option<DriveParams>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl State for ManualDriver {
    type InitData = &'static str;
    type InitError = params::LoadError;

    type InputData = DriveCmd;
    type OutputData = DriveStep;
    type StatusReport = DriveReport;
    type ProcError = DriveError;

    /// Initialise the manual driver.
    ///
    /// Expected init data is the path to the parameter file
    fn init(&mut self, init_data: Self::InitData, _session: &Session)
        -> Result<(), Self::InitError>
    {
        self.params = Some(params::load(init_data)?);

        Ok(())
    }

    /// Map a single command to a demand.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>
    {
        let params = self.params.as_ref().ok_or(DriveError::NotInit)?;

        let mut report = DriveReport::default();

        // Every evaluation starts over from an all-zero demand
        let mut vel = VelCmd::zero();

        match *input_data {
            DriveCmd::Forward => {
                vel.linear_x_ms = params.forward_speed_ms;
            }
            DriveCmd::TurnLeft => {
                vel.linear_x_ms = params.turn_speed_ms;
                vel.angular_z_rads = params.turn_rate_rads;
            }
            DriveCmd::TurnRight => {
                vel.linear_x_ms = params.turn_speed_ms;
                vel.angular_z_rads = -params.turn_rate_rads;
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

    fn driver() -> ManualDriver {
        ManualDriver {
            params: Some(test_params()),
        }
    }

    fn step(cmd: DriveCmd) -> (DriveStep, DriveReport) {
        driver().proc(&cmd).expect("proc should not fail")
    }

    #[test]
    fn test_command_mapping() {
        let table = [
            (DriveCmd::Forward, 0.5, 0.0),
            (DriveCmd::TurnLeft, 0.5, 0.75),
            (DriveCmd::TurnRight, 0.5, -0.75),
            (DriveCmd::Stop, 0.0, 0.0),
        ];

        for &(cmd, linear_x_ms, angular_z_rads) in &table {
            let (out, report) = step(cmd);
            assert_eq!(
                out,
                DriveStep::Publish(VelCmd {
                    linear_x_ms,
                    linear_y_ms: 0.0,
                    angular_z_rads,
                }),
                "wrong demand for {:?}",
                cmd
            );
            assert!(!report.unknown_cmd);
        }
    }

    #[test]
    fn test_unknown_command_demands_stop() {
        let (out, report) = step(DriveCmd::Unknown('q'));

        // An unrecognised token is reported and produces an explicit stop demand, the session
        // keeps running
        assert_eq!(out, DriveStep::Publish(VelCmd::zero()));
        assert!(report.unknown_cmd);
    }

    #[test]
    fn test_switch_mode_ends_session_without_demand() {
        let (out, _) = step(DriveCmd::SwitchMode);
        assert_eq!(out, DriveStep::EndSession);
    }

    #[test]
    fn test_not_init() {
        let mut driver = ManualDriver::default();
        assert!(matches!(
            driver.proc(&DriveCmd::Stop),
            Err(DriveError::NotInit)
        ));
    }
}
