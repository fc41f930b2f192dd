//! # Guide manager module
//!
//! This module implements the top-level mode dispatch loop. The manager owns the session
//! context (console input, obstacle monitor handle, drivers, navigator, goal checker and
//! velocity publisher) and hands the foreground to one guide mode at a time:
//!
//! - `Autonomous` - the user enters a target coordinate and the navigator pursues it; the
//!   session ends when the pursuit reaches a terminal outcome.
//! - `Manual` - drive commands are mapped straight to demands; the session ends on the switch
//!   mode command.
//! - `Assisted` - as manual but with the obstacle monitor gating each command.
//!
//! The obstacle monitor updates in the background throughout, independent of the active mode.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, info, warn};
use nalgebra::Point2;

// Internal
use crate::auto_nav::{AutoNav, GoalOutcome};
use crate::cmd_input::{CmdInput, CmdInputError};
use crate::drive::{AssistedDriver, AssistedInput, DriveStep, ManualDriver};
use crate::goal_check::GoalCheck;
use crate::nav_client::NavClient;
use crate::obs_mon::ObsMon;
use crate::vel_pub::VelPub;
use comms_if::{
    eqpt::vel::VelCmd,
    tc::{DriveCmd, GuideMode},
};
use util::module::State;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Prompt shown when awaiting a mode token.
const MODE_PROMPT: &str = "guide> ";

/// Prompt shown when awaiting a drive token.
const DRIVE_PROMPT: &str = "drive> ";

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Guide manager: owns the session context and runs the mode dispatch loop.
pub struct GuideMgr {
    input: CmdInput,
    obs_mon: ObsMon,
    vel_pub: VelPub,
    nav_client: NavClient,
    goal_check: GoalCheck,
    auto_nav: AutoNav,
    manual: ManualDriver,
    assisted: AssistedDriver,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur in the guide manager.
#[derive(Debug, thiserror::Error)]
pub enum GuideMgrError {
    #[error("Console input error: {0}")]
    InputError(#[from] CmdInputError),
}

/// How a mode session ended.
enum SessionEnd {
    /// The session finished normally, return to the mode prompt.
    ModeSwitch,

    /// The console input closed, shut the executable down.
    InputClosed,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl GuideMgr {
    /// Create a new manager owning the given, already initialised, components.
    pub fn new(
        input: CmdInput,
        obs_mon: ObsMon,
        vel_pub: VelPub,
        nav_client: NavClient,
        goal_check: GoalCheck,
        auto_nav: AutoNav,
        manual: ManualDriver,
        assisted: AssistedDriver,
    ) -> Self {
        Self {
            input,
            obs_mon,
            vel_pub,
            nav_client,
            goal_check,
            auto_nav,
            manual,
            assisted,
        }
    }

    /// Run the mode dispatch loop until the console input closes.
    pub fn run(&mut self) -> Result<(), GuideMgrError> {
        loop {
            info!(
                "Choose how to move: 'a' for autonomous guide, 'm' for manual guide, \
                'c' for assisted guide"
            );

            let token = match self.input.read_token(MODE_PROMPT)? {
                Some(token) => token,
                None => break,
            };

            // An unknown mode token is not fatal, just prompt again
            let mode = match GuideMode::from_token(token) {
                Some(mode) => mode,
                None => {
                    warn!("Unknown guide mode '{}'", token);
                    continue;
                }
            };

            info!("Starting {} session", mode);

            let end = match mode {
                GuideMode::Autonomous => self.run_autonomous()?,
                GuideMode::Manual => self.run_manual()?,
                GuideMode::Assisted => self.run_assisted()?,
            };

            match end {
                SessionEnd::ModeSwitch => (),
                SessionEnd::InputClosed => break,
            }
        }

        info!("Console input closed, stopping");

        Ok(())
    }

    /// Shut the manager down, stopping the obstacle monitor.
    pub fn shutdown(self) {
        self.obs_mon.stop();
    }

    /// Run one autonomous session: read a target, pursue it to a terminal outcome.
    fn run_autonomous(&mut self) -> Result<SessionEnd, GuideMgrError> {
        info!("Where do you want the robot to go?");

        let x_m = match self.input.read_f64("x = ")? {
            Some(value) => value,
            None => return Ok(SessionEnd::InputClosed),
        };
        let y_m = match self.input.read_f64("y = ")? {
            Some(value) => value,
            None => return Ok(SessionEnd::InputClosed),
        };

        let outcome = self.auto_nav.pursue(
            &mut self.nav_client,
            &self.goal_check,
            Point2::new(x_m, y_m),
        );

        // Every outcome ends the session; failures are reported, not propagated
        match outcome {
            Ok(GoalOutcome::Succeeded) => info!("Autonomous session complete"),
            Ok(GoalOutcome::Unreachable) => info!("Autonomous session ended, goal unreachable"),
            Ok(GoalOutcome::TimedOut) => info!("Autonomous session ended, goal timed out"),
            Ok(GoalOutcome::Canceled) => info!("Autonomous session ended, goal canceled"),
            Err(e) => warn!("Autonomous session failed: {}", e),
        }

        Ok(SessionEnd::ModeSwitch)
    }

    /// Run one manual session: map each command straight to a demand.
    fn run_manual(&mut self) -> Result<SessionEnd, GuideMgrError> {
        print_drive_help();

        loop {
            let cmd = match self.read_drive_cmd()? {
                Some(cmd) => cmd,
                None => return Ok(SessionEnd::InputClosed),
            };

            let step = match self.manual.proc(&cmd) {
                Ok((step, report)) => {
                    debug!("ManualDriver report: {:?}", report);
                    step
                }
                Err(e) => {
                    warn!("ManualDriver error: {}", e);
                    continue;
                }
            };

            match step {
                DriveStep::Publish(vel) => self.publish_vel(&vel),
                DriveStep::EndSession => return Ok(SessionEnd::ModeSwitch),
            }
        }
    }

    /// Run one assisted session: gate each command with the monitor's latest ranges.
    fn run_assisted(&mut self) -> Result<SessionEnd, GuideMgrError> {
        print_drive_help();

        loop {
            let cmd = match self.read_drive_cmd()? {
                Some(cmd) => cmd,
                None => return Ok(SessionEnd::InputClosed),
            };

            // Snapshot the ranges at evaluation time, not at read time: the monitor may have
            // updated while we were blocked on the console
            let input = AssistedInput {
                cmd,
                ranges: self.obs_mon.current(),
            };

            let step = match self.assisted.proc(&input) {
                Ok((step, report)) => {
                    debug!("AssistedDriver report: {:?}", report);
                    step
                }
                Err(e) => {
                    warn!("AssistedDriver error: {}", e);
                    continue;
                }
            };

            match step {
                DriveStep::Publish(vel) => self.publish_vel(&vel),
                DriveStep::EndSession => return Ok(SessionEnd::ModeSwitch),
            }
        }
    }

    /// Read and decode the next drive command token.
    fn read_drive_cmd(&mut self) -> Result<Option<DriveCmd>, GuideMgrError> {
        Ok(self
            .input
            .read_token(DRIVE_PROMPT)?
            .map(DriveCmd::from_token))
    }

    /// Publish a demand, reporting rather than propagating a failed publish.
    fn publish_vel(&mut self, vel: &VelCmd) {
        if let Err(e) = self.vel_pub.publish(vel) {
            warn!("Could not publish the velocity demand: {}", e);
        }
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Print the drive command help for the manual and assisted sessions.
fn print_drive_help() {
    info!(
        "Type a command and then press enter: use '+' to move forward, 'l' to turn left, \
        'r' to turn right, 's' to stop the robot, '.' to change the guide mode"
    );
}
