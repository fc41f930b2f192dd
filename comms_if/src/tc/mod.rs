//! # Console command tokens
//!
//! The guide executable is driven by single-character tokens read from a line-oriented console.
//! `a`/`m`/`c` select the guide mode for the next session, the remaining tokens are drive
//! commands decoded by [`DriveCmd::from_token`].

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::fmt::Display;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// The guide mode selected at the top-level prompt.
///
/// A mode is selected once per session and cannot change mid-session; a
/// [`DriveCmd::SwitchMode`] command ends the session and returns to the mode prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuideMode {
    /// The robot autonomously drives itself to a target coordinate via the navigation service.
    Autonomous,

    /// The user drives the robot from the console with no safety gating.
    Manual,

    /// The user drives the robot from the console with obstacle-gated overrides.
    Assisted,
}

/// A discrete drive command decoded from a single input token.
///
/// `Unknown` is a terminal classification for an unrecognised token, not an error: the command
/// is reported and the session continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveCmd {
    /// Drive the robot on a straight line.
    Forward,

    /// Turn the robot to the left.
    TurnLeft,

    /// Turn the robot to the right.
    TurnRight,

    /// Stop the robot.
    Stop,

    /// End the session and return to the mode prompt.
    SwitchMode,

    /// Any token not in the command table, carried for reporting.
    Unknown(char),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl GuideMode {
    /// Decode a mode selection token, or `None` for an unrecognised token.
    pub fn from_token(token: char) -> Option<Self> {
        match token {
            'a' => Some(GuideMode::Autonomous),
            'm' => Some(GuideMode::Manual),
            'c' => Some(GuideMode::Assisted),
            _ => None,
        }
    }
}

impl Display for GuideMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GuideMode::Autonomous => write!(f, "autonomous"),
            GuideMode::Manual => write!(f, "manual"),
            GuideMode::Assisted => write!(f, "assisted"),
        }
    }
}

impl DriveCmd {
    /// Decode a drive command token.
    pub fn from_token(token: char) -> Self {
        match token {
            '+' => DriveCmd::Forward,
            'l' => DriveCmd::TurnLeft,
            'r' => DriveCmd::TurnRight,
            's' => DriveCmd::Stop,
            '.' => DriveCmd::SwitchMode,
            other => DriveCmd::Unknown(other),
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_mode_tokens() {
        assert_eq!(GuideMode::from_token('a'), Some(GuideMode::Autonomous));
        assert_eq!(GuideMode::from_token('m'), Some(GuideMode::Manual));
        assert_eq!(GuideMode::from_token('c'), Some(GuideMode::Assisted));

        // Anything else, including drive tokens, is not a mode
        assert_eq!(GuideMode::from_token('+'), None);
        assert_eq!(GuideMode::from_token('x'), None);
        assert_eq!(GuideMode::from_token('A'), None);
    }

    #[test]
    fn test_drive_tokens() {
        assert_eq!(DriveCmd::from_token('+'), DriveCmd::Forward);
        assert_eq!(DriveCmd::from_token('l'), DriveCmd::TurnLeft);
        assert_eq!(DriveCmd::from_token('r'), DriveCmd::TurnRight);
        assert_eq!(DriveCmd::from_token('s'), DriveCmd::Stop);
        assert_eq!(DriveCmd::from_token('.'), DriveCmd::SwitchMode);

        // Unrecognised tokens are classified, not rejected
        assert_eq!(DriveCmd::from_token('q'), DriveCmd::Unknown('q'));
        assert_eq!(DriveCmd::from_token('L'), DriveCmd::Unknown('L'));
    }
}
