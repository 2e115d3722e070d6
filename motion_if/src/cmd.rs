//! # Move commands
//!
//! A move command is a single linear Cartesian move, expressed in millimetres in the machine frame.
//! Commands are exchanged as JSON, either one at a time or as a script (a JSON array of moves).

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A commanded linear move.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct MoveCmd {
    /// The target position of the move.
    ///
    /// Units: millimetres,
    /// Frame: Machine
    pub target_mm: Point3<f64>,

    /// The requested Cartesian feed rate.
    ///
    /// Units: millimetres/minute
    pub feed_rate_mm_min: f64,

    /// If true the move is a rapid (non-interpolated) positioning move.
    #[serde(default)]
    pub rapid: bool,
}

/// Planner data accompanying a move.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct PlanLineData {
    /// The requested feed rate of the move.
    pub feed_rate: f64,

    /// How the move shall be executed.
    pub motion: MotionMode,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// The way a move is executed.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionMode {
    /// Maximum speed positioning move, exempt from feed rate compensation.
    Rapid,

    /// Feed rate controlled move.
    Interpolated,
}

/// Possible parsing errors.
#[derive(Debug, Error)]
pub enum CmdParseError {
    #[error("Command contains invalid JSON: {0}")]
    InvalidJson(serde_json::Error),

    #[error("Command has an invalid feed rate ({0}), expected a finite positive value")]
    InvalidFeedRate(f64),

    #[error("Command has a non-finite target position ({0:?})")]
    InvalidTarget(Point3<f64>),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl MoveCmd {
    /// Parse a single move command from JSON.
    pub fn from_json(json_str: &str) -> Result<Self, CmdParseError> {
        let cmd: Self = serde_json::from_str(json_str).map_err(CmdParseError::InvalidJson)?;

        cmd.validate()?;

        Ok(cmd)
    }

    /// Parse a move script, a JSON array of move commands.
    pub fn script_from_json(json_str: &str) -> Result<Vec<Self>, CmdParseError> {
        let cmds: Vec<Self> = serde_json::from_str(json_str).map_err(CmdParseError::InvalidJson)?;

        for cmd in cmds.iter() {
            cmd.validate()?;
        }

        Ok(cmds)
    }

    /// Get the planner data for this move.
    pub fn plan_data(&self) -> PlanLineData {
        PlanLineData {
            feed_rate: self.feed_rate_mm_min,
            motion: match self.rapid {
                true => MotionMode::Rapid,
                false => MotionMode::Interpolated,
            },
        }
    }

    /// Check the command contains usable numbers.
    fn validate(&self) -> Result<(), CmdParseError> {
        if !self.feed_rate_mm_min.is_finite() || self.feed_rate_mm_min <= 0.0 {
            return Err(CmdParseError::InvalidFeedRate(self.feed_rate_mm_min));
        }

        if !self.target_mm.coords.iter().all(|c| c.is_finite()) {
            return Err(CmdParseError::InvalidTarget(self.target_mm));
        }

        Ok(())
    }
}

impl PlanLineData {
    /// Returns true if this is a rapid move.
    pub fn is_rapid(&self) -> bool {
        self.motion == MotionMode::Rapid
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
