//! # Actuator Demands

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use crate::{MotionMode, NUM_ARMS};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Absolute position of each arm.
///
/// Zero is the arm at horizontal, positive angles are below horizontal.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct ArmAngles {
    /// Units: radians
    pub pos_rad: [f64; NUM_ARMS],
}

/// One segment of a move, as passed to the motion dispatcher.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SegmentDems {
    /// Target arm angles at the end of the segment.
    pub angles: ArmAngles,

    /// Feed rate to use for this segment, already converted into arm angle space for
    /// interpolated moves.
    pub feed_rate: f64,

    /// The motion mode of the parent move.
    pub motion: MotionMode,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Response from the motion dispatcher for a single segment.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchResponse {
    /// The segment was queued and will be executed
    Accepted,

    /// The segment was discarded, for example by a jog cancel or an e-stop. No further segments
    /// of the move should be sent.
    Cancelled,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl ArmAngles {
    /// Create a new set of arm angles from individual values.
    pub fn new(arm_0_rad: f64, arm_1_rad: f64, arm_2_rad: f64) -> Self {
        Self {
            pos_rad: [arm_0_rad, arm_1_rad, arm_2_rad],
        }
    }

    /// The zero pose, all arms horizontal.
    pub fn zero() -> Self {
        Self::default()
    }
}
