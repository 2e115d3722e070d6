//! # Motion interface crate.
//!
//! Provides the data structures exchanged between the kinematics backend and
//! its neighbours: the command source above it and the motion dispatcher
//! below it.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Commanded moves and the planner data that accompanies them
pub mod cmd;

/// Actuator demands sent to the motion dispatcher
pub mod dems;

// ------------------------------------------------------------------------------------------------
// REEXPORTS
// ------------------------------------------------------------------------------------------------

pub use cmd::*;
pub use dems::*;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// The number of actuated arms on the machine.
pub const NUM_ARMS: usize = 3;
