//! # Kinematics library.
//!
//! Converts Cartesian tool-path moves into arm angle moves for the motion dispatcher, and arm
//! angles back into Cartesian positions for status reporting.
//!
//! Backends are selected by name through [`kinematics::build`].

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Backend interface, errors and the backend registry
pub mod kinematics;

/// Parallel delta (three rotary arm) kinematics backend
pub mod delta;

/// Parameters for the kinematics executable
pub mod params;

// ------------------------------------------------------------------------------------------------
// REEXPORTS
// ------------------------------------------------------------------------------------------------

pub use kinematics::{
    KinCtrlError, KinematicError, Kinematics, MotionDispatcher, MoveError, PoseCache, WorkOffset,
};
