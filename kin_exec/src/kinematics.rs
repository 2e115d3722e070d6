//! # Kinematics backend interface
//!
//! Every kinematics backend implements [`Kinematics`] and is registered by name in [`BACKENDS`],
//! allowing the machine configuration to select the backend with a string identifier.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use nalgebra::{Point3, Vector3};
use serde::Serialize;

// Internal
use crate::delta::{ParallelDelta, ParamsError};
use motion_if::{ArmAngles, DispatchResponse, PlanLineData, SegmentDems};

// ------------------------------------------------------------------------------------------------
// TYPES
// ------------------------------------------------------------------------------------------------

/// Function building a backend from its parameter table.
pub type BuildFn = fn(&toml::Value) -> Result<Box<dyn Kinematics>, KinCtrlError>;

// ------------------------------------------------------------------------------------------------
// STATICS
// ------------------------------------------------------------------------------------------------

/// All registered kinematics backends.
pub static BACKENDS: [(&str, BuildFn); 1] = [(ParallelDelta::NAME, build_parallel_delta)];

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// A kinematics backend.
pub trait Kinematics {
    /// The registry name of the backend.
    fn name(&self) -> &'static str;

    /// Initialise the backend.
    ///
    /// Resets the pose cache and reports the backend's startup diagnostics. Initialisation never
    /// fails, geometry problems found here are only logged.
    fn init(&mut self);

    /// Convert a linear Cartesian move into arm angle segments and pass them to the dispatcher.
    ///
    /// ## Arguments
    /// - `target` - The Cartesian target of the move
    /// - `plan` - The planner data (feed rate and motion mode) of the move
    /// - `position` - The currently tracked Cartesian position
    /// - `offset` - Provider of the active work coordinate offset
    /// - `dispatcher` - Where the segments are sent
    ///
    /// On error no further segments are dispatched, but segments already dispatched are not
    /// rolled back.
    fn cartesian_to_motors(
        &mut self,
        target: &Point3<f64>,
        plan: &PlanLineData,
        position: &Point3<f64>,
        offset: &dyn WorkOffset,
        dispatcher: &mut dyn MotionDispatcher,
    ) -> Result<(), MoveError>;

    /// Convert arm angles into a Cartesian position.
    fn motors_to_cartesian(&self, angles: &ArmAngles) -> Result<Point3<f64>, KinematicError>;

    /// The last accepted pose.
    fn pose(&self) -> PoseCache;
}

/// The downstream motion queue which executes arm angle segments.
pub trait MotionDispatcher {
    /// Queue a single segment.
    ///
    /// May block while the queue is full. Returns [`DispatchResponse::Cancelled`] if the segment
    /// was discarded.
    fn move_motors(&mut self, dems: &SegmentDems) -> DispatchResponse;
}

/// Provider of the active work coordinate offset.
pub trait WorkOffset {
    /// The offset added to the tracked position before a move is segmented.
    ///
    /// Units: millimetres
    fn coord_offset_mm(&self) -> Vector3<f64>;
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// The last pose accepted by the motion dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PoseCache {
    /// Arm angles at the end of the last accepted segment.
    pub angles: ArmAngles,

    /// Cartesian position at the end of the last accepted segment.
    ///
    /// Units: millimetres
    pub cartesian_mm: Point3<f64>,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Errors produced by the kinematic solvers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, thiserror::Error)]
pub enum KinematicError {
    #[error("No arm position can reach the point")]
    OutOfRange,

    #[error("Arm angle is beyond the maximum negative angle")]
    AngleTooNegative,

    #[error("Arm angle is beyond the maximum positive angle")]
    AngleTooPositive,

    #[error("Forward kinematics has no real solution")]
    ForwardSolve,
}

/// Reasons a commanded move was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("Start position is invalid: {0}")]
    StartUnreachable(KinematicError),

    #[error("Target is unreachable: {0}")]
    TargetUnreachable(KinematicError),

    #[error("Segment {segment} of the move is unreachable: {error}")]
    SegmentUnreachable {
        segment: usize,
        error: KinematicError,
    },

    #[error("Move cancelled by the dispatcher at segment {segment}")]
    Cancelled { segment: usize },
}

/// Errors which can occur while building a backend.
#[derive(Debug, thiserror::Error)]
pub enum KinCtrlError {
    #[error("No kinematics backend named \"{0}\" is registered")]
    UnknownBackend(String),

    #[error("Invalid kinematics parameters: {0}")]
    InvalidParams(ParamsError),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for PoseCache {
    fn default() -> Self {
        Self {
            angles: ArmAngles::zero(),
            cartesian_mm: Point3::origin(),
        }
    }
}

impl MoveError {
    /// Number of segments the dispatcher accepted before the move stopped.
    ///
    /// Non zero only for moves which stopped part way, in which case the machine is at the last
    /// accepted segment rather than at the start of the move.
    pub fn segments_dispatched(&self) -> usize {
        match self {
            MoveError::StartUnreachable(_) | MoveError::TargetUnreachable(_) => 0,
            MoveError::SegmentUnreachable { segment, .. } | MoveError::Cancelled { segment } => {
                segment - 1
            }
        }
    }
}

impl WorkOffset for Vector3<f64> {
    fn coord_offset_mm(&self) -> Vector3<f64> {
        *self
    }
}

// ------------------------------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Build the backend registered under `name` from its parameter table.
pub fn build(name: &str, params: &toml::Value) -> Result<Box<dyn Kinematics>, KinCtrlError> {
    match BACKENDS.iter().find(|(n, _)| *n == name) {
        Some((_, build_fn)) => build_fn(params),
        None => Err(KinCtrlError::UnknownBackend(name.to_string())),
    }
}

/// Names of all registered backends.
pub fn names() -> Vec<&'static str> {
    BACKENDS.iter().map(|(n, _)| *n).collect()
}

// ------------------------------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ------------------------------------------------------------------------------------------------

fn build_parallel_delta(params: &toml::Value) -> Result<Box<dyn Kinematics>, KinCtrlError> {
    let delta = ParallelDelta::from_value(params).map_err(KinCtrlError::InvalidParams)?;

    Ok(Box::new(delta))
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_build_by_name() {
        let params: toml::Value = toml::from_str(
            r#"
            crank_mm = 100.0
            linkage_mm = 200.0
            base_triangle_mm = 100.0
            end_effector_triangle_mm = 50.0
            max_negative_angle_rad = -1.3
            max_positive_angle_rad = 1.3
            kinematic_segment_len_mm = 2.0
            "#,
        )
        .unwrap();

        assert_eq!(names(), vec!["parallel_delta"]);

        let mut kin = build("parallel_delta", &params).unwrap();
        assert_eq!(kin.name(), "parallel_delta");

        kin.init();
        assert_eq!(kin.pose().angles, ArmAngles::zero());

        match build("cartesian", &params) {
            Err(KinCtrlError::UnknownBackend(n)) => assert_eq!(n, "cartesian"),
            _ => panic!("Expected an unknown backend error"),
        }
    }

    #[test]
    fn test_build_rejects_bad_params() {
        let params: toml::Value = toml::from_str(
            r#"
            crank_mm = 10.0
            linkage_mm = 200.0
            base_triangle_mm = 100.0
            end_effector_triangle_mm = 50.0
            max_negative_angle_rad = -1.3
            max_positive_angle_rad = 1.3
            kinematic_segment_len_mm = 2.0
            "#,
        )
        .unwrap();

        match build("parallel_delta", &params) {
            Err(KinCtrlError::InvalidParams(ParamsError::OutOfRange { field, .. })) => {
                assert_eq!(field, "crank_mm")
            }
            _ => panic!("Expected an out of range crank"),
        }
    }
}
