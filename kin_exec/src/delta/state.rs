//! Implementations for the ParallelDelta state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{info, warn};
use nalgebra::Point3;

// Internal
use super::{Params, ParamsError};
use crate::kinematics::{
    KinematicError, Kinematics, MotionDispatcher, MoveError, PoseCache, WorkOffset,
};
use motion_if::{ArmAngles, PlanLineData};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parallel delta kinematics backend state
#[derive(Debug, Clone)]
pub struct ParallelDelta {
    pub(crate) params: Params,

    /// Last pose accepted by the motion dispatcher.
    pub(crate) pose: PoseCache,

    /// Z distance from the arm axes to the end effector with all arms at zero.
    z_offset_mm: Option<f64>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ParallelDelta {
    /// Registry name of the backend.
    pub const NAME: &'static str = "parallel_delta";

    /// Create a new backend from validated parameters.
    ///
    /// The backend must be initialised with [`Kinematics::init`] before use.
    pub fn new(params: Params) -> Result<Self, ParamsError> {
        params.validate()?;

        Ok(Self {
            params,
            pose: PoseCache::default(),
            z_offset_mm: None,
        })
    }

    /// Create a new backend from a TOML parameter table.
    pub fn from_value(value: &toml::Value) -> Result<Self, ParamsError> {
        Self::new(Params::from_value(value)?)
    }

    /// The Z offset found during initialisation, or `None` if the backend hasn't been
    /// initialised or the zero pose has no forward solution.
    pub fn z_offset_mm(&self) -> Option<f64> {
        self.z_offset_mm
    }
}

impl Kinematics for ParallelDelta {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn init(&mut self) {
        let zero = ArmAngles::zero();

        info!("Kinematic system: {}", Self::NAME);

        // The Z offset is the distance from the motor axes to the end effector axes at zero angle
        match self.calc_forward(&zero) {
            Ok(cartesian) => {
                self.z_offset_mm = Some(cartesian.z);
                self.pose = PoseCache {
                    angles: zero,
                    cartesian_mm: cartesian,
                };

                info!(
                    "    Z offset: {:.3} mm, max neg angle: {:.4} rad, max pos angle: {:.4} rad",
                    cartesian.z,
                    self.params.max_negative_angle_rad,
                    self.params.max_positive_angle_rad
                );

                // Solving back from the offset must give the zero pose again
                match self.calc_inverse(&cartesian) {
                    Ok(a) => info!(
                        "    Inverse at Z offset: ({:.4}, {:.4}, {:.4})",
                        a.pos_rad[0], a.pos_rad[1], a.pos_rad[2]
                    ),
                    Err(e) => warn!("    Inverse kinematics failed at the Z offset: {}", e),
                }
            }
            Err(e) => {
                self.z_offset_mm = None;
                self.pose = PoseCache::default();

                warn!("    Z offset unavailable: {}", e);
            }
        }
    }

    fn cartesian_to_motors(
        &mut self,
        target: &Point3<f64>,
        plan: &PlanLineData,
        position: &Point3<f64>,
        offset: &dyn WorkOffset,
        dispatcher: &mut dyn MotionDispatcher,
    ) -> Result<(), MoveError> {
        self.segment_move(target, plan, position, offset, dispatcher)
    }

    fn motors_to_cartesian(&self, angles: &ArmAngles) -> Result<Point3<f64>, KinematicError> {
        self.calc_forward(angles)
    }

    fn pose(&self) -> PoseCache {
        self.pose
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::delta::test_params;

    #[test]
    fn test_init_reports_z_offset() {
        let mut delta = ParallelDelta::new(test_params()).unwrap();
        assert_eq!(delta.z_offset_mm(), None);

        delta.init();

        let z_offset = delta.z_offset_mm().unwrap();
        assert!((z_offset - -164.027_178_6).abs() < 1e-4, "z offset {}", z_offset);

        // The pose cache starts at the zero pose
        let pose = delta.pose();
        assert_eq!(pose.angles, ArmAngles::zero());
        assert!((pose.cartesian_mm.z - z_offset).abs() < 1e-9);
        assert!(pose.cartesian_mm.x.abs() < 1e-9);
        assert!(pose.cartesian_mm.y.abs() < 1e-9);
    }

    #[test]
    fn test_new_validates() {
        let mut params = test_params();
        params.end_effector_triangle_mm = 0.0;

        assert!(ParallelDelta::new(params).is_err());
    }

    #[test]
    fn test_motors_to_cartesian() {
        let mut delta = ParallelDelta::new(test_params()).unwrap();
        delta.init();

        let pos = delta
            .motors_to_cartesian(&ArmAngles::new(0.5, 0.5, 0.5))
            .unwrap();
        assert!(pos.x.abs() < 1e-9);
        assert!(pos.y.abs() < 1e-9);
        assert!((pos.z - -219.863_444_1).abs() < 1e-4);
    }
}
