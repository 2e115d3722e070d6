//! Inverse kinematics: Cartesian position to arm angles

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::Point3;
use std::f64::consts::PI;

// Internal
use super::{ParallelDelta, ANGLE_LIMIT_TOL_RAD, COS_120, SIN_120, TAN_30};
use crate::kinematics::KinematicError;
use motion_if::ArmAngles;

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ParallelDelta {
    /// Calculate the arm angles which place the end effector at `cartesian`.
    ///
    /// Each arm is solved in its own plane by rotating the point about Z, arm 0 at 0 degrees,
    /// arm 1 at +120 and arm 2 at -120. The first arm to fail gives the error.
    pub fn calc_inverse(&self, cartesian: &Point3<f64>) -> Result<ArmAngles, KinematicError> {
        let (x, y, z) = (cartesian.x, cartesian.y, cartesian.z);

        let a0 = self.calc_angle_yz(x, y, z)?;
        let a1 = self.calc_angle_yz(x * COS_120 + y * SIN_120, y * COS_120 - x * SIN_120, z)?;
        let a2 = self.calc_angle_yz(x * COS_120 - y * SIN_120, y * COS_120 + x * SIN_120, z)?;

        Ok(ArmAngles::new(a0, a1, a2))
    }

    /// Calculate the angle of a single arm from a point in that arm's YZ plane.
    pub(crate) fn calc_angle_yz(&self, x0: f64, y0: f64, z0: f64) -> Result<f64, KinematicError> {
        let rf = self.params.crank_mm;
        let re = self.params.linkage_mm;

        // Joint of the crank on the base triangle edge
        let y1 = -0.5 * TAN_30 * self.params.base_triangle_mm;

        // Shift the centre to the effector triangle edge
        let y0 = y0 - 0.5 * TAN_30 * self.params.end_effector_triangle_mm;

        // The linkage sphere and crank circle meet on the line z = a + b*y, which is undefined
        // in the plane of the arm axes
        if z0 == 0.0 {
            return Err(KinematicError::OutOfRange);
        }
        let a = (x0 * x0 + y0 * y0 + z0 * z0 + rf * rf - re * re - y1 * y1) / (2.0 * z0);
        let b = (y1 - y0) / z0;

        let d = -(a + b * y1) * (a + b * y1) + rf * (b * b * rf + rf);
        if d.is_nan() || d < 0.0 {
            return Err(KinematicError::OutOfRange);
        }

        // Outer point, the inner one folds the arm back through the base
        let yj = (y1 - a * b - d.sqrt()) / (b * b + 1.0);
        let zj = a + b * yj;

        let theta = (-zj / (y1 - yj)).atan() + if yj > y1 { PI } else { 0.0 };

        if theta < self.params.max_negative_angle_rad - ANGLE_LIMIT_TOL_RAD {
            return Err(KinematicError::AngleTooNegative);
        }

        if theta > self.params.max_positive_angle_rad + ANGLE_LIMIT_TOL_RAD {
            return Err(KinematicError::AngleTooPositive);
        }

        Ok(theta)
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::delta::test_params;

    fn delta() -> ParallelDelta {
        ParallelDelta::new(test_params()).unwrap()
    }

    #[test]
    fn test_central_axis_symmetry() {
        let delta = delta();

        for z in [-150.0, -200.0, -250.0].iter() {
            let angles = delta.calc_inverse(&Point3::new(0.0, 0.0, *z)).unwrap();

            assert!((angles.pos_rad[0] - angles.pos_rad[1]).abs() < 1e-9);
            assert!((angles.pos_rad[0] - angles.pos_rad[2]).abs() < 1e-9);
        }

        let angles = delta.calc_inverse(&Point3::new(0.0, 0.0, -200.0)).unwrap();
        assert!((angles.pos_rad[0] - 0.329_422_4).abs() < 1e-6);
    }

    #[test]
    fn test_off_axis_angles() {
        let delta = delta();

        let angles = delta.calc_inverse(&Point3::new(50.0, 0.0, -200.0)).unwrap();
        let expected = [0.394_486_4, 0.144_115_4, 0.622_924_9];
        for (a, e) in angles.pos_rad.iter().zip(expected.iter()) {
            assert!((a - e).abs() < 1e-6, "{} != {}", a, e);
        }

        // Arm 0 turns steadily as the effector moves along X
        let mut last = delta.calc_inverse(&Point3::new(0.0, 0.0, -200.0)).unwrap();
        for i in 1..=10 {
            let angles = delta
                .calc_inverse(&Point3::new(5.0 * i as f64, 0.0, -200.0))
                .unwrap();
            assert!(angles.pos_rad[0] > last.pos_rad[0]);
            last = angles;
        }
    }

    #[test]
    fn test_out_of_range() {
        let delta = delta();

        // Too close to the base, too far below it, too far out and in the plane of the axes
        for p in [
            Point3::new(0.0, 0.0, -50.0),
            Point3::new(0.0, 0.0, -300.0),
            Point3::new(500.0, 0.0, -200.0),
            Point3::new(0.0, 0.0, 0.0),
        ]
        .iter()
        {
            assert_eq!(delta.calc_inverse(p), Err(KinematicError::OutOfRange));
        }
    }

    #[test]
    fn test_angle_bounds() {
        let delta = delta();

        // Reachable, but beyond the positive bound
        assert_eq!(
            delta.calc_inverse(&Point3::new(120.0, 0.0, -230.0)),
            Err(KinematicError::AngleTooPositive)
        );

        // Both bounds are checked against their own limit
        let mut params = test_params();
        params.max_positive_angle_rad = 0.3;
        params.max_negative_angle_rad = -1.0;
        let delta = ParallelDelta::new(params).unwrap();

        assert_eq!(
            delta.calc_inverse(&Point3::new(0.0, 0.0, -200.0)),
            Err(KinematicError::AngleTooPositive)
        );
        assert_eq!(
            delta.calc_inverse(&Point3::new(0.0, 0.0, -100.0)),
            Err(KinematicError::AngleTooNegative)
        );
        assert!(delta.calc_inverse(&Point3::new(0.0, 0.0, -180.0)).is_ok());
    }

    #[test]
    fn test_angle_on_limit() {
        let theta = delta()
            .calc_inverse(&Point3::new(0.0, 0.0, -200.0))
            .unwrap()
            .pos_rad[0];

        // Rounding noise past a limit is accepted, a real overshoot is not
        let mut params = test_params();
        params.max_positive_angle_rad = theta - 1e-12;
        let delta_at_limit = ParallelDelta::new(params.clone()).unwrap();
        assert!(delta_at_limit
            .calc_inverse(&Point3::new(0.0, 0.0, -200.0))
            .is_ok());

        params.max_positive_angle_rad = theta - 1e-6;
        let delta_past_limit = ParallelDelta::new(params).unwrap();
        assert_eq!(
            delta_past_limit.calc_inverse(&Point3::new(0.0, 0.0, -200.0)),
            Err(KinematicError::AngleTooPositive)
        );

        let theta = delta()
            .calc_inverse(&Point3::new(0.0, 0.0, -100.0))
            .unwrap()
            .pos_rad[0];
        let mut params = test_params();
        params.max_negative_angle_rad = theta + 1e-12;
        assert!(ParallelDelta::new(params)
            .unwrap()
            .calc_inverse(&Point3::new(0.0, 0.0, -100.0))
            .is_ok());
    }
}
