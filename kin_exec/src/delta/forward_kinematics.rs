//! Forward kinematics: arm angles to Cartesian position

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, warn};
use nalgebra::Point3;

// Internal
use super::{ParallelDelta, SIN_30, TAN_30, TAN_60};
use crate::kinematics::KinematicError;
use motion_if::ArmAngles;

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ParallelDelta {
    /// Calculate the end effector position for the given arm angles.
    ///
    /// The effector sits where the three linkage spheres, centred on the virtual joints at the
    /// crank ends, meet. Of the two intersections the one below the base is chosen.
    ///
    /// Returns [`KinematicError::ForwardSolve`] if the spheres do not meet.
    pub fn calc_forward(&self, angles: &ArmAngles) -> Result<Point3<f64>, KinematicError> {
        let [m0, m1, m2] = angles.pos_rad;
        let rf = self.params.crank_mm;
        let re = self.params.linkage_mm;

        debug!("Forward kinematics for angles ({}, {}, {})", m0, m1, m2);

        let t = (self.params.base_triangle_mm - self.params.end_effector_triangle_mm) * TAN_30 / 2.0;

        // Virtual joint positions, shifted in by the effector triangle
        let y1 = -(t + rf * m0.cos());
        let z1 = -rf * m0.sin();

        let y2 = (t + rf * m1.cos()) * SIN_30;
        let x2 = y2 * TAN_60;
        let z2 = -rf * m1.sin();

        let y3 = (t + rf * m2.cos()) * SIN_30;
        let x3 = -y3 * TAN_60;
        let z3 = -rf * m2.sin();

        let dnm = (y2 - y1) * x3 - (y3 - y1) * x2;
        if dnm == 0.0 {
            warn!("Forward kinematics failed: joints are collinear");
            return Err(KinematicError::ForwardSolve);
        }

        let w1 = y1 * y1 + z1 * z1;
        let w2 = x2 * x2 + y2 * y2 + z2 * z2;
        let w3 = x3 * x3 + y3 * y3 + z3 * z3;

        // x = (a1*z + b1)/dnm
        let a1 = (z2 - z1) * (y3 - y1) - (z3 - z1) * (y2 - y1);
        let b1 = -((w2 - w1) * (y3 - y1) - (w3 - w1) * (y2 - y1)) / 2.0;

        // y = (a2*z + b2)/dnm
        let a2 = -(z2 - z1) * x3 + (z3 - z1) * x2;
        let b2 = ((w2 - w1) * x3 - (w3 - w1) * x2) / 2.0;

        // a*z^2 + b*z + c = 0
        let a = a1 * a1 + a2 * a2 + dnm * dnm;
        let b = 2.0 * (a1 * b1 + a2 * (b2 - y1 * dnm) - z1 * dnm * dnm);
        let c = (b2 - y1 * dnm) * (b2 - y1 * dnm) + b1 * b1 + dnm * dnm * (z1 * z1 - re * re);

        let d = b * b - 4.0 * a * c;
        if d.is_nan() || d < 0.0 {
            warn!("Forward kinematics failed: linkages cannot meet (discriminant {})", d);
            return Err(KinematicError::ForwardSolve);
        }

        let z = -0.5 * (b + d.sqrt()) / a;

        Ok(Point3::new((a1 * z + b1) / dnm, (a2 * z + b2) / dnm, z))
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
    fn test_zero_pose() {
        let delta = ParallelDelta::new(test_params()).unwrap();

        let pos = delta.calc_forward(&ArmAngles::zero()).unwrap();
        assert!(pos.x.abs() < 1e-9);
        assert!(pos.y.abs() < 1e-9);
        assert!((pos.z - -164.027_178_6).abs() < 1e-4);
    }

    #[test]
    fn test_round_trip() {
        let delta = ParallelDelta::new(test_params()).unwrap();

        // Sweep the whole joint space, including the limits themselves
        let n = 15;
        let grid: Vec<f64> = (0..n)
            .map(|i| -1.3 + 2.6 * i as f64 / (n - 1) as f64)
            .collect();
        assert_eq!(grid[n - 1], 1.3);

        for &a0 in grid.iter() {
            for &a1 in grid.iter() {
                for &a2 in grid.iter() {
                    let angles = ArmAngles::new(a0, a1, a2);
                    let pos = delta.calc_forward(&angles).unwrap();
                    let back = match delta.calc_inverse(&pos) {
                        Ok(b) => b,
                        Err(e) => panic!("{:?} -> {} -> {}", angles, pos, e),
                    };

                    for (a, b) in angles.pos_rad.iter().zip(back.pos_rad.iter()) {
                        assert!((a - b).abs() < 1e-4, "{:?} -> {} -> {:?}", angles, pos, back);
                    }
                }
            }
        }

        // And the other way
        let target = Point3::new(50.0, 0.0, -200.0);
        let pos = delta
            .calc_forward(&delta.calc_inverse(&target).unwrap())
            .unwrap();
        assert!((pos - target).norm() < 1e-6);
    }

    #[test]
    fn test_no_solution() {
        let mut params = test_params();
        params.linkage_mm = 20.0;
        let delta = ParallelDelta::new(params).unwrap();

        // Short linkages cannot span the joints with the arms spread this far apart
        assert_eq!(
            delta.calc_forward(&ArmAngles::new(1.0, -1.0, 0.0)),
            Err(KinematicError::ForwardSolve)
        );
    }
}
