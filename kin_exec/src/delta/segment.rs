//! Segmentation of linear Cartesian moves into arm angle moves

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, trace, warn};
use nalgebra::Point3;

// Internal
use super::ParallelDelta;
use crate::kinematics::{MotionDispatcher, MoveError, PoseCache, WorkOffset};
use motion_if::{DispatchResponse, PlanLineData, SegmentDems};
use util::maths::norm;

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ParallelDelta {
    /// Break the move from `position` to `target` into segments and dispatch them.
    ///
    /// Both ends of the move are checked before anything is sent. The pose cache follows the
    /// last segment the dispatcher accepted.
    pub(crate) fn segment_move(
        &mut self,
        target: &Point3<f64>,
        plan: &PlanLineData,
        position: &Point3<f64>,
        offset: &dyn WorkOffset,
        dispatcher: &mut dyn MotionDispatcher,
    ) -> Result<(), MoveError> {
        let mut last_angles = self.calc_inverse(position).map_err(|e| {
            warn!("Kinematics error, start position {} is invalid: {}", position, e);
            MoveError::StartUnreachable(e)
        })?;

        self.calc_inverse(target).map_err(|e| {
            warn!("Kinematics error, target {} is unreachable: {}", target, e);
            MoveError::TargetUnreachable(e)
        })?;

        let start = *position + offset.coord_offset_mm();
        let delta = *target - start;

        let dist_mm = delta.norm();
        let num_segments = segment_count(dist_mm, self.params.kinematic_segment_len_mm);
        let segment_dist_mm = dist_mm / num_segments as f64;

        debug!(
            "Move {} -> {}: {:.3} mm in {} segments",
            start, target, dist_mm, num_segments
        );

        for segment in 1..=num_segments {
            // The last segment lands on the target exactly
            let seg_target = if segment == num_segments {
                *target
            } else {
                start + delta * (segment as f64 / num_segments as f64)
            };

            let angles = match self.calc_inverse(&seg_target) {
                Ok(a) => a,
                Err(e) => {
                    warn!(
                        "Kinematics error, segment {} of {} at {} is unreachable: {}",
                        segment, num_segments, seg_target, e
                    );
                    return Err(MoveError::SegmentUnreachable { segment, error: e });
                }
            };

            let feed_rate = if plan.is_rapid() || segment_dist_mm == 0.0 {
                plan.feed_rate
            } else {
                plan.feed_rate * three_axis_dist(&angles.pos_rad, &last_angles.pos_rad)
                    / segment_dist_mm
            };

            trace!(
                "Segment {}: angles {:?}, feed rate {:.4}",
                segment,
                angles.pos_rad,
                feed_rate
            );

            let dems = SegmentDems {
                angles,
                feed_rate,
                motion: plan.motion,
            };

            match dispatcher.move_motors(&dems) {
                DispatchResponse::Accepted => {
                    last_angles = angles;
                    self.pose = PoseCache {
                        angles,
                        cartesian_mm: seg_target,
                    };
                }
                DispatchResponse::Cancelled => {
                    debug!("Move cancelled at segment {} of {}", segment, num_segments);
                    return Err(MoveError::Cancelled { segment });
                }
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Number of segments needed to cover `dist_mm` with segments no longer than `max_seg_len_mm`.
///
/// Always at least one, so that a zero length move still reaches the dispatcher.
pub fn segment_count(dist_mm: f64, max_seg_len_mm: f64) -> usize {
    ((dist_mm / max_seg_len_mm).ceil() as usize).max(1)
}

/// Euclidean distance between two three component points.
pub fn three_axis_dist(point_0: &[f64; 3], point_1: &[f64; 3]) -> f64 {
    norm(point_0, point_1).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
