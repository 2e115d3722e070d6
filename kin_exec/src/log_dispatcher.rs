//! # Logging motion dispatcher
//!
//! Stands in for the motion queue when running move scripts offline. Every segment is accepted
//! and logged.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::debug;

use kin_lib::MotionDispatcher;
use motion_if::{DispatchResponse, SegmentDems};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct LogDispatcher {
    /// Number of segments accepted since the last call to `take_count`
    num_segments: usize,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl LogDispatcher {
    /// Get the number of segments accepted since the last call and reset the count.
    pub fn take_count(&mut self) -> usize {
        std::mem::take(&mut self.num_segments)
    }
}

impl MotionDispatcher for LogDispatcher {
    fn move_motors(&mut self, dems: &SegmentDems) -> DispatchResponse {
        self.num_segments += 1;

        debug!(
            "Segment {}: ({:.5}, {:.5}, {:.5}) rad at {:.4} ({:?})",
            self.num_segments,
            dems.angles.pos_rad[0],
            dems.angles.pos_rad[1],
            dems.angles.pos_rad[2],
            dems.feed_rate,
            dems.motion
        );

        DispatchResponse::Accepted
    }
}
