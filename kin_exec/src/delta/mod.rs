//! # Parallel delta kinematics
//!
//! Kinematics for a delta machine with three rotary arms spaced 120 degrees apart about the
//! vertical axis. On this machine the motion planner only ever sees arm angles, in radians. The
//! arm angle is zero when the crank is horizontal and positive below horizontal.
//!
//! The machine's Z zero is level with the arm axes. The Z distance from the arm axes down to the
//! end effector joints with all arms at zero is reported at startup.
//!
//! A straight Cartesian move is not a straight line in arm angle space, so moves are broken into
//! short segments where the nonlinearity is not noticeable. The Cartesian feed rate is converted
//! for each segment from the ratio of the angle distance to the Cartesian distance of the
//! segment.
//!
//! The geometry follows http://hypertriangle.com/~alex/delta-robot-tutorial/.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod forward_kinematics;
mod inverse_kinematics;
mod params;
mod segment;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use params::*;
pub use segment::{segment_count, three_axis_dist};
pub use state::*;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

const SQRT_3: f64 = 1.732_050_807_568_877_2;

pub(crate) const SIN_120: f64 = SQRT_3 / 2.0;
pub(crate) const COS_120: f64 = -0.5;
pub(crate) const TAN_60: f64 = SQRT_3;
pub(crate) const SIN_30: f64 = 0.5;
pub(crate) const TAN_30: f64 = 1.0 / SQRT_3;

/// Slack allowed on the joint limits, so that an angle on a limit survives a round trip through
/// the forward and inverse solvers.
///
/// Units: radians
pub(crate) const ANGLE_LIMIT_TOL_RAD: f64 = 1e-9;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors in the delta geometry parameters.
#[derive(Debug, thiserror::Error)]
pub enum ParamsError {
    #[error("Could not load parameters: {0}")]
    LoadError(util::params::LoadError),

    #[error("Could not read the parameter table: {0}")]
    DeserialiseError(toml::de::Error),

    #[error("No parameter named \"{0}\"")]
    UnknownField(String),

    #[error("{field} = {value} is outside the allowed range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}
