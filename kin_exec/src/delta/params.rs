//! Parameters structure for the parallel delta

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

use super::ParamsError;
use util::maths::in_range;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Geometry and limits of a parallel delta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Params {
    // ---- GEOMETRY ----

    /// Length of the motor cranks, the radius of the fixed side.
    ///
    /// Units: millimetres
    pub crank_mm: f64,

    /// Length of the linkages joining the cranks to the end effector.
    ///
    /// Units: millimetres
    pub linkage_mm: f64,

    /// Side of the fixed triangle formed by the arm axes.
    ///
    /// Units: millimetres
    pub base_triangle_mm: f64,

    /// Side of the end effector triangle formed by the linkage joints.
    ///
    /// Units: millimetres
    pub end_effector_triangle_mm: f64,

    // ---- CAPABILITIES ----

    /// Furthest the arms can safely go above horizontal.
    ///
    /// Units: radians
    pub max_negative_angle_rad: f64,

    /// Furthest the arms can safely go below horizontal.
    ///
    /// Units: radians
    pub max_positive_angle_rad: f64,

    /// Maximum length of one Cartesian segment of a move.
    ///
    /// Units: millimetres
    pub kinematic_segment_len_mm: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Params {
    /// Allowed range of every field, as `(name, min, max)`.
    pub const FIELD_RANGES: [(&'static str, f64, f64); 7] = [
        ("crank_mm", 50.0, 500.0),
        ("linkage_mm", 20.0, 500.0),
        ("base_triangle_mm", 20.0, 500.0),
        ("end_effector_triangle_mm", 20.0, 500.0),
        ("max_negative_angle_rad", -FRAC_PI_2, 0.0),
        ("max_positive_angle_rad", 0.0, FRAC_PI_2),
        ("kinematic_segment_len_mm", 0.05, 20.0),
    ];

    /// Load the parameters from a file relative to the params directory and validate them.
    pub fn load(param_file_path: &str) -> Result<Self, ParamsError> {
        let params: Self = util::params::load(param_file_path).map_err(ParamsError::LoadError)?;

        params.validate()?;

        Ok(params)
    }

    /// Read the parameters from a TOML table and validate them.
    pub fn from_value(value: &toml::Value) -> Result<Self, ParamsError> {
        let params: Self = value
            .clone()
            .try_into()
            .map_err(ParamsError::DeserialiseError)?;

        params.validate()?;

        Ok(params)
    }

    /// Check every field is within its allowed range.
    pub fn validate(&self) -> Result<(), ParamsError> {
        for (field, min, max) in Self::FIELD_RANGES.iter() {
            let value = self
                .get(field)
                .ok_or_else(|| ParamsError::UnknownField(field.to_string()))?;

            if !in_range(value, *min, *max) {
                return Err(ParamsError::OutOfRange {
                    field: *field,
                    value,
                    min: *min,
                    max: *max,
                });
            }
        }

        Ok(())
    }

    /// Get a field by name.
    pub fn get(&self, name: &str) -> Option<f64> {
        match name {
            "crank_mm" => Some(self.crank_mm),
            "linkage_mm" => Some(self.linkage_mm),
            "base_triangle_mm" => Some(self.base_triangle_mm),
            "end_effector_triangle_mm" => Some(self.end_effector_triangle_mm),
            "max_negative_angle_rad" => Some(self.max_negative_angle_rad),
            "max_positive_angle_rad" => Some(self.max_positive_angle_rad),
            "kinematic_segment_len_mm" => Some(self.kinematic_segment_len_mm),
            _ => None,
        }
    }

    /// Set a field by name.
    ///
    /// Values outside the field's allowed range are rejected and the field is left unchanged.
    pub fn set(&mut self, name: &str, value: f64) -> Result<(), ParamsError> {
        let (field, min, max) = match Self::FIELD_RANGES.iter().find(|(f, _, _)| *f == name) {
            Some(r) => *r,
            None => return Err(ParamsError::UnknownField(name.to_string())),
        };

        if !in_range(value, min, max) {
            return Err(ParamsError::OutOfRange {
                field,
                value,
                min,
                max,
            });
        }

        match field {
            "crank_mm" => self.crank_mm = value,
            "linkage_mm" => self.linkage_mm = value,
            "base_triangle_mm" => self.base_triangle_mm = value,
            "end_effector_triangle_mm" => self.end_effector_triangle_mm = value,
            "max_negative_angle_rad" => self.max_negative_angle_rad = value,
            "max_positive_angle_rad" => self.max_positive_angle_rad = value,
            "kinematic_segment_len_mm" => self.kinematic_segment_len_mm = value,
            _ => return Err(ParamsError::UnknownField(name.to_string())),
        }

        Ok(())
    }
}

/// Geometry shared by the unit tests.
#[cfg(test)]
pub(crate) fn test_params() -> Params {
    Params {
        crank_mm: 100.0,
        linkage_mm: 200.0,
        base_triangle_mm: 100.0,
        end_effector_triangle_mm: 50.0,
        max_negative_angle_rad: -1.3,
        max_positive_angle_rad: 1.3,
        kinematic_segment_len_mm: 2.0,
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
