//! # Kinematics Executable Parameters

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::Deserialize;
use std::collections::HashMap;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Deserialize, Debug, Clone)]
pub struct KinExecParams {
    /// Name of the kinematics backend to use
    pub kinematics: String,

    /// Parameter tables of the backends, keyed by backend name
    #[serde(flatten)]
    pub backends: HashMap<String, toml::Value>,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl KinExecParams {
    /// Parameter table of the selected backend, if one is given.
    pub fn backend_params(&self) -> Option<&toml::Value> {
        self.backends.get(&self.kinematics)
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_backend_params() {
        let params: KinExecParams = util::params::from_str(
            r#"
            kinematics = "parallel_delta"

            [parallel_delta]
            crank_mm = 100.0
            linkage_mm = 200.0

            [linear_delta]
            rod_mm = 250.0
            "#,
        )
        .unwrap();

        assert_eq!(params.kinematics, "parallel_delta");

        let table = params.backend_params().unwrap();
        assert_eq!(table.get("crank_mm").and_then(|v| v.as_float()), Some(100.0));
        assert!(table.get("rod_mm").is_none());
    }

    #[test]
    fn test_missing_backend_table() {
        let params: KinExecParams =
            util::params::from_str(r#"kinematics = "parallel_delta""#).unwrap();

        assert!(params.backend_params().is_none());
    }
}
