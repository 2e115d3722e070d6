//! Session management
//!
//! A session is one execution of an executable. Each gets its own directory under the sessions
//! directory of the software root, holding the log file and copies of the inputs the run used.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External imports
use chrono::{DateTime, Utc};
use conquer_once::OnceCell;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

// Internal imports
use crate::time;

// ---------------------------------------------------------------------------
// STATICS
// ---------------------------------------------------------------------------

/// Start time of the session, set once by [`Session::new`].
static SESSION_EPOCH: OnceCell<DateTime<Utc>> = OnceCell::uninit();

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Session directory timestamp, see the `chrono::format::strftime` docs.
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Subdirectory of the session holding copies of its input files.
const INPUTS_DIR: &str = "inputs";

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
pub struct Session {
    /// The root directory for this session
    pub session_root: PathBuf,

    /// The path to the session's log file
    pub log_file_path: PathBuf,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors associated with the session module.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("The software root environment variable (DELTA_SW_ROOT) is not set")]
    SwRootNotSet,

    #[error("Cannot create the session directory: {0}")]
    CannotCreateDir(std::io::Error),

    #[error("A session has already been started in this execution ({0})")]
    CannotInitEpoch(conquer_once::TryInitError),

    #[error("Cannot get the epoch time, did you forget to initialise the session?")]
    CannotGetEpoch,

    #[error("Cannot copy {0:?} into the session: {1}")]
    CannotCopyInput(PathBuf, std::io::Error),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Session {
    /// Start a new session in `$DELTA_SW_ROOT/{sessions_dir}`.
    ///
    /// The session directory is named `{exec_name}_{timestamp}`. Only one session may be started
    /// per execution.
    pub fn new(exec_name: &str, sessions_dir: &str) -> Result<Self, SessionError> {
        SESSION_EPOCH
            .try_init_once(Utc::now)
            .map_err(SessionError::CannotInitEpoch)?;

        let epoch = SESSION_EPOCH.get().ok_or(SessionError::CannotGetEpoch)?;

        let mut session_root = crate::host::get_sw_root().map_err(|_| SessionError::SwRootNotSet)?;
        session_root.push(sessions_dir);
        session_root.push(format!("{}_{}", exec_name, epoch.format(TIMESTAMP_FORMAT)));

        fs::create_dir_all(&session_root).map_err(SessionError::CannotCreateDir)?;

        let log_file_path = session_root.join(format!("{}.log", exec_name));

        Ok(Session {
            session_root,
            log_file_path,
        })
    }

    /// Copy an input file (parameters, scripts) into the session's inputs directory.
    ///
    /// Returns the path of the copy.
    pub fn archive_input<P: AsRef<Path>>(&self, path: P) -> Result<PathBuf, SessionError> {
        let path = path.as_ref();
        let err = |e| SessionError::CannotCopyInput(path.to_path_buf(), e);

        let inputs_dir = self.session_root.join(INPUTS_DIR);
        fs::create_dir_all(&inputs_dir).map_err(err)?;

        let file_name = path.file_name().ok_or_else(|| {
            err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "path has no file name",
            ))
        })?;
        let dest = inputs_dir.join(file_name);

        fs::copy(path, &dest).map_err(err)?;

        Ok(dest)
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Get the number of seconds elapsed since the start of the session.
///
/// Returns `NAN` if no session has been started.
pub fn get_elapsed_seconds() -> f64 {
    SESSION_EPOCH
        .get()
        .and_then(|e| time::duration_to_seconds(Utc::now() - *e))
        .unwrap_or(std::f64::NAN)
}

/// Return a reference to the session's epoch, or `None` if no session has
/// been started.
pub fn get_epoch() -> Option<&'static DateTime<Utc>> {
    SESSION_EPOCH.get()
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_archive_input() {
        let root = std::env::temp_dir().join(format!("delta_session_test_{}", std::process::id()));
        let session = Session {
            session_root: root.clone(),
            log_file_path: root.join("test.log"),
        };

        let src = std::env::temp_dir().join(format!("delta_input_{}.toml", std::process::id()));
        fs::write(&src, "kinematics = \"parallel_delta\"\n").unwrap();

        let dest = session.archive_input(&src).unwrap();
        assert_eq!(dest.parent().unwrap(), root.join(INPUTS_DIR));
        assert_eq!(
            fs::read_to_string(&dest).unwrap(),
            "kinematics = \"parallel_delta\"\n"
        );

        match session.archive_input(root.join("missing.json")) {
            Err(SessionError::CannotCopyInput(p, _)) => assert!(p.ends_with("missing.json")),
            r => panic!("Expected a copy error, got {:?}", r),
        }

        fs::remove_dir_all(&root).unwrap();
        fs::remove_file(&src).unwrap();
    }
}
