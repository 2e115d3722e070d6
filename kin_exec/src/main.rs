//! # Kinematics Executable
//!
//! Loads the kinematics backend named in `kin_exec.toml`, reports its startup diagnostics and
//! optionally runs a move script through it. The script is a JSON array of move commands, see
//! [`motion_if::MoveCmd`]. Segments are sent to a dispatcher which only logs them.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Dispatcher which logs segments instead of moving the arms.
mod log_dispatcher;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use color_eyre::{
    eyre::{eyre, WrapErr},
    Result,
};
use log::{info, warn};
use nalgebra::Vector3;
use std::path::PathBuf;
use structopt::StructOpt;

// Internal
use kin_lib::{kinematics, params::KinExecParams};
use log_dispatcher::LogDispatcher;
use motion_if::MoveCmd;
use util::{
    host,
    logger::{logger_init, LevelFilter},
    session::Session,
};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, StructOpt)]
#[structopt(name = "kin_exec", about = "Delta kinematics executable")]
struct Opt {
    /// Move script to run, a JSON array of move commands
    #[structopt(parse(from_os_str))]
    script: Option<PathBuf>,

    /// Parameter file, relative to the params directory
    #[structopt(short, long, default_value = "kin_exec.toml")]
    params: String,
}

// ------------------------------------------------------------------------------------------------
// MAIN
// ------------------------------------------------------------------------------------------------

fn main() -> Result<()> {
    color_eyre::install()?;

    let opt = Opt::from_args();

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new("kin_exec", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger, segment detail only goes to the log file
    logger_init(LevelFilter::Info, LevelFilter::Trace, &session)
        .wrap_err("Failed to initialise logging")?;

    info!("Kinematics Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let params: KinExecParams = util::params::load(&opt.params)
        .wrap_err_with(|| format!("Failed to load {}", opt.params))?;

    let backend_params = params.backend_params().ok_or_else(|| {
        eyre!(
            "No [{}] table in {}, available backends are {:?}",
            params.kinematics,
            opt.params,
            kinematics::names()
        )
    })?;

    let params_path = host::get_sw_root()?.join("params").join(&opt.params);
    session
        .archive_input(&params_path)
        .wrap_err("Failed to archive the parameters")?;

    info!("Parameters loaded");

    // ---- BACKEND INITIALISATION ----

    let mut kin = kinematics::build(&params.kinematics, backend_params)
        .wrap_err("Failed to build the kinematics backend")?;
    kin.init();

    info!("Kinematics initialised");

    // ---- MOVE SCRIPT ----

    let script_path = match opt.script {
        Some(p) => p,
        None => {
            info!("No move script given, exiting");
            return Ok(());
        }
    };

    let script_str = std::fs::read_to_string(&script_path)
        .wrap_err_with(|| format!("Failed to read move script {:?}", script_path))?;
    let script = MoveCmd::script_from_json(&script_str).wrap_err("Invalid move script")?;
    session
        .archive_input(&script_path)
        .wrap_err("Failed to archive the move script")?;

    info!("Running {} moves from {:?}", script.len(), script_path);

    let mut dispatcher = LogDispatcher::default();
    let offset = Vector3::<f64>::zeros();

    // Moves start from the pose found during initialisation
    let mut position = kin.pose().cartesian_mm;

    for (i, cmd) in script.iter().enumerate() {
        match kin.cartesian_to_motors(
            &cmd.target_mm,
            &cmd.plan_data(),
            &position,
            &offset,
            &mut dispatcher,
        ) {
            Ok(()) => {
                position = cmd.target_mm;
                info!(
                    "Move {} to {} complete in {} segments",
                    i,
                    cmd.target_mm,
                    dispatcher.take_count()
                );
            }
            Err(e) => {
                warn!(
                    "Move {} to {} rejected after {} segments: {}",
                    i,
                    cmd.target_mm,
                    dispatcher.take_count(),
                    e
                );

                // Part of the move was executed, so the next one starts where it stopped
                if e.segments_dispatched() > 0 {
                    position = kin.pose().cartesian_mm;
                }
            }
        }

        let pose = kin.pose();
        match kin.motors_to_cartesian(&pose.angles) {
            Ok(p) => info!("    Arms report position {}", p),
            Err(e) => warn!("    Arm position unavailable: {}", e),
        }
    }

    info!("Move script complete");

    Ok(())
}
