//! Logger setup for executables
//!
//! Records go to stdout and to the session's log file. Both carry the seconds elapsed since the
//! session epoch and a coloured level tag. The file may be given a more verbose level than the
//! terminal so that per-segment detail is kept without flooding stdout.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External imports
use colored::{ColoredString, Colorize};
use log::{self, info, Level, Record};
use std::fmt;
use thiserror::Error;

// Internal imports
use crate::session;

// Re-exports
pub use log::LevelFilter;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors associated with initialising the logger.
#[derive(Debug, Error)]
pub enum LoggerInitError {
    #[error("Expected a log level of at least `INFO`, found `{0}`")]
    InvalidMinLogLevel(LevelFilter),

    #[error("Error initialising the log file: {0}")]
    LogFileInitError(std::io::Error),

    #[error("An error occured while setting up the logger: {0}")]
    FernInitError(log::SetLoggerError),
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Initialise the logger with separate stdout and log file levels.
///
/// Both levels must include `INFO`. Must only be called once per execution.
pub fn logger_init(
    stdout_level: LevelFilter,
    file_level: LevelFilter,
    session: &session::Session,
) -> Result<(), LoggerInitError> {
    for level in [stdout_level, file_level].iter() {
        if *level < Level::Info {
            return Err(LoggerInitError::InvalidMinLogLevel(*level));
        }
    }

    let log_file = fern::log_file(&session.log_file_path)
        .map_err(LoggerInitError::LogFileInitError)?;

    fern::Dispatch::new()
        .format(format_record)
        .chain(
            fern::Dispatch::new()
                .level(stdout_level)
                .chain(std::io::stdout()),
        )
        .chain(fern::Dispatch::new().level(file_level).chain(log_file))
        .apply()
        .map_err(LoggerInitError::FernInitError)?;

    info!("Logging initialised");
    if let Some(epoch) = session::get_epoch() {
        info!("    Session epoch: {}", epoch);
    }
    info!("    Log level: {:?} (file: {:?})", stdout_level, file_level);
    info!("    Log file path: {:?}", session.log_file_path);

    Ok(())
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Format a record, adding the target for debug and trace records.
fn format_record(out: fern::FormatCallback, message: &fmt::Arguments, record: &Record) {
    let elapsed_s = session::get_elapsed_seconds();

    match record.level() {
        Level::Debug | Level::Trace => out.finish(format_args!(
            "[{:10.6} {}] {}: {}",
            elapsed_s,
            level_to_str(record.level()),
            record.target(),
            message
        )),
        _ => out.finish(format_args!(
            "[{:10.6} {}] {}",
            elapsed_s,
            level_to_str(record.level()),
            message
        )),
    }
}

/// Get the tag shown for a log level
fn level_to_str(level: Level) -> ColoredString {
    match level {
        Level::Trace => "TRC".dimmed().italic(),
        Level::Debug => "DBG".dimmed(),
        Level::Info => "INF".normal(),
        Level::Warn => "WRN".yellow(),
        Level::Error => "ERR".red().bold(),
    }
}
