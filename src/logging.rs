//! Tracing subscriber setup.
//!
//! `RUST_LOG` overrides the default filter (`relscore=warn`). The TUI owns the
//! terminal, so it only logs when a file is given.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::AppError;

const DEFAULT_FILTER: &str = "relscore=warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
    Off,
}

impl LogTarget {
    /// Pick a target for a front end.
    pub fn for_command(log_file: Option<PathBuf>, owns_terminal: bool) -> Self {
        match (log_file, owns_terminal) {
            (Some(path), _) => LogTarget::File(path),
            (None, true) => LogTarget::Off,
            (None, false) => LogTarget::Stderr,
        }
    }
}

/// Install the global subscriber. A second call is a no-op.
pub fn init(target: LogTarget) -> Result<(), AppError> {
    let filter = || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    match target {
        LogTarget::Off => {}
        LogTarget::Stderr => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter())
                .with_writer(std::io::stderr)
                .try_init();
        }
        LogTarget::File(path) => {
            let file = File::create(&path).map_err(|e| {
                AppError::input(format!("Failed to create log file '{}': {e}", path.display()))
            })?;
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter())
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tui_without_file_logs_nowhere() {
        assert_eq!(LogTarget::for_command(None, true), LogTarget::Off);
    }

    #[test]
    fn explicit_file_always_wins() {
        let path = PathBuf::from("relscore.log");
        assert_eq!(
            LogTarget::for_command(Some(path.clone()), true),
            LogTarget::File(path.clone())
        );
        assert_eq!(LogTarget::for_command(Some(path.clone()), false), LogTarget::File(path));
    }

    #[test]
    fn cli_defaults_to_stderr() {
        assert_eq!(LogTarget::for_command(None, false), LogTarget::Stderr);
    }

    #[test]
    fn unwritable_log_file_is_an_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = init(LogTarget::File(dir.path().join("missing").join("x.log"))).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_INPUT);
    }
}
