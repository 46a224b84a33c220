//! CLI errors with distinct exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: simulation error (bad dimensions, invalid config values)
//! - 11: I/O error (config read, snapshot write)
//! - 12: input error (malformed --pointer, config file that is not JSON)
//! - 13: serialization error

use neural_backdrop_core::BackdropError;
use std::fmt;
use std::path::PathBuf;

/// Errors produced by CLI operations, each mapped to an exit code.
#[derive(Debug)]
pub enum CliError {
    /// The simulation refused its inputs (bad dimensions, out-of-range config).
    Simulation(BackdropError),
    /// A config read or PNG write failed.
    Io(String),
    /// A `--pointer` value that is not a finite `x,y` pair. Holds the raw text.
    Pointer(String),
    /// A config file whose contents are not JSON.
    ConfigSyntax { path: PathBuf, message: String },
    /// JSON output could not be produced.
    Serialization(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Simulation(_) => 10,
            CliError::Io(_) => 11,
            CliError::Pointer(_) | CliError::ConfigSyntax { .. } => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Simulation(e) => write!(f, "{e}"),
            CliError::Io(msg) => write!(f, "{msg}"),
            CliError::Pointer(raw) => write!(f, "invalid --pointer '{raw}': expected \"x,y\""),
            CliError::ConfigSyntax { path, message } => {
                write!(f, "invalid config JSON in {}: {message}", path.display())
            }
            CliError::Serialization(msg) => write!(f, "{msg}"),
        }
    }
}

impl From<BackdropError> for CliError {
    fn from(e: BackdropError) -> Self {
        match e {
            BackdropError::Io(msg) => CliError::Io(msg),
            other => CliError::Simulation(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulation_error_exit_code_is_10() {
        let err = CliError::Simulation(BackdropError::config("density_area", "must be > 0"));
        assert_eq!(err.exit_code(), 10);
    }

    #[test]
    fn io_error_exit_code_is_11() {
        assert_eq!(CliError::Io("write failed".into()).exit_code(), 11);
    }

    #[test]
    fn input_errors_exit_code_is_12() {
        let pointer = CliError::Pointer("1;2".into());
        assert_eq!(pointer.exit_code(), 12);
        assert_eq!(pointer.to_string(), "invalid --pointer '1;2': expected \"x,y\"");

        let syntax = CliError::ConfigSyntax {
            path: PathBuf::from("backdrop.json"),
            message: "expected value".into(),
        };
        assert_eq!(syntax.exit_code(), 12);
        assert!(syntax.to_string().contains("backdrop.json"));
    }

    #[test]
    fn serialization_error_exit_code_is_13() {
        assert_eq!(CliError::Serialization("json fail".into()).exit_code(), 13);
    }

    #[test]
    fn backdrop_io_routes_to_cli_io() {
        let cli_err = CliError::from(BackdropError::Io("disk full".into()));
        assert_eq!(cli_err.exit_code(), 11);
        assert!(cli_err.to_string().contains("disk full"));
    }

    #[test]
    fn backdrop_color_error_routes_to_simulation() {
        let cli_err = CliError::from(BackdropError::InvalidColor("#zz".into()));
        assert_eq!(cli_err.exit_code(), 10);
        assert!(cli_err.to_string().contains("#zz"));
    }

    #[test]
    fn serde_json_error_routes_to_serialization() {
        let bad = serde_json::from_str::<serde_json::Value>("{invalid").unwrap_err();
        assert_eq!(CliError::from(bad).exit_code(), 13);
    }
}
