//! Error types for phoenixctl

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Library could not be loaded: {0}")]
    LibraryUnavailable(#[source] ctre_phoenix::PhoenixError),

    #[error("Library is missing {count} of {declared} declared symbols")]
    MissingSymbols { count: usize, declared: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[source] ctre_phoenix::PhoenixError),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::LibraryUnavailable(_) => 2,
            CliError::MissingSymbols { .. } => 3,
            CliError::InvalidConfiguration(_) => 4,
        }
    }
}
