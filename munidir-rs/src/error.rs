//! Error types and exit codes for munidir.

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes used by the CLI.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const RECORD_NOT_FOUND: i32 = 2;
    pub const DATA_NOT_FOUND: i32 = 3;
    pub const INVALID_DATA: i32 = 4;
}

/// Main error type for munidir operations.
///
/// The query engine itself is infallible; these errors come from loading
/// datasets, reading config, and writing output.
#[derive(Error, Debug)]
pub enum MuniError {
    #[error("Municipality not found: {0}")]
    RecordNotFound(String),

    #[error("Dataset not found at: {0}")]
    DataNotFound(PathBuf),

    #[error("Duplicate municipality id '{id}' in {source_path}")]
    DuplicateId { id: String, source_path: PathBuf },

    #[error("Invalid record in {path}: {message}")]
    InvalidRecord { path: PathBuf, message: String },

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Glob pattern error: {0}")]
    GlobPattern(#[from] glob::PatternError),

    #[error("{0}")]
    Other(String),
}

impl MuniError {
    /// Returns the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            MuniError::RecordNotFound(_) => exit_code::RECORD_NOT_FOUND,
            MuniError::DataNotFound(_) => exit_code::DATA_NOT_FOUND,
            MuniError::DuplicateId { .. } | MuniError::InvalidRecord { .. } => {
                exit_code::INVALID_DATA
            }
            _ => exit_code::GENERAL_ERROR,
        }
    }
}

/// Result type alias for munidir operations.
pub type Result<T> = std::result::Result<T, MuniError>;

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success,
    GeneralError,
    RecordNotFound,
    DataNotFound,
    InvalidData,
}

impl ExitCode {
    /// Convert to exit code integer.
    pub fn code(self) -> i32 {
        match self {
            ExitCode::Success => exit_code::SUCCESS,
            ExitCode::GeneralError => exit_code::GENERAL_ERROR,
            ExitCode::RecordNotFound => exit_code::RECORD_NOT_FOUND,
            ExitCode::DataNotFound => exit_code::DATA_NOT_FOUND,
            ExitCode::InvalidData => exit_code::INVALID_DATA,
        }
    }
}
