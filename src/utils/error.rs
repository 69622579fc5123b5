use crate::utils::validation::ValidationErrors;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShellError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error(transparent)]
    Fatal(#[from] FatalLoadError),
}

/// A problem, bundle or config file that could not be loaded.
///
/// This is never retried: the enclosing command is expected to stop.
#[derive(Error, Debug)]
#[error("Fatal error loading '{}': {cause}", .path.display())]
pub struct FatalLoadError {
    pub path: PathBuf,
    #[source]
    pub cause: LoadFailure,
}

#[derive(Error, Debug)]
pub enum LoadFailure {
    #[error("could not read file: {0}")]
    Read(#[source] std::io::Error),

    #[error("invalid JSON: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("schema violations: {0}")]
    Schema(ValidationErrors),

    #[error("banned_ports[{index}]: {violations}")]
    PortRange {
        index: usize,
        violations: ValidationErrors,
    },

    #[error("Invalid port range: ({start} -> {end})")]
    InvertedPortRange { start: u32, end: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorSeverity::Medium => "medium",
            ErrorSeverity::High => "high",
            ErrorSeverity::Critical => "critical",
        };
        f.write_str(label)
    }
}

impl ShellError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ShellError::InvalidInput {
            message: message.into(),
        }
    }

    pub fn fatal(path: impl Into<PathBuf>, cause: LoadFailure) -> Self {
        ShellError::Fatal(FatalLoadError {
            path: path.into(),
            cause,
        })
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, ShellError::Fatal(_))
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ShellError::IoError(_) => ErrorSeverity::Medium,
            ShellError::InvalidInput { .. } | ShellError::ValidationError(_) => {
                ErrorSeverity::High
            }
            ShellError::Fatal(_) => ErrorSeverity::Critical,
        }
    }

    /// Process exit code for the command-line front end.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, ShellError>;
