//! Error types and exit codes for gradepost
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure (IO, remote transport)
//! - 2: Usage error (bad flags/args)
//! - 3: Data error (missing config, unknown course, bad rubric file)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the gradepost CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - missing config, unknown course, bad rubric file (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur during gradepost operations
#[derive(Error, Debug)]
pub enum GradepostError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human or json)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    // Data errors (exit code 3)
    #[error("config file not found: {path:?}")]
    ConfigNotFound { path: PathBuf },

    #[error("invalid config: {reason}")]
    InvalidConfig { reason: String },

    #[error("unable to retrieve course {name} in period {period}")]
    CourseNotFound { name: String, period: String },

    #[error("{context} not found: {value}")]
    NotFound { context: String, value: String },

    #[error("invalid rubric file at line {line}: {reason}")]
    InvalidRubricFile { line: usize, reason: String },

    #[error("lines {start_line}-{end_line} out of range for {file} ({line_count} lines)")]
    LineOutOfRange {
        file: String,
        start_line: usize,
        end_line: usize,
        line_count: usize,
    },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to {operation} {target}: {reason}")]
    FailedOperation {
        operation: String,
        target: String,
        reason: String,
    },

    #[error("grading service request failed ({operation}): {reason}")]
    Remote { operation: String, reason: String },

    #[error("{0}")]
    Other(String),
}

impl GradepostError {
    /// Create an error for a course that could not be retrieved
    pub fn course_not_found(name: &str, period: Option<&str>) -> Self {
        GradepostError::CourseNotFound {
            name: name.to_string(),
            period: period.unwrap_or("(any)").to_string(),
        }
    }

    /// Create an error for an entity that was not found
    pub fn not_found(context: &str, value: impl std::fmt::Display) -> Self {
        GradepostError::NotFound {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for a failed IO operation with context
    pub fn io_operation(
        operation: &str,
        path: impl std::fmt::Display,
        error: impl std::fmt::Display,
    ) -> Self {
        GradepostError::FailedOperation {
            operation: operation.to_string(),
            target: path.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for a failed grading-service request
    pub fn remote(operation: impl Into<String>, error: impl std::fmt::Display) -> Self {
        GradepostError::Remote {
            operation: operation.into(),
            reason: error.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            GradepostError::UnknownFormat(_) | GradepostError::UsageError(_) => ExitCode::Usage,

            GradepostError::ConfigNotFound { .. }
            | GradepostError::InvalidConfig { .. }
            | GradepostError::CourseNotFound { .. }
            | GradepostError::NotFound { .. }
            | GradepostError::InvalidRubricFile { .. }
            | GradepostError::LineOutOfRange { .. } => ExitCode::Data,

            GradepostError::Io(_)
            | GradepostError::Toml(_)
            | GradepostError::Json(_)
            | GradepostError::FailedOperation { .. }
            | GradepostError::Remote { .. }
            | GradepostError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    fn error_type(&self) -> &'static str {
        match self {
            GradepostError::UnknownFormat(_) => "unknown_format",
            GradepostError::UsageError(_) => "usage_error",
            GradepostError::ConfigNotFound { .. } => "config_not_found",
            GradepostError::InvalidConfig { .. } => "invalid_config",
            GradepostError::CourseNotFound { .. } => "course_not_found",
            GradepostError::NotFound { .. } => "not_found",
            GradepostError::InvalidRubricFile { .. } => "invalid_rubric_file",
            GradepostError::LineOutOfRange { .. } => "line_out_of_range",
            GradepostError::Io(_) => "io_error",
            GradepostError::Toml(_) => "toml_error",
            GradepostError::Json(_) => "json_error",
            GradepostError::FailedOperation { .. } => "failed_operation",
            GradepostError::Remote { .. } => "remote_error",
            GradepostError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for gradepost operations
pub type Result<T> = std::result::Result<T, GradepostError>;
