//! Error types for codeprompt.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use crate::prompt::TemplateError;
use thiserror::Error;

/// Main error type for codeprompt operations.
///
/// Each variant maps to a specific exit code of the command-line host.
#[derive(Error, Debug)]
pub enum NodeError {
    /// Invalid node inputs or an unknown node identifier.
    #[error("{0}")]
    UserError(String),

    /// The configuration file could not be read, parsed, or validated.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Git operation failed (clone, unreachable remote, missing branch).
    #[error("Git operation failed: {0}")]
    GitError(String),

    /// The external prompt service failed or returned a non-zero status.
    #[error("Prompt service failed: {0}")]
    ServiceError(String),

    /// A built-in or configured prompt template is malformed.
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    /// Filesystem failure outside of per-file reads.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl NodeError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            NodeError::UserError(_) => exit_codes::USER_ERROR,
            NodeError::Io(_) => exit_codes::USER_ERROR,
            NodeError::Template(_) => exit_codes::CONFIG_FAILURE,
            NodeError::ConfigError(_) => exit_codes::CONFIG_FAILURE,
            NodeError::GitError(_) => exit_codes::GIT_FAILURE,
            NodeError::ServiceError(_) => exit_codes::SERVICE_FAILURE,
        }
    }
}

/// Result type alias for codeprompt operations.
pub type Result<T> = std::result::Result<T, NodeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_error_has_correct_exit_code() {
        let err = NodeError::UserError("unknown node".to_string());
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn config_error_has_correct_exit_code() {
        let err = NodeError::ConfigError("bad yaml".to_string());
        assert_eq!(err.exit_code(), exit_codes::CONFIG_FAILURE);
    }

    #[test]
    fn git_error_has_correct_exit_code() {
        let err = NodeError::GitError("clone failed".to_string());
        assert_eq!(err.exit_code(), exit_codes::GIT_FAILURE);
    }

    #[test]
    fn service_error_has_correct_exit_code() {
        let err = NodeError::ServiceError("exit code 2".to_string());
        assert_eq!(err.exit_code(), exit_codes::SERVICE_FAILURE);
    }

    #[test]
    fn io_errors_convert_with_question_mark() {
        fn open_missing() -> Result<()> {
            std::fs::read("/definitely/not/here/codeprompt")?;
            Ok(())
        }

        let err = open_missing().unwrap_err();
        assert!(matches!(err, NodeError::Io(_)));
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn error_messages_are_descriptive() {
        let err = NodeError::GitError("branch 'dev' not found".to_string());
        assert_eq!(err.to_string(), "Git operation failed: branch 'dev' not found");

        let err = NodeError::ServiceError("timed out".to_string());
        assert_eq!(err.to_string(), "Prompt service failed: timed out");
    }
}
