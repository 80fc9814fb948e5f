//! Error types for the svndiff CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for svndiff operations.
///
/// Each variant maps to a specific exit code. Soft per-line failures in the
/// diff pipeline (metadata misses, unparseable headers) are never errors;
/// they degrade to passing the line through unchanged.
#[derive(Error, Debug)]
pub enum SvnDiffError {
    /// User provided invalid arguments, conflicting options, or bad config.
    #[error("{0}")]
    UserError(String),

    /// Repository information could not be determined.
    #[error("repository detection failed: {0}")]
    RepositoryError(String),

    /// Svn invocation failed.
    #[error("svn operation failed: {0}")]
    SvnError(String),
}

impl SvnDiffError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            SvnDiffError::UserError(_) => exit_codes::USER_ERROR,
            SvnDiffError::RepositoryError(_) => exit_codes::REPOSITORY_FAILURE,
            SvnDiffError::SvnError(_) => exit_codes::SVN_FAILURE,
        }
    }
}

/// Result type alias for svndiff operations.
pub type Result<T> = std::result::Result<T, SvnDiffError>;
