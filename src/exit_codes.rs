//! Exit code constants for the svndiff CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, conflicting options)
//! - 2: Repository detection failure
//! - 3: Svn operation failure

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, conflicting options, or invalid config.
pub const USER_ERROR: i32 = 1;

/// Repository detection failure: svn info output missing required fields.
pub const REPOSITORY_FAILURE: i32 = 2;

/// Svn operation failure: binary missing or command exited non-zero.
pub const SVN_FAILURE: i32 = 3;
