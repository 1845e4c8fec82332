//! Exit code constants for the codeprompt CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, unknown node, invalid inputs)
//! - 2: Configuration failure
//! - 3: Git operation failure
//! - 4: Prompt service failure

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, unknown node, or invalid node inputs.
pub const USER_ERROR: i32 = 1;

/// Configuration file could not be loaded or failed validation.
pub const CONFIG_FAILURE: i32 = 2;

/// Git operation failure: clone, fetch, or branch resolution errors.
pub const GIT_FAILURE: i32 = 3;

/// The external prompt service failed.
pub const SERVICE_FAILURE: i32 = 4;
