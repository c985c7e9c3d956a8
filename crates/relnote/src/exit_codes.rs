//! Exit codes for the CLI

use relnote_core::RelnoteError;

/// Success
pub const SUCCESS: i32 = 0;

/// General error
pub const ERROR: i32 = 1;

/// Configuration error
pub const CONFIG_ERROR: i32 = 2;

/// Exit code for a failed command: malformed configuration gets its own code
pub fn for_error(err: &anyhow::Error) -> i32 {
    let is_config = err
        .downcast_ref::<RelnoteError>()
        .is_some_and(|e| e.is_config());
    if is_config {
        CONFIG_ERROR
    } else {
        ERROR
    }
}
