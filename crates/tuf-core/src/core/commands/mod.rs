//! Handlers behind `tuf init`, `tuf mv`, and `tuf validate`.

mod init;
mod mv;
mod validate;

pub use init::{init_migration, InitRequest};
pub use mv::{move_block_command, MoveCommandRequest};
pub use validate::{validate_migration, ValidateRequest};

use serde_json::Value;

use crate::outcome::ExecutionOutcome;

/// Routes a typed core error to the right outcome flavour.
fn error_outcome(message: String, user_error: bool, details: Value) -> ExecutionOutcome {
    if user_error {
        ExecutionOutcome::user_error(message, details)
    } else {
        ExecutionOutcome::failure(message, details)
    }
}
