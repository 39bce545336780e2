//! Tree operation errors.

use sightline_core::MoveError;

/// Errors from tree mutation commands.
///
/// Navigation never errors; a boundary hit reports `false` instead. Only the
/// add operations can fail, and they leave the tree and cursor untouched
/// when they do.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// The position engine rejected the token at the current position.
    #[error("cannot add \"{token}\" at the current position")]
    IllegalMove {
        /// The rejected token as given by the caller.
        token: String,
        /// The engine's reason for rejecting it.
        #[source]
        source: MoveError,
    },
}
