//! Error types for move-token interpretation.

use shakmaty::san::{ParseSanError, SanError};

/// Errors when interpreting a move token against a position.
#[derive(Debug, thiserror::Error)]
pub enum MoveError {
    /// The token is not syntactically valid algebraic notation.
    #[error("invalid move token: \"{token}\"")]
    InvalidSan {
        /// The token as given by the caller.
        token: String,
        /// The underlying SAN parse error.
        #[source]
        source: ParseSanError,
    },
    /// The token parses as SAN but names no legal move in this position.
    #[error("illegal move: \"{token}\"")]
    IllegalMove {
        /// The token as given by the caller.
        token: String,
        /// The underlying SAN resolution error.
        #[source]
        source: SanError,
    },
}
