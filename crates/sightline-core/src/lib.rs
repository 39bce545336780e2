//! Position engine adapter: move interpretation, legality, and FEN output.

mod error;
mod position;

pub use error::MoveError;
pub use position::Position;

pub use shakmaty::{Color, File, Rank, Role, Square};
