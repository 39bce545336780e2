//! Move-variation tree: branching move history with cursor navigation and
//! position reconstruction.

mod error;
mod node;
mod tree;

pub use error::TreeError;
pub use node::{MoveNode, NodeId};
pub use tree::{GameTree, MainLine};
