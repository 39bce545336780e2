//! Interactive analysis shell for sightline.

pub mod command;
pub mod error;
pub mod session;

pub use command::{Command, Toggle};
pub use error::ShellError;
pub use session::{DisplayOptions, Outcome, Session};
