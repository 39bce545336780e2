//! Shell errors.

/// Errors surfaced by command parsing and the session loop.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    /// A command that needs an argument was given none.
    #[error("missing argument: {command} <{argument}>")]
    MissingArgument {
        /// The command as typed.
        command: &'static str,
        /// What was expected after it.
        argument: &'static str,
    },

    /// `toggle` named an option that does not exist.
    #[error("unknown toggle: \"{name}\"")]
    UnknownToggle {
        /// The option as typed.
        name: String,
    },

    /// Reading from stdin failed.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}
