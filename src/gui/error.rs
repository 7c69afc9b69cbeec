use std::fmt;

/// Errors that can occur while parsing a plugin command
#[derive(Debug, Clone, PartialEq)]
pub enum CommandError {
    /// Command name not recognised by any widget
    UnknownCommand(String),

    /// Subcommand needs an argument that wasn't given
    MissingArgument(String),

    /// Argument couldn't be parsed for the subcommand
    InvalidArgument {
        subcommand: String,
        value: String,
    },
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CommandError::UnknownCommand(name) => {
                write!(f, "Unknown plugin command: {}", name)
            }
            CommandError::MissingArgument(subcommand) => {
                write!(f, "Missing argument for {}", subcommand)
            }
            CommandError::InvalidArgument { subcommand, value } => {
                write!(f, "Invalid argument for {}: {}", subcommand, value)
            }
        }
    }
}

impl std::error::Error for CommandError {}

impl From<CommandError> for String {
    fn from(error: CommandError) -> Self {
        error.to_string()
    }
}
