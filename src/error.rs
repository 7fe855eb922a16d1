use thiserror::Error;

use crate::option::Kind;

/// A registered option whose declaration cannot be bound.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("unsupported option type `{tag}` for flag `{flag}`")]
    UnsupportedType { flag: String, tag: String },

    #[error("invalid storage for flag `{flag}`: expected {expected} storage, found {actual}")]
    StorageMismatch {
        flag: String,
        expected: Kind,
        actual: Kind,
    },

    #[error("invalid default value for flag `{flag}`: expected {expected}, found {actual}")]
    DefaultMismatch {
        flag: String,
        expected: Kind,
        actual: Kind,
    },

    #[error("invalid flag name `{0}`")]
    InvalidFlagName(String),

    #[error("flag `{0}` is registered more than once")]
    DuplicateFlag(String),
}

/// Malformed flag input.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Flags(#[from] clap::Error),

    /// `-h` or `-help` was given; carries the rendered flag usage.
    #[error("help requested")]
    HelpRequested(String),

    #[error("failed to read flag `{flag}`: {source}")]
    Matches {
        flag: String,
        #[source]
        source: clap::parser::MatchesError,
    },
}

impl ParseError {
    /// Terminate the process the way the flag backend does for bad input.
    pub fn exit(&self) -> ! {
        match self {
            ParseError::Flags(e) => e.exit(),
            ParseError::HelpRequested(text) => {
                print!("{text}");
                std::process::exit(0)
            }
            ParseError::Matches { .. } => {
                eprintln!("error: {self}");
                std::process::exit(2)
            }
        }
    }
}

/// Errors returned by [`Cli::run`](crate::Cli::run). Each one has already been
/// reported through the logger when it is returned.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("unsupported command `{0}`")]
    UnknownCommand(String),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}
