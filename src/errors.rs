use thiserror::Error;

/// Main error type for the Pokedex client
#[derive(Debug, Error)]
pub enum PokedexError {
    /// The request never produced a response (connection refused, timeout, ...)
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The API answered with a non-success status
    #[error("{message}")]
    Status { status: u16, message: String },
    /// The API answered with a body we could not decode
    #[error("malformed response: {0}")]
    Decode(String),
    /// A form refused to submit
    #[error("invalid form: {0}")]
    Validation(#[from] FormError),
    /// The configuration file or an override could not be used
    #[error("configuration error: {0}")]
    Config(String),
    /// The favorites file could not be read or written
    #[error("storage error: {0}")]
    Storage(String),
}

impl PokedexError {
    /// HTTP status of the failure, when the server produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            PokedexError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors raised by the create and edit forms before anything is sent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("an English name is required")]
    MissingEnglishName,
    #[error("at least one type is required")]
    MissingType,
    #[error("a Pokemon has at most {max} types")]
    TooManyTypes { max: usize },
    #[error("nothing to confirm: the form is not awaiting confirmation")]
    NotConfirming,
    #[error("no edit in progress")]
    NotEditing,
}

impl From<std::io::Error> for PokedexError {
    fn from(err: std::io::Error) -> Self {
        PokedexError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for PokedexError {
    fn from(err: serde_json::Error) -> Self {
        PokedexError::Decode(err.to_string())
    }
}

/// Type alias for Results using PokedexError
pub type PokedexResult<T> = Result<T, PokedexError>;
