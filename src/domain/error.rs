use thiserror::Error;

/// Fintrack unified error type
#[derive(Error, Debug)]
pub enum FintrackError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Login rejected by the backend. Displays the server-supplied
    /// message verbatim so callers can render it next to the form that
    /// triggered it.
    #[error("{message}")]
    Authentication { message: String },

    /// Registration rejected by the backend (bad input or conflict).
    #[error("{message}")]
    Registration { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Credential storage error: {message}")]
    Credential { message: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Output error: {0}")]
    Output(String),
}

pub type FintrackResult<T> = Result<T, FintrackError>;
