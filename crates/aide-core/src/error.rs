use thiserror::Error;

/// Top-level error type for Aide.
///
/// Subsystem crates define their own error types and convert into
/// `AideError` where a failure has to cross a crate boundary.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AideError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP client error: {0}")]
    Http(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for AideError {
    fn from(err: toml::de::Error) -> Self {
        AideError::Config(err.to_string())
    }
}

/// A specialized `Result` type for Aide operations.
pub type Result<T> = std::result::Result<T, AideError>;
