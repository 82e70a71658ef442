//! Failure types for the external collaborators.

/// Why a weather lookup produced no report.
///
/// The `Display` text is shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WeatherError {
    #[error(
        "Weather API key is not configured. Please set the WEATHER_API_KEY environment variable."
    )]
    MissingCredential,
    #[error("Error fetching weather data: {message} (Status code: {status})")]
    Upstream { status: u16, message: String },
    #[error("Error connecting to weather service: {0}")]
    Transport(String),
    #[error("Error reading weather data: {0}")]
    Malformed(String),
}

/// Why the primary search provider was skipped in favour of the fallback.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
    #[error("search provider returned status {0}")]
    Status(u16),
    #[error("search request failed: {0}")]
    Transport(String),
    #[error("search response could not be decoded: {0}")]
    Decode(String),
    #[error("reference URL is invalid: {0}")]
    InvalidUrl(String),
}

/// Why a chat completion failed. Embedded in the apology reply.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CompletionError {
    #[error("{0}")]
    Transport(String),
    #[error("Error code: {status} - {body}")]
    Status { status: u16, body: String },
    #[error("malformed completion response: {0}")]
    Malformed(String),
}
