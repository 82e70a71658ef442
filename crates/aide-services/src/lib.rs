//! External collaborators used by the intent router.
//!
//! Each provider sits behind an async trait so the router can be driven by
//! fakes in tests. The HTTP implementations make exactly one attempt per
//! call and convert every failure into a value the router can render.

pub mod error;
pub mod extract;
pub mod llm;
pub mod search;
pub mod weather;

pub use error::{CompletionError, SearchError, WeatherError};
pub use llm::{LanguageModel, OpenAiResponder, CHAT_MODEL, MISSING_KEY_REPLY};
pub use search::{ReferenceFallback, SearchProvider, SerpApiClient};
pub use weather::{OpenWeatherClient, WeatherProvider};
