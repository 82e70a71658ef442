use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Top-level configuration for the Aide server.
///
/// Loaded from `~/.aide/config.toml` by default. Credentials are not part of
/// the file; they come from the environment (see [`crate::CredentialSet`]).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AideConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
}

impl AideConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: AideConfig = toml::from_str(&content)?;
        Ok(config)
    }
}

/// General server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
    /// Interface the HTTP server binds to.
    pub host: String,
    /// HTTP server port.
    pub port: u16,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            host: "127.0.0.1".to_string(),
            port: 3040,
        }
    }
}

/// Chat input limits and session lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Maximum accepted message length in characters.
    pub max_message_length: usize,
    /// Idle minutes after which a session is dropped. 0 keeps sessions forever.
    pub session_timeout_minutes: u32,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            max_message_length: 2000,
            session_timeout_minutes: 30,
        }
    }
}

/// Endpoints of the third-party providers.
///
/// Overridable so tests and self-hosted proxies can point elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    /// Current-weather endpoint (OpenWeatherMap compatible).
    pub weather_url: String,
    /// Web search endpoint (SerpAPI compatible).
    pub search_url: String,
    /// Base URL of the reference site used as search fallback.
    pub reference_url: String,
    /// Chat-completion endpoint (OpenAI compatible).
    pub chat_url: String,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            weather_url: "https://api.openweathermap.org/data/2.5/weather".to_string(),
            search_url: "https://serpapi.com/search".to_string(),
            reference_url: "https://en.wikipedia.org".to_string(),
            chat_url: "https://api.openai.com/v1/chat/completions".to_string(),
        }
    }
}
