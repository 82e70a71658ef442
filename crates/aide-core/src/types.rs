//! Domain types shared across the Aide crates.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Persona
// =============================================================================

/// Name and personality description defining the assistant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    pub name: String,
    pub description: String,
}

impl Persona {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

impl Default for Persona {
    fn default() -> Self {
        Self::new("Assistant", "I'm a helpful AI assistant.")
    }
}

// =============================================================================
// Transcript turns
// =============================================================================

/// Speaker of a transcript turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// One entry in a session transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            created_at: Utc::now(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
            created_at: Utc::now(),
        }
    }
}

// =============================================================================
// Credentials
// =============================================================================

/// The three provider secrets a session can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialName {
    LanguageModel,
    Weather,
    Search,
}

impl CredentialName {
    pub const ALL: [CredentialName; 3] = [
        CredentialName::LanguageModel,
        CredentialName::Weather,
        CredentialName::Search,
    ];

    /// Environment variable the credential is read from at startup.
    pub fn env_var(self) -> &'static str {
        match self {
            CredentialName::LanguageModel => "OPENAI_API_KEY",
            CredentialName::Weather => "WEATHER_API_KEY",
            CredentialName::Search => "SERPAPI_KEY",
        }
    }
}

impl fmt::Display for CredentialName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.env_var())
    }
}

/// Provider secrets, one optional slot per [`CredentialName`].
///
/// Empty or whitespace-only values are stored as absent.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CredentialSet {
    language_model: Option<String>,
    weather: Option<String>,
    search: Option<String>,
}

impl CredentialSet {
    /// Read all three credentials from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build a set by resolving each credential's environment variable name.
    pub fn from_lookup<F>(mut lookup: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut set = Self::default();
        for name in CredentialName::ALL {
            set.set(name, lookup(name.env_var()));
        }
        set
    }

    pub fn get(&self, name: CredentialName) -> Option<&str> {
        self.slot(name).as_deref()
    }

    /// Replace one slot. `None` or a blank value clears it.
    pub fn set(&mut self, name: CredentialName, value: Option<String>) {
        let value = value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        *self.slot_mut(name) = value;
    }

    pub fn is_set(&self, name: CredentialName) -> bool {
        self.slot(name).is_some()
    }

    pub fn status(&self) -> CredentialStatus {
        CredentialStatus {
            language_model: self.is_set(CredentialName::LanguageModel),
            weather: self.is_set(CredentialName::Weather),
            search: self.is_set(CredentialName::Search),
        }
    }

    fn slot(&self, name: CredentialName) -> &Option<String> {
        match name {
            CredentialName::LanguageModel => &self.language_model,
            CredentialName::Weather => &self.weather,
            CredentialName::Search => &self.search,
        }
    }

    fn slot_mut(&mut self, name: CredentialName) -> &mut Option<String> {
        match name {
            CredentialName::LanguageModel => &mut self.language_model,
            CredentialName::Weather => &mut self.weather,
            CredentialName::Search => &mut self.search,
        }
    }
}

// Secrets never reach logs through `{:?}`.
impl fmt::Debug for CredentialSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mask = |set: bool| if set { "<set>" } else { "<unset>" };
        f.debug_struct("CredentialSet")
            .field("language_model", &mask(self.language_model.is_some()))
            .field("weather", &mask(self.weather.is_some()))
            .field("search", &mask(self.search.is_some()))
            .finish()
    }
}

/// Which credential slots are populated. Safe to expose to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialStatus {
    pub language_model: bool,
    pub weather: bool,
    pub search: bool,
}

// =============================================================================
// Provider results
// =============================================================================

/// Normalized current-weather observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    /// `"{city}, {country}"` as reported by the provider.
    pub location: String,
    pub temperature_c: i64,
    pub feels_like_c: i64,
    pub description: String,
    pub humidity_pct: i64,
    pub wind_speed: f64,
    pub observed_at: DateTime<Utc>,
}

/// One ranked web search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub link: String,
    pub snippet: String,
}
