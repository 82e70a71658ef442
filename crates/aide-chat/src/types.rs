//! Request, event and view types of the chat engine.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use aide_core::{CredentialSet, CredentialStatus, Persona, SearchHit, Turn};

/// Handling path chosen for an utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Time,
    Weather,
    Search,
    General,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Intent::Time => "time",
            Intent::Weather => "weather",
            Intent::Search => "search",
            Intent::General => "general",
        };
        f.write_str(s)
    }
}

/// Result of classification: the intent plus the parameter its handler needs.
///
/// `parameter` is the location for weather and the query for search; `None`
/// for those intents means extraction failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutedIntent {
    pub intent: Intent,
    pub parameter: Option<String>,
}

/// Snapshot of what collaborators may see of a session.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    pub persona: Persona,
    pub credentials: CredentialSet,
}

/// Text reply of the router along with any search hits it listed.
#[derive(Debug, Clone, PartialEq)]
pub struct RouterReply {
    pub text: String,
    pub hits: Vec<SearchHit>,
}

impl RouterReply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            hits: Vec::new(),
        }
    }
}

/// Event returned after a message was handled: the turns it appended.
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptUpdate {
    pub session_id: Uuid,
    pub intent: Intent,
    pub appended: Vec<Turn>,
    /// Search hits shown in the reply (at most three), for rich rendering.
    pub hits: Vec<SearchHit>,
    pub transcript_len: usize,
}

/// Partial credential change. `None` leaves a slot untouched; an empty
/// string clears it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CredentialUpdate {
    #[serde(default)]
    pub language_model: Option<String>,
    #[serde(default)]
    pub weather: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
}

/// Public view of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: Uuid,
    pub persona: Persona,
    pub setup_complete: bool,
    pub credentials: CredentialStatus,
    pub turn_count: usize,
    pub started_at: DateTime<Utc>,
    pub last_message_at: DateTime<Utc>,
}
