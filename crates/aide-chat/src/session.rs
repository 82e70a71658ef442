//! Per-user session state: persona, transcript and credentials.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use aide_core::{CredentialName, CredentialSet, Persona, Turn};

use crate::error::ChatError;
use crate::response;
use crate::types::{CredentialUpdate, SessionContext, SessionSummary};

const MISSING_LLM_KEY_WARNING: &str =
    "OpenAI API key is not set. The assistant will have limited functionality.";

/// One conversation with a configured assistant.
#[derive(Debug, Clone)]
pub struct ChatSession {
    id: Uuid,
    persona: Persona,
    setup_complete: bool,
    transcript: Vec<Turn>,
    credentials: CredentialSet,
    started_at: DateTime<Utc>,
    last_message_at: DateTime<Utc>,
    generation: u64,
}

impl ChatSession {
    /// A fresh session in the setup state, seeded with `credentials`.
    pub fn new(credentials: CredentialSet) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            persona: Persona::default(),
            setup_complete: false,
            transcript: Vec::new(),
            credentials,
            started_at: now,
            last_message_at: now,
            generation: 0,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn persona(&self) -> &Persona {
        &self.persona
    }

    pub fn is_setup_complete(&self) -> bool {
        self.setup_complete
    }

    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    pub fn credentials(&self) -> &CredentialSet {
        &self.credentials
    }

    /// Bumped whenever the transcript is restarted. A reply computed for an
    /// older generation belongs to a conversation that no longer exists.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Idle for strictly longer than `timeout_minutes` at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>, timeout_minutes: u32) -> bool {
        let idle = now.signed_duration_since(self.last_message_at).num_seconds();
        idle > i64::from(timeout_minutes) * 60
    }

    fn restart(&mut self) {
        self.transcript.clear();
        self.generation += 1;
    }

    /// Set up the assistant and start a new transcript with its introduction.
    pub fn configure(&mut self, name: &str, description: &str) -> Result<(), ChatError> {
        let (name, description) = (name.trim(), description.trim());
        if name.is_empty() || description.is_empty() {
            return Err(ChatError::IncompletePersona);
        }

        self.persona = Persona::new(name, description);
        self.setup_complete = true;
        self.restart();
        self.push(Turn::assistant(response::setup_greeting(&self.persona)));
        Ok(())
    }

    /// Swap in a new persona and clear the transcript. The welcome greeting
    /// follows on the next render.
    pub fn reset_persona(&mut self, persona: Persona) {
        self.persona = persona;
        self.restart();
    }

    /// Return to the setup view. Credentials are kept.
    pub fn reset(&mut self) {
        self.persona = Persona::default();
        self.setup_complete = false;
        self.restart();
    }

    /// Append the welcome greeting if the session is active and the
    /// transcript is empty. Returns the appended turn.
    pub fn ensure_greeting(&mut self) -> Option<Turn> {
        if !self.setup_complete || !self.transcript.is_empty() {
            return None;
        }
        let greeting = Turn::assistant(response::welcome_greeting(&self.persona));
        self.push(greeting.clone());
        Some(greeting)
    }

    /// Transcript as displayed, greeting included when due.
    pub fn render(&mut self) -> &[Turn] {
        self.ensure_greeting();
        &self.transcript
    }

    pub fn push(&mut self, turn: Turn) {
        self.last_message_at = turn.created_at;
        self.transcript.push(turn);
    }

    /// Apply a partial credential change and return the warnings to show.
    pub fn update_credentials(&mut self, update: CredentialUpdate) -> Vec<String> {
        let changes = [
            (CredentialName::LanguageModel, update.language_model),
            (CredentialName::Weather, update.weather),
            (CredentialName::Search, update.search),
        ];
        for (name, value) in changes {
            if let Some(value) = value {
                self.credentials.set(name, Some(value));
            }
        }

        let mut warnings = Vec::new();
        if !self.credentials.is_set(CredentialName::LanguageModel) {
            warnings.push(MISSING_LLM_KEY_WARNING.to_string());
        }
        warnings
    }

    /// Snapshot handed to the router for one message.
    pub fn context(&self) -> SessionContext {
        SessionContext {
            persona: self.persona.clone(),
            credentials: self.credentials.clone(),
        }
    }

    #[cfg(test)]
    pub(crate) fn backdate(&mut self, seconds: i64) {
        self.last_message_at -= chrono::Duration::seconds(seconds);
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            id: self.id,
            persona: self.persona.clone(),
            setup_complete: self.setup_complete,
            credentials: self.credentials.status(),
            turn_count: self.transcript.len(),
            started_at: self.started_at,
            last_message_at: self.last_message_at,
        }
    }
}
