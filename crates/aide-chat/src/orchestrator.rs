//! Chat orchestrator: owns the session store and routes messages.
//!
//! The store lock is only held for synchronous bookkeeping. A message is
//! validated and its user turn appended under the lock, the router runs
//! with a context snapshot, and the reply is appended under a fresh lock
//! unless the transcript was restarted in the meantime.
//!
//! Sessions idle for longer than `session_timeout_minutes` are evicted.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use aide_core::config::ChatConfig;
use aide_core::{CredentialSet, CredentialStatus, Persona, Turn};

use crate::error::ChatError;
use crate::router::IntentRouter;
use crate::session::ChatSession;
use crate::types::{CredentialUpdate, SessionSummary, TranscriptUpdate};

/// Central coordinator between the session store and the intent router.
pub struct ChatOrchestrator {
    router: IntentRouter,
    sessions: Mutex<HashMap<Uuid, ChatSession>>,
    default_credentials: CredentialSet,
    config: ChatConfig,
}

impl ChatOrchestrator {
    /// `default_credentials` seeds every new session.
    pub fn new(router: IntentRouter, default_credentials: CredentialSet, config: ChatConfig) -> Self {
        Self {
            router,
            sessions: Mutex::new(HashMap::new()),
            default_credentials,
            config,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<Uuid, ChatSession>>, ChatError> {
        self.sessions
            .lock()
            .map_err(|e| ChatError::StateLock(e.to_string()))
    }

    fn is_expired(&self, session: &ChatSession, now: DateTime<Utc>) -> bool {
        let timeout = self.config.session_timeout_minutes;
        timeout > 0 && session.is_expired(now, timeout)
    }

    /// Lock the store with expired sessions removed.
    fn lock_live(&self) -> Result<MutexGuard<'_, HashMap<Uuid, ChatSession>>, ChatError> {
        let mut sessions = self.lock()?;
        let now = Utc::now();
        sessions.retain(|id, s| {
            let expired = self.is_expired(s, now);
            if expired {
                info!(session_id = %id, "Session expired");
            }
            !expired
        });
        Ok(sessions)
    }

    fn with_session<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut ChatSession) -> Result<T, ChatError>,
    ) -> Result<T, ChatError> {
        let mut sessions = self.lock()?;
        let expired = match sessions.get(&id) {
            Some(s) => self.is_expired(s, Utc::now()),
            None => return Err(ChatError::SessionNotFound(id)),
        };
        if expired {
            sessions.remove(&id);
            info!(session_id = %id, "Session expired");
            return Err(ChatError::SessionNotFound(id));
        }
        let session = sessions
            .get_mut(&id)
            .ok_or(ChatError::SessionNotFound(id))?;
        f(session)
    }

    pub fn create_session(&self) -> Result<SessionSummary, ChatError> {
        let session = ChatSession::new(self.default_credentials.clone());
        let summary = session.summary();
        self.lock_live()?.insert(session.id(), session);
        info!(session_id = %summary.id, "Session created");
        Ok(summary)
    }

    pub fn get_session(&self, id: Uuid) -> Result<SessionSummary, ChatError> {
        self.with_session(id, |s| Ok(s.summary()))
    }

    /// All sessions, most recently active first.
    pub fn list_sessions(&self) -> Result<Vec<SessionSummary>, ChatError> {
        let mut summaries: Vec<SessionSummary> =
            self.lock_live()?.values().map(ChatSession::summary).collect();
        summaries.sort_by(|a, b| b.last_message_at.cmp(&a.last_message_at));
        Ok(summaries)
    }

    pub fn session_count(&self) -> usize {
        self.lock_live().map(|s| s.len()).unwrap_or(0)
    }

    pub fn delete_session(&self, id: Uuid) -> Result<(), ChatError> {
        if self.lock()?.remove(&id).is_none() {
            return Err(ChatError::SessionNotFound(id));
        }
        info!(session_id = %id, "Session deleted");
        Ok(())
    }

    /// Configure the persona; the transcript restarts with its introduction.
    pub fn configure(
        &self,
        id: Uuid,
        name: &str,
        description: &str,
    ) -> Result<SessionSummary, ChatError> {
        self.with_session(id, |s| {
            s.configure(name, description)?;
            info!(session_id = %id, assistant = %s.persona().name, "Assistant configured");
            Ok(s.summary())
        })
    }

    /// Return the session to the setup view.
    pub fn reset(&self, id: Uuid) -> Result<SessionSummary, ChatError> {
        self.with_session(id, |s| {
            s.reset();
            info!(session_id = %id, "Session reset to setup");
            Ok(s.summary())
        })
    }

    /// Replace the persona of a session and clear its transcript.
    pub fn reset_persona(&self, id: Uuid, persona: Persona) -> Result<SessionSummary, ChatError> {
        let persona = Persona::new(persona.name.trim(), persona.description.trim());
        if persona.name.is_empty() || persona.description.is_empty() {
            return Err(ChatError::IncompletePersona);
        }
        self.with_session(id, |s| {
            s.reset_persona(persona);
            info!(session_id = %id, assistant = %s.persona().name, "Persona replaced");
            Ok(s.summary())
        })
    }

    /// Apply a credential change; returns the new status and any warnings.
    pub fn update_credentials(
        &self,
        id: Uuid,
        update: CredentialUpdate,
    ) -> Result<(CredentialStatus, Vec<String>), ChatError> {
        self.with_session(id, |s| {
            let warnings = s.update_credentials(update);
            let status = s.credentials().status();
            info!(session_id = %id, ?status, "Credentials updated");
            Ok((status, warnings))
        })
    }

    pub fn credential_status(&self, id: Uuid) -> Result<CredentialStatus, ChatError> {
        self.with_session(id, |s| Ok(s.credentials().status()))
    }

    /// Rendered transcript; inserts the welcome greeting when due.
    pub fn transcript(&self, id: Uuid) -> Result<Vec<Turn>, ChatError> {
        self.with_session(id, |s| Ok(s.render().to_vec()))
    }

    /// Handle one user message and return the turns it appended.
    pub async fn handle_message(
        &self,
        id: Uuid,
        text: &str,
    ) -> Result<TranscriptUpdate, ChatError> {
        if text.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        let max = self.config.max_message_length;
        if text.chars().count() > max {
            return Err(ChatError::MessageTooLong(max));
        }

        let (mut appended, ctx, generation) = self.with_session(id, |s| {
            if !s.is_setup_complete() {
                return Err(ChatError::SetupIncomplete);
            }
            let mut appended: Vec<Turn> = s.ensure_greeting().into_iter().collect();
            let user_turn = Turn::user(text);
            s.push(user_turn.clone());
            appended.push(user_turn);
            Ok((appended, s.context(), s.generation()))
        })?;

        let (intent, reply) = self.router.classify_and_respond(text, &ctx).await;
        debug!(session_id = %id, %intent, "Reply composed");

        let assistant_turn = Turn::assistant(reply.text);
        let (transcript_len, current) = self.with_session(id, |s| {
            if s.generation() != generation {
                debug!(session_id = %id, "Transcript restarted while replying, reply dropped");
                return Ok((s.transcript().len(), false));
            }
            s.push(assistant_turn.clone());
            Ok((s.transcript().len(), true))
        })?;
        // A restart wiped the turns appended above as well.
        let hits = if current {
            appended.push(assistant_turn);
            reply.hits
        } else {
            appended.clear();
            Vec::new()
        };

        Ok(TranscriptUpdate {
            session_id: id,
            intent,
            appended,
            hits,
            transcript_len,
        })
    }
}
