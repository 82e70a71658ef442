//! Persona-aware chat-completion responder.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use aide_core::Persona;

use crate::error::CompletionError;

/// Pinned completion model. Changing it is a deliberate product decision.
pub const CHAT_MODEL: &str = "gpt-4o";

/// Reply used when no language-model key is configured.
pub const MISSING_KEY_REPLY: &str = "I need an OpenAI API key to generate intelligent responses. \
Please set your API key in the API Settings section.";

/// Answers free-form queries in character.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Always returns displayable text; failures become an apology reply.
    async fn respond(&self, query: &str, persona: &Persona, credential: Option<&str>) -> String;
}

/// Build the system message that puts the model in character.
pub fn system_prompt(persona: &Persona) -> String {
    format!(
        "You are {}, an AI assistant with the following personality: {}. \
Provide helpful, accurate, and engaging responses while staying true to your personality. \
Keep responses concise and conversational.",
        persona.name, persona.description
    )
}

/// Reply shown when a completion call fails.
pub fn apology(err: &CompletionError) -> String {
    format!(
        "I apologize, but I'm having trouble processing your request right now. Error: {}",
        err
    )
}

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
pub struct OpenAiResponder {
    http: Client,
    endpoint: String,
}

impl OpenAiResponder {
    pub fn new(http: Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    async fn complete(
        &self,
        query: &str,
        persona: &Persona,
        api_key: &str,
    ) -> Result<String, CompletionError> {
        let body = json!({
            "model": CHAT_MODEL,
            "messages": [
                {"role": "system", "content": system_prompt(persona)},
                {"role": "user", "content": query},
            ],
        });

        let resp = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletion = resp
            .json()
            .await
            .map_err(|e| CompletionError::Malformed(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| CompletionError::Malformed("no completion choices".to_string()))
    }
}

#[async_trait]
impl LanguageModel for OpenAiResponder {
    async fn respond(&self, query: &str, persona: &Persona, credential: Option<&str>) -> String {
        let Some(api_key) = credential else {
            return MISSING_KEY_REPLY.to_string();
        };

        match self.complete(query, persona, api_key).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "Chat completion failed");
                apology(&e)
            }
        }
    }
}

// =============================================================================
// Wire format
// =============================================================================

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}
