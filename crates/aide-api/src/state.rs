//! Application state shared across all route handlers.

use std::sync::Arc;
use std::time::Instant;

use reqwest::Client;

use aide_chat::{ChatOrchestrator, IntentRouter};
use aide_core::config::ProvidersConfig;
use aide_core::{AideConfig, CredentialSet};
use aide_services::{OpenAiResponder, OpenWeatherClient, ReferenceFallback, SerpApiClient};

/// Shared application state.
///
/// All fields use `Arc` for cheap cloning across handler tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration, read-only after startup.
    pub config: Arc<AideConfig>,
    /// Session store and message routing.
    pub chat: Arc<ChatOrchestrator>,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: AideConfig, chat: ChatOrchestrator) -> Self {
        Self {
            config: Arc::new(config),
            chat: Arc::new(chat),
            start_time: Instant::now(),
        }
    }

    /// Wire the HTTP-backed providers named in `config` around one shared
    /// client. `credentials` seed every new session.
    pub fn with_providers(config: AideConfig, credentials: CredentialSet, http: Client) -> Self {
        let router = provider_router(&config.providers, http);
        let chat = ChatOrchestrator::new(router, credentials, config.chat.clone());
        Self::new(config, chat)
    }
}

fn provider_router(providers: &ProvidersConfig, http: Client) -> IntentRouter {
    let fallback = ReferenceFallback::new(http.clone(), providers.reference_url.clone());
    IntentRouter::new(
        Arc::new(OpenWeatherClient::new(
            http.clone(),
            providers.weather_url.clone(),
        )),
        Arc::new(SerpApiClient::new(
            http.clone(),
            providers.search_url.clone(),
            fallback,
        )),
        Arc::new(OpenAiResponder::new(http, providers.chat_url.clone())),
    )
}
