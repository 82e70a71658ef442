//! Intent router: classifies an utterance and produces the assistant reply.
//!
//! Classification walks [`RULES`] in order and the first rule whose
//! predicate holds wins. Predicates test raw substrings of the lowercased
//! utterance, so a weather question that also mentions "find" is still a
//! weather question.

use std::sync::Arc;

use chrono::{DateTime, Local};
use tracing::debug;

use aide_core::CredentialName;
use aide_services::{LanguageModel, SearchProvider, WeatherProvider};

use crate::parser;
use crate::response::{self, LOCATION_PROMPT, MAX_LISTED_RESULTS, QUERY_PROMPT};
use crate::types::{Intent, RoutedIntent, RouterReply, SessionContext};

/// One classification rule. `extract` runs only after `matches` held.
pub struct IntentRule {
    pub intent: Intent,
    pub matches: fn(&str) -> bool,
    pub extract: fn(&str) -> Option<String>,
}

/// Rules in priority order. Anything unmatched is [`Intent::General`].
pub const RULES: &[IntentRule] = &[
    IntentRule {
        intent: Intent::Time,
        matches: is_time_request,
        extract: no_parameter,
    },
    IntentRule {
        intent: Intent::Weather,
        matches: is_weather_request,
        extract: parser::extract_location,
    },
    IntentRule {
        intent: Intent::Search,
        matches: is_search_request,
        extract: parser::extract_search_query,
    },
];

fn is_time_request(text: &str) -> bool {
    text.contains("time") && ["what", "tell", "current"].iter().any(|w| text.contains(w))
}

fn is_weather_request(text: &str) -> bool {
    (text.contains("weather") || text.contains("temperature"))
        && (text.contains("what") || text.contains("how"))
}

fn is_search_request(text: &str) -> bool {
    ["search", "find", "look up"].iter().any(|w| text.contains(w))
}

fn no_parameter(_: &str) -> Option<String> {
    None
}

/// Classify an utterance without invoking any collaborator.
pub fn classify(utterance: &str) -> RoutedIntent {
    let lowered = utterance.to_lowercase();
    RULES
        .iter()
        .find(|rule| (rule.matches)(&lowered))
        .map(|rule| RoutedIntent {
            intent: rule.intent,
            parameter: (rule.extract)(&lowered),
        })
        .unwrap_or(RoutedIntent {
            intent: Intent::General,
            parameter: None,
        })
}

/// Dispatches classified utterances to the external collaborators.
pub struct IntentRouter {
    weather: Arc<dyn WeatherProvider>,
    search: Arc<dyn SearchProvider>,
    llm: Arc<dyn LanguageModel>,
}

impl IntentRouter {
    pub fn new(
        weather: Arc<dyn WeatherProvider>,
        search: Arc<dyn SearchProvider>,
        llm: Arc<dyn LanguageModel>,
    ) -> Self {
        Self {
            weather,
            search,
            llm,
        }
    }

    pub fn classify(&self, utterance: &str) -> RoutedIntent {
        classify(utterance)
    }

    /// Produce the reply for an already classified utterance.
    ///
    /// `utterance` is the original text; the general path forwards it with
    /// its casing intact. At most one collaborator is called.
    pub async fn respond(
        &self,
        routed: &RoutedIntent,
        utterance: &str,
        ctx: &SessionContext,
        now: DateTime<Local>,
    ) -> RouterReply {
        match routed.intent {
            Intent::Time => RouterReply::text(response::compose_time(&now)),
            Intent::Weather => {
                let Some(location) = routed.parameter.as_deref() else {
                    return RouterReply::text(LOCATION_PROMPT);
                };
                let result = self
                    .weather
                    .fetch_weather(location, ctx.credentials.get(CredentialName::Weather))
                    .await;
                RouterReply::text(response::compose_weather(location, &result))
            }
            Intent::Search => {
                let Some(query) = routed.parameter.as_deref() else {
                    return RouterReply::text(QUERY_PROMPT);
                };
                let hits = self
                    .search
                    .search_web(query, ctx.credentials.get(CredentialName::Search))
                    .await;
                let text = response::compose_search(query, hits.as_deref());
                let hits = hits
                    .map(|h| h.into_iter().take(MAX_LISTED_RESULTS).collect())
                    .unwrap_or_default();
                RouterReply { text, hits }
            }
            Intent::General => RouterReply::text(
                self.llm
                    .respond(
                        utterance,
                        &ctx.persona,
                        ctx.credentials.get(CredentialName::LanguageModel),
                    )
                    .await,
            ),
        }
    }

    /// Classify and answer in one step using the local clock.
    pub async fn classify_and_respond(
        &self,
        utterance: &str,
        ctx: &SessionContext,
    ) -> (Intent, RouterReply) {
        let routed = self.classify(utterance);
        debug!(intent = %routed.intent, has_parameter = routed.parameter.is_some(), "Routed utterance");
        let reply = self.respond(&routed, utterance, ctx, Local::now()).await;
        (routed.intent, reply)
    }
}
