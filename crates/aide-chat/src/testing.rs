//! Recording fakes for the router's collaborators.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Notify;

use aide_core::{Persona, SearchHit, WeatherReport};
use aide_services::{LanguageModel, SearchProvider, WeatherError, WeatherProvider};

use crate::router::IntentRouter;

pub type Call = (String, Option<String>);

#[derive(Default)]
pub struct FakeWeather {
    not_found: bool,
    calls: Mutex<Vec<Call>>,
}

impl FakeWeather {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl WeatherProvider for FakeWeather {
    async fn fetch_weather(
        &self,
        location: &str,
        credential: Option<&str>,
    ) -> Result<WeatherReport, WeatherError> {
        self.calls
            .lock()
            .unwrap()
            .push((location.to_string(), credential.map(String::from)));
        if credential.is_none() {
            return Err(WeatherError::MissingCredential);
        }
        if self.not_found {
            return Err(WeatherError::Upstream {
                status: 404,
                message: "city not found".to_string(),
            });
        }
        Ok(WeatherReport {
            location: "Paris, FR".to_string(),
            temperature_c: 18,
            feels_like_c: 17,
            description: "clear sky".to_string(),
            humidity_pct: 55,
            wind_speed: 3.6,
            observed_at: Utc::now(),
        })
    }
}

#[derive(Default)]
pub struct FakeSearch {
    hits: Option<Vec<SearchHit>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeSearch {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchProvider for FakeSearch {
    async fn search_web(&self, query: &str, credential: Option<&str>) -> Option<Vec<SearchHit>> {
        self.calls
            .lock()
            .unwrap()
            .push((query.to_string(), credential.map(String::from)));
        self.hits.clone()
    }
}

/// Holds a language model call open until released.
#[derive(Default)]
pub struct Gate {
    pub entered: Notify,
    pub release: Notify,
}

/// Replies `[{persona name}] {query}`.
#[derive(Default)]
pub struct FakeLlm {
    gate: Option<Arc<Gate>>,
    calls: Mutex<Vec<(String, Persona, Option<String>)>>,
}

impl FakeLlm {
    pub fn calls(&self) -> Vec<(String, Persona, Option<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for FakeLlm {
    async fn respond(&self, query: &str, persona: &Persona, credential: Option<&str>) -> String {
        self.calls.lock().unwrap().push((
            query.to_string(),
            persona.clone(),
            credential.map(String::from),
        ));
        if let Some(gate) = &self.gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }
        format!("[{}] {}", persona.name, query)
    }
}

pub struct Fakes {
    pub weather: Arc<FakeWeather>,
    pub search: Arc<FakeSearch>,
    pub llm: Arc<FakeLlm>,
}

impl Fakes {
    pub fn new() -> Self {
        Self {
            weather: Arc::new(FakeWeather::default()),
            search: Arc::new(FakeSearch::default()),
            llm: Arc::new(FakeLlm::default()),
        }
    }

    pub fn with_weather_not_found(mut self) -> Self {
        self.weather = Arc::new(FakeWeather {
            not_found: true,
            ..Default::default()
        });
        self
    }

    pub fn with_search_hits(mut self, hits: Option<Vec<SearchHit>>) -> Self {
        self.search = Arc::new(FakeSearch {
            hits,
            ..Default::default()
        });
        self
    }

    pub fn with_llm_gate(mut self, gate: Arc<Gate>) -> Self {
        self.llm = Arc::new(FakeLlm {
            gate: Some(gate),
            ..Default::default()
        });
        self
    }

    pub fn router(&self) -> IntentRouter {
        IntentRouter::new(self.weather.clone(), self.search.clone(), self.llm.clone())
    }

    pub fn total_calls(&self) -> usize {
        self.weather.calls().len() + self.search.calls().len() + self.llm.calls().len()
    }
}
