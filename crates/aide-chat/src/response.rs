//! Reply composition for each intent.

use chrono::{DateTime, Local};

use aide_core::{Persona, SearchHit, WeatherReport};
use aide_services::WeatherError;

/// Number of search hits listed in a reply.
pub const MAX_LISTED_RESULTS: usize = 3;

pub const LOCATION_PROMPT: &str =
    "I need a location to check the weather. Please ask about the weather in a specific city.";

pub const QUERY_PROMPT: &str =
    "I need a search query. Could you please specify what you'd like me to search for?";

/// `The current time is HH:MM:SS on Weekday, Month DD, YYYY.`
pub fn compose_time(now: &DateTime<Local>) -> String {
    format!(
        "The current time is {} on {}.",
        now.format("%H:%M:%S"),
        now.format("%A, %B %d, %Y")
    )
}

pub fn compose_weather(location: &str, result: &Result<WeatherReport, WeatherError>) -> String {
    match result {
        Ok(report) => format!(
            "In {}, it's currently {}°C with {}. The humidity is {}%.",
            report.location, report.temperature_c, report.description, report.humidity_pct
        ),
        Err(e) => format!(
            "I couldn't get the weather information for {}. {}",
            location, e
        ),
    }
}

/// Numbered listing of the first [`MAX_LISTED_RESULTS`] hits, or a
/// not-found message when there are none.
pub fn compose_search(query: &str, hits: Option<&[SearchHit]>) -> String {
    let hits = match hits {
        Some(h) if !h.is_empty() => h,
        _ => return format!("I couldn't find any results for '{}'.", query),
    };

    let mut out = format!("Here's what I found about '{}':\n\n", query);
    for (idx, hit) in hits.iter().take(MAX_LISTED_RESULTS).enumerate() {
        out.push_str(&format!(
            "{}. {}\n{}\n{}\n\n",
            idx + 1,
            hit.title,
            hit.snippet,
            hit.link
        ));
    }
    out
}

/// Greeting appended when a persona is first configured.
pub fn setup_greeting(persona: &Persona) -> String {
    format!(
        "Hello! I'm {}. My job: {} \n How can I help you today?",
        persona.name, persona.description
    )
}

/// Greeting appended when an active persona has an empty transcript.
pub fn welcome_greeting(persona: &Persona) -> String {
    format!(
        "Hello! I'm {}. {} How can I help you today?",
        persona.name, persona.description
    )
}
