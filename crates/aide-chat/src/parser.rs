//! Parameter extraction from free text.
//!
//! All functions expect text that was already lowercased by the router.
//! Phrase lists are scanned in declared order and the first phrase found
//! decides the result, even when what follows it is empty.

/// Phrases that introduce a location in a weather question.
pub const WEATHER_PHRASES: &[&str] = &[
    "weather in ",
    "weather for ",
    "temperature in ",
    "temperature at ",
    "weather at ",
    "how's the weather in ",
    "what's the weather in ",
    "what is the weather in ",
];

/// Phrases that introduce the query of a search request.
pub const SEARCH_INDICATORS: &[&str] = &[
    "search for ",
    "search about ",
    "find information on ",
    "look up ",
    "find out about ",
    "search ",
    "find ",
];

/// Extract the location of a weather question.
///
/// Tries [`WEATHER_PHRASES`] first, then falls back to the token following
/// the first standalone `in`.
pub fn extract_location(text: &str) -> Option<String> {
    if let Some(phrase) = first_phrase(text, WEATHER_PHRASES) {
        return text_after(text, phrase);
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    let idx = words.iter().position(|w| *w == "in")?;
    words.get(idx + 1).and_then(|w| clean(w))
}

/// Extract the query of a search request using [`SEARCH_INDICATORS`].
pub fn extract_search_query(text: &str) -> Option<String> {
    let indicator = first_phrase(text, SEARCH_INDICATORS)?;
    text_after(text, indicator)
}

fn first_phrase(text: &str, phrases: &[&'static str]) -> Option<&'static str> {
    phrases.iter().copied().find(|p| text.contains(p))
}

/// Text between the first occurrence of `phrase` and its next occurrence
/// (or the end), cleaned.
fn text_after(text: &str, phrase: &str) -> Option<String> {
    let start = text.find(phrase)? + phrase.len();
    let rest = &text[start..];
    let segment = rest.find(phrase).map_or(rest, |end| &rest[..end]);
    clean(segment)
}

/// Trim, drop every `?` and `.`, trim again. Empty results are `None`.
fn clean(raw: &str) -> Option<String> {
    let stripped = raw.trim().replace(['?', '.'], "");
    let stripped = stripped.trim();
    (!stripped.is_empty()).then(|| stripped.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- Location ----

    #[test]
    fn test_location_from_trigger_phrase() {
        assert_eq!(
            extract_location("what's the weather in paris?"),
            Some("paris".to_string())
        );
        assert_eq!(
            extract_location("what is the temperature in new york city."),
            Some("new york city".to_string())
        );
        assert_eq!(
            extract_location("how is the weather for   london  "),
            Some("london".to_string())
        );
    }

    #[test]
    fn test_location_phrase_order_is_declared_order() {
        // "weather in " is listed before "temperature at ", so it wins even
        // though the temperature phrase appears first in the text.
        assert_eq!(
            extract_location("temperature at home or weather in oslo"),
            Some("oslo".to_string())
        );
    }

    #[test]
    fn test_location_stops_at_repeated_phrase() {
        assert_eq!(
            extract_location("weather in rome or weather in milan"),
            Some("rome or".to_string())
        );
    }

    #[test]
    fn test_location_removes_inner_punctuation() {
        assert_eq!(
            extract_location("what's the weather in st. louis?"),
            Some("st louis".to_string())
        );
    }

    #[test]
    fn test_location_word_fallback() {
        assert_eq!(
            extract_location("how hot is it in tokyo today?"),
            Some("tokyo".to_string())
        );
        assert_eq!(
            extract_location("what weather do they have in berlin?"),
            Some("berlin".to_string())
        );
    }

    #[test]
    fn test_location_empty_after_phrase_does_not_fall_back() {
        // The phrase matched, so the word fallback is not consulted.
        assert_eq!(extract_location("weather in ?"), None);
        assert_eq!(extract_location("what's the weather in   "), None);
    }

    #[test]
    fn test_location_missing() {
        assert_eq!(extract_location("what's the weather like"), None);
        assert_eq!(extract_location("how is the weather in"), None);
        assert_eq!(extract_location("how is it in ?"), None);
    }

    #[test]
    fn test_location_in_must_be_standalone_token() {
        assert_eq!(extract_location("what weather inside"), None);
    }

    // ---- Search query ----

    #[test]
    fn test_query_from_indicators() {
        assert_eq!(
            extract_search_query("search for rust programming"),
            Some("rust programming".to_string())
        );
        assert_eq!(
            extract_search_query("can you look up the eiffel tower?"),
            Some("the eiffel tower".to_string())
        );
        assert_eq!(
            extract_search_query("find information on black holes."),
            Some("black holes".to_string())
        );
        assert_eq!(
            extract_search_query("please find cheap flights"),
            Some("cheap flights".to_string())
        );
    }

    #[test]
    fn test_query_indicator_precedence() {
        // "search for " precedes "search " in the list.
        assert_eq!(
            extract_search_query("search for cats"),
            Some("cats".to_string())
        );
        // "find out about " precedes "find ".
        assert_eq!(
            extract_search_query("find out about mars"),
            Some("mars".to_string())
        );
    }

    #[test]
    fn test_query_missing() {
        assert_eq!(extract_search_query("search"), None);
        assert_eq!(extract_search_query("find?"), None);
        assert_eq!(extract_search_query("search for ?"), None);
    }

    #[test]
    fn test_query_matches_anywhere_in_text() {
        assert_eq!(
            extract_search_query("i can't find my keys"),
            Some("my keys".to_string())
        );
    }
}
