//! The browser page, embedded at compile time via `include_str!`.
//!
//! A single self-contained HTML file with inlined CSS and JavaScript. It
//! shows a setup view (persona name, personality, credentials) until the
//! session is configured, then a chat view with the transcript, a message
//! box, a credentials panel and a reset button. It talks to the
//! `/sessions` endpoints of the same origin.

pub const INDEX_HTML: &str = include_str!("../assets/index.html");
