//! Conversational engine for Aide.
//!
//! Classifies user messages into time, weather, search or general intents,
//! composes the assistant reply, and manages per-session personas,
//! transcripts and credentials.

pub mod error;
pub mod orchestrator;
pub mod parser;
pub mod response;
pub mod router;
pub mod session;
pub mod types;

#[cfg(test)]
mod testing;

pub use error::ChatError;
pub use orchestrator::ChatOrchestrator;
pub use router::{classify, IntentRouter};
pub use session::ChatSession;
pub use types::{
    CredentialUpdate, Intent, RoutedIntent, RouterReply, SessionContext, SessionSummary,
    TranscriptUpdate,
};
