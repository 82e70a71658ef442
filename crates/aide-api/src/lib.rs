//! HTTP surface of Aide: the chat page plus JSON endpoints for sessions,
//! personas, credentials, messages and transcripts.

pub mod assets;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::{create_router, start_server};
pub use state::AppState;
