pub mod config;
pub mod error;
pub mod types;

pub use config::AideConfig;
pub use error::{AideError, Result};
pub use types::*;
