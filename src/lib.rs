// Public modules
pub mod chat;
pub mod client;
pub mod error;
pub mod models;
pub mod observability;
pub mod render;
pub mod types;

// Re-exports
pub use client::{API_KEY_ENV, CompletionBackend, OpenRouter, api_key_from_env};
pub use error::{Error, Result};
pub use models::{ModelEntry, ModelRegistry};
pub use observability::register_biometrics;
pub use types::*;
