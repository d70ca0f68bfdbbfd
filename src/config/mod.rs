//! Configuration loading and secret handling.

mod credentials;
mod loader;
mod types;

pub use credentials::SecureString;
pub use loader::ConfigError;
pub use types::{
    Config, Defaults, ProviderEndpoint, ProvidersConfig, ServerConfig, DEFAULT_GEMINI_BASE_URL,
    DEFAULT_GEMINI_MODEL, DEFAULT_OPENROUTER_BASE_URL, DEFAULT_OPENROUTER_MODEL,
};
