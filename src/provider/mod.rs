//! LLM provider selection and chat clients.
//!
//! Two providers are supported. Each is reached through its own wire format
//! but both are exposed downstream as one normalized [`ChatClient`] handle.

mod adapter;
mod error;
mod gemini;
mod openai;

use std::time::Duration;

use async_trait::async_trait;

use crate::config::Defaults;

pub use adapter::{AdapterError, ProviderConfig, ProviderSelection};
pub use error::LlmError;
pub use gemini::GeminiClient;
pub use openai::OpenAiCompatClient;

/// The LLM backend picked in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProviderKind {
    #[default]
    Gemini,
    OpenRouter,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 2] = [ProviderKind::Gemini, ProviderKind::OpenRouter];

    /// Parse the select value. Case-insensitive; unknown values yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "gemini" => Some(ProviderKind::Gemini),
            "openrouter" => Some(ProviderKind::OpenRouter),
            _ => None,
        }
    }

    /// Name shown in the provider selector.
    pub fn label(self) -> &'static str {
        match self {
            ProviderKind::Gemini => "Gemini",
            ProviderKind::OpenRouter => "OpenRouter",
        }
    }

    /// Form field carrying this provider's API key.
    pub fn key_field(self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini_api_key",
            ProviderKind::OpenRouter => "openrouter_api_key",
        }
    }

    /// Human name of the credential, used in labels and error messages.
    pub fn key_label(self) -> &'static str {
        match self {
            ProviderKind::Gemini => "Google API Key",
            ProviderKind::OpenRouter => "OpenRouter API Key",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// HTTP and sampling options shared by both clients.
#[derive(Debug, Clone, Copy)]
pub struct ClientOptions {
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    pub temperature: f32,
}

impl From<&Defaults> for ClientOptions {
    fn from(defaults: &Defaults) -> Self {
        Self {
            request_timeout: Duration::from_secs(u64::from(defaults.timeout_seconds)),
            connect_timeout: Duration::from_secs(u64::from(defaults.connect_timeout_seconds)),
            temperature: defaults.temperature,
        }
    }
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self::from(&Defaults::default())
    }
}

impl ClientOptions {
    pub(crate) fn build_http_client(&self) -> Result<reqwest::Client, LlmError> {
        reqwest::Client::builder()
            .timeout(self.request_timeout)
            .connect_timeout(self.connect_timeout)
            .build()
            .map_err(LlmError::ClientBuild)
    }
}

/// Normalized chat-completion handle.
///
/// One system prompt and one user prompt in, the model's text reply out.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Which provider this client talks to.
    fn provider(&self) -> ProviderKind;

    /// Model identifier the client is bound to.
    fn model(&self) -> &str;

    /// Base URL the client sends requests to.
    fn base_url(&self) -> &str;

    /// Send one completion request and return the reply text.
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String, LlmError>;
}
