use serde::{Deserialize, Serialize};

use crate::provider::ProviderKind;

/// Root configuration container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(default)]
    pub providers: ProvidersConfig,
}

/// Local HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address for the page server (host:port).
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

/// Form defaults and provider client timeouts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Defaults {
    /// Topic pre-filled in the form.
    #[serde(default = "default_topic")]
    pub topic: String,
    /// Question count pre-filled in the form.
    #[serde(default = "default_num_questions")]
    pub num_questions: u32,
    /// Total request timeout for a provider call in seconds (default: 120).
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Connection timeout in seconds (default: 10).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
    /// Sampling temperature sent with every completion request.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

/// Fixed endpoint for one provider. Not user-selectable from the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEndpoint {
    /// Model identifier sent to the provider.
    pub model: String,
    /// Base URL of the provider API, without trailing path segments.
    pub base_url: String,
}

/// Endpoints for the two supported providers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvidersConfig {
    #[serde(default = "default_gemini")]
    pub gemini: ProviderEndpoint,
    #[serde(default = "default_openrouter")]
    pub openrouter: ProviderEndpoint,
}

impl ProvidersConfig {
    /// Endpoint configured for `kind`.
    pub fn endpoint(&self, kind: ProviderKind) -> &ProviderEndpoint {
        match kind {
            ProviderKind::Gemini => &self.gemini,
            ProviderKind::OpenRouter => &self.openrouter,
        }
    }
}

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash-exp-0827";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_OPENROUTER_MODEL: &str = "deepseek/deepseek-r1-distill-llama-70b";
pub const DEFAULT_OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";

fn default_bind_addr() -> String {
    "127.0.0.1:8501".to_string()
}

fn default_topic() -> String {
    "GMAT Statistics".to_string()
}

fn default_num_questions() -> u32 {
    2
}

fn default_timeout() -> u32 {
    120
}

fn default_connect_timeout() -> u32 {
    10
}

fn default_temperature() -> f32 {
    0.7
}

fn default_gemini() -> ProviderEndpoint {
    ProviderEndpoint {
        model: DEFAULT_GEMINI_MODEL.to_string(),
        base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
    }
}

fn default_openrouter() -> ProviderEndpoint {
    ProviderEndpoint {
        model: DEFAULT_OPENROUTER_MODEL.to_string(),
        base_url: DEFAULT_OPENROUTER_BASE_URL.to_string(),
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            topic: default_topic(),
            num_questions: default_num_questions(),
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
            temperature: default_temperature(),
        }
    }
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            gemini: default_gemini(),
            openrouter: default_openrouter(),
        }
    }
}
