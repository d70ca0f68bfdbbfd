//! Maps the selected provider and key onto one normalized chat client.

use thiserror::Error;

use crate::config::{Config, ProvidersConfig, SecureString};
use crate::settings::Settings;

use super::{ChatClient, ClientOptions, GeminiClient, LlmError, OpenAiCompatClient, ProviderKind};

/// Reasons the adapter refuses to produce a [`ProviderConfig`].
#[derive(Debug, Error)]
pub enum AdapterError {
    /// The key field for the selected provider was left empty.
    #[error("Please enter your {}.", .provider.key_label())]
    MissingCredential { provider: ProviderKind },

    /// The HTTP client for the provider could not be built.
    #[error("Failed to set up {provider} client: {source}")]
    Client {
        provider: ProviderKind,
        #[source]
        source: LlmError,
    },
}

/// Provider choice with its credential attached.
#[derive(Debug, Clone)]
pub enum ProviderSelection {
    Gemini(SecureString),
    OpenRouter(SecureString),
}

impl ProviderSelection {
    pub fn from_settings(settings: &Settings) -> Self {
        let key = settings.api_key.clone();
        match settings.provider {
            ProviderKind::Gemini => ProviderSelection::Gemini(key),
            ProviderKind::OpenRouter => ProviderSelection::OpenRouter(key),
        }
    }

    pub fn kind(&self) -> ProviderKind {
        match self {
            ProviderSelection::Gemini(_) => ProviderKind::Gemini,
            ProviderSelection::OpenRouter(_) => ProviderKind::OpenRouter,
        }
    }

    /// Build the client for this selection.
    ///
    /// An empty key returns early with `MissingCredential`; nothing is
    /// constructed in that case.
    pub fn into_config(
        self,
        providers: &ProvidersConfig,
        options: ClientOptions,
    ) -> Result<ProviderConfig, AdapterError> {
        let kind = self.kind();
        let endpoint = providers.endpoint(kind).clone();

        let client: Box<dyn ChatClient> = match self {
            ProviderSelection::Gemini(key) => {
                if key.is_empty() {
                    return Err(AdapterError::MissingCredential { provider: kind });
                }
                Box::new(
                    GeminiClient::new(endpoint, key, options)
                        .map_err(|source| AdapterError::Client { provider: kind, source })?,
                )
            }
            ProviderSelection::OpenRouter(key) => {
                if key.is_empty() {
                    return Err(AdapterError::MissingCredential { provider: kind });
                }
                Box::new(
                    OpenAiCompatClient::new(endpoint, key, options)
                        .map_err(|source| AdapterError::Client { provider: kind, source })?,
                )
            }
        };

        tracing::debug!(provider = %kind, model = client.model(), "Provider client constructed");
        Ok(ProviderConfig::new(client))
    }
}

/// Configuration handed to the question engine: one chat client, owned.
pub struct ProviderConfig {
    client: Box<dyn ChatClient>,
}

impl ProviderConfig {
    pub fn new(client: Box<dyn ChatClient>) -> Self {
        Self { client }
    }

    /// Run the adapter for one submit.
    pub fn from_settings(settings: &Settings, config: &Config) -> Result<Self, AdapterError> {
        ProviderSelection::from_settings(settings)
            .into_config(&config.providers, ClientOptions::from(&config.defaults))
    }

    pub fn kind(&self) -> ProviderKind {
        self.client.provider()
    }

    pub fn model(&self) -> &str {
        self.client.model()
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    pub fn into_client(self) -> Box<dyn ChatClient> {
        self.client
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("provider", &self.kind())
            .field("model", &self.model())
            .field("base_url", &self.base_url())
            .finish()
    }
}
