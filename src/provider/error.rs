//! Error types for provider chat clients.

use thiserror::Error;

use super::ProviderKind;

/// Errors that can occur while talking to an LLM provider.
#[derive(Debug, Error)]
pub enum LlmError {
    /// The underlying HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// Connection or transfer failure
    #[error("Request to {provider} failed: {source}")]
    Transport {
        provider: ProviderKind,
        #[source]
        source: reqwest::Error,
    },

    /// Request exceeded the configured total timeout
    #[error("Request to {provider} timed out after {duration}s")]
    Timeout { provider: ProviderKind, duration: u64 },

    /// Provider answered with a non-success status
    #[error("{provider} API error: {status} - {message}")]
    Api {
        provider: ProviderKind,
        status: u16,
        message: String,
    },

    /// Response body did not match the expected wire format
    #[error("Failed to parse {provider} response: {message}")]
    Parse {
        provider: ProviderKind,
        message: String,
    },

    /// Provider refused to answer the prompt
    #[error("{provider} blocked the prompt: {reason}")]
    Blocked {
        provider: ProviderKind,
        reason: String,
    },

    /// Response was well formed but carried no text
    #[error("{provider} returned no text content")]
    EmptyResponse { provider: ProviderKind },
}

impl LlmError {
    pub(crate) fn from_reqwest(provider: ProviderKind, timeout_secs: u64, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout {
                provider,
                duration: timeout_secs,
            }
        } else {
            LlmError::Transport {
                provider,
                source: err,
            }
        }
    }
}

const MAX_ERROR_BODY_CHARS: usize = 500;

/// Pull a human readable message out of a provider error body.
///
/// Both supported providers use `{"error": {"message": ...}}`; anything else
/// is returned as truncated raw text.
pub(crate) fn extract_error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        let error = value.get("error");
        if let Some(message) = error
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
        {
            return message.to_string();
        }
        if let Some(message) = error.and_then(|e| e.as_str()) {
            return message.to_string();
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty error body".to_string();
    }
    trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect()
}
