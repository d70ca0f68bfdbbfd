//! Client for the Google Gemini `generateContent` API.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::{ProviderEndpoint, SecureString};

use super::error::extract_error_message;
use super::{ChatClient, ClientOptions, LlmError, ProviderKind};

pub struct GeminiClient {
    client: Client,
    endpoint: ProviderEndpoint,
    api_key: SecureString,
    options: ClientOptions,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

impl GeminiClient {
    pub fn new(
        endpoint: ProviderEndpoint,
        api_key: SecureString,
        options: ClientOptions,
    ) -> Result<Self, LlmError> {
        let client = options.build_http_client()?;
        Ok(Self {
            client,
            endpoint,
            api_key,
            options,
        })
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.base_url.trim_end_matches('/'),
            self.endpoint.model
        )
    }

    fn transport_error(&self, err: reqwest::Error) -> LlmError {
        LlmError::from_reqwest(
            ProviderKind::Gemini,
            self.options.request_timeout.as_secs(),
            err,
        )
    }
}

/// Concatenate the text parts of the first candidate.
fn extract_text(response: GenerateContentResponse) -> Result<String, LlmError> {
    if response.candidates.is_empty() {
        if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(LlmError::Blocked {
                provider: ProviderKind::Gemini,
                reason,
            });
        }
    }

    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(LlmError::EmptyResponse {
            provider: ProviderKind::Gemini,
        });
    }
    Ok(text)
}

#[async_trait]
impl ChatClient for GeminiClient {
    fn provider(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    fn model(&self) -> &str {
        &self.endpoint.model
    }

    fn base_url(&self) -> &str {
        &self.endpoint.base_url
    }

    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String, LlmError> {
        let request = GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: [Part {
                    text: system_prompt,
                }],
            },
            contents: [Content {
                role: Some("user"),
                parts: [Part { text: user_prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.options.temperature,
            },
        };

        let url = self.generate_url();
        tracing::debug!(url = %url, model = %self.endpoint.model, "Sending generateContent request");

        let start = Instant::now();
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", self.api_key.expose())
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        let latency_ms = start.elapsed().as_millis() as u64;

        if !status.is_success() {
            let message = extract_error_message(&body);
            tracing::error!(status = %status, latency_ms, error = %message, "Gemini API error");
            return Err(LlmError::Api {
                provider: ProviderKind::Gemini,
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse =
            serde_json::from_str(&body).map_err(|e| LlmError::Parse {
                provider: ProviderKind::Gemini,
                message: e.to_string(),
            })?;

        let text = extract_text(parsed)?;
        tracing::debug!(latency_ms, reply_len = text.len(), "generateContent succeeded");
        Ok(text)
    }
}
