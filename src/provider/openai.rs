//! Client for OpenAI-compatible chat completion APIs (OpenRouter).

use std::time::Instant;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::{ProviderEndpoint, SecureString};

use super::error::extract_error_message;
use super::{ChatClient, ClientOptions, LlmError, ProviderKind};

const APP_TITLE: &str = "vizquiz";

pub struct OpenAiCompatClient {
    client: Client,
    endpoint: ProviderEndpoint,
    api_key: SecureString,
    options: ClientOptions,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiCompatClient {
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

    fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.endpoint.base_url.trim_end_matches('/')
        )
    }

    fn transport_error(&self, err: reqwest::Error) -> LlmError {
        LlmError::from_reqwest(
            ProviderKind::OpenRouter,
            self.options.request_timeout.as_secs(),
            err,
        )
    }
}

#[async_trait]
impl ChatClient for OpenAiCompatClient {
    fn provider(&self) -> ProviderKind {
        ProviderKind::OpenRouter
    }

    fn model(&self) -> &str {
        &self.endpoint.model
    }

    fn base_url(&self) -> &str {
        &self.endpoint.base_url
    }

    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String, LlmError> {
        let request = ChatCompletionRequest {
            model: &self.endpoint.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            temperature: self.options.temperature,
        };

        let url = self.completions_url();
        tracing::debug!(url = %url, model = %self.endpoint.model, "Sending chat completion request");

        let start = Instant::now();
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key.expose()))
            .header("X-Title", APP_TITLE)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        let latency_ms = start.elapsed().as_millis() as u64;

        if !status.is_success() {
            let message = extract_error_message(&body);
            tracing::error!(status = %status, latency_ms, error = %message, "Chat completion API error");
            return Err(LlmError::Api {
                provider: ProviderKind::OpenRouter,
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatCompletionResponse =
            serde_json::from_str(&body).map_err(|e| LlmError::Parse {
                provider: ProviderKind::OpenRouter,
                message: e.to_string(),
            })?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(LlmError::EmptyResponse {
                provider: ProviderKind::OpenRouter,
            })?;

        tracing::debug!(latency_ms, reply_len = text.len(), "Chat completion succeeded");
        Ok(text)
    }
}
