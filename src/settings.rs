//! Settings collection from the submitted form.
//!
//! The collector only performs widget-level coercion: numeric bounds are
//! clamped and the API key is read from the field that belongs to the
//! selected provider. Credential checks happen later in the adapter.

use serde::Deserialize;

use crate::config::{Defaults, SecureString};
use crate::provider::ProviderKind;

/// Raw form fields as posted by the page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsForm {
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
    /// Kept as text so a malformed value degrades to the default instead of
    /// rejecting the whole submit.
    #[serde(default)]
    pub num_questions: Option<String>,
    #[serde(default)]
    pub gemini_api_key: Option<String>,
    #[serde(default)]
    pub openrouter_api_key: Option<String>,
}

/// Number of questions requested, always within `MIN..=MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionCount(u32);

impl QuestionCount {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 1000;

    /// Clamp any integer into the stepper bounds.
    pub fn clamped(value: i64) -> Self {
        let bounded = value.clamp(i64::from(Self::MIN), i64::from(Self::MAX));
        Self(bounded as u32)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for QuestionCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One immutable snapshot of the user's choices for a single submit.
#[derive(Debug, Clone)]
pub struct Settings {
    pub provider: ProviderKind,
    pub topic: String,
    pub question_count: QuestionCount,
    pub api_key: SecureString,
}

impl Settings {
    /// Build settings from the posted form, filling gaps from `defaults`.
    pub fn collect(form: &SettingsForm, defaults: &Defaults) -> Self {
        let provider = form
            .provider
            .as_deref()
            .and_then(ProviderKind::parse)
            .unwrap_or_default();

        let topic = form
            .topic
            .clone()
            .unwrap_or_else(|| defaults.topic.clone());

        let question_count = form
            .num_questions
            .as_deref()
            .map(str::trim)
            .and_then(|raw| raw.parse::<i64>().ok())
            .map(QuestionCount::clamped)
            .unwrap_or_else(|| QuestionCount::clamped(i64::from(defaults.num_questions)));

        let raw_key = match provider {
            ProviderKind::Gemini => form.gemini_api_key.as_deref(),
            ProviderKind::OpenRouter => form.openrouter_api_key.as_deref(),
        };
        let api_key = SecureString::from(raw_key.unwrap_or_default().trim());

        Self {
            provider,
            topic,
            question_count,
            api_key,
        }
    }
}
