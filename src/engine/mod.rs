//! Question engine: generates visual questions and draws their charts.

mod error;
mod llm;
mod parse;
mod prompt;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::chart::{string_list, value_to_text, ChartInstruction};
use crate::provider::ProviderConfig;

pub use error::EngineError;
pub use llm::{LlmEngineFactory, LlmQuestionEngine};
pub use parse::parse_questions;
pub use prompt::{visual_user_prompt, VISUAL_SYSTEM_PROMPT};

/// One multiple-choice question answered by reading a chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Question {
    #[serde(alias = "question_text", deserialize_with = "scalar_text")]
    pub question: String,
    #[serde(default, deserialize_with = "string_list")]
    pub options: Vec<String>,
    #[serde(default, alias = "correct_answer", deserialize_with = "scalar_text")]
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(
        default,
        alias = "chart_instruction",
        deserialize_with = "instruction_or_default"
    )]
    pub graph_instruction: ChartInstruction,
}

impl Question {
    /// Explanation text, if present and not blank.
    pub fn explanation_text(&self) -> Option<&str> {
        self.explanation
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}

/// Result of one generation call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisualQuestionList {
    pub questions: Vec<Question>,
}

impl VisualQuestionList {
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// The generation and visualization entry points used per submit.
#[async_trait]
pub trait QuestionEngine: Send + Sync {
    /// Generate up to `num` visual questions on `topic`.
    async fn generate_visual_questions(
        &self,
        topic: &str,
        num: u32,
    ) -> Result<VisualQuestionList, EngineError>;

    /// Draw the chart for one question.
    ///
    /// `Ok(None)` means the instruction asked for no chart.
    async fn render_visual(
        &self,
        instruction: &Map<String, Value>,
        question_text: &str,
        options: &[String],
        correct_answer: &str,
    ) -> Result<Option<String>, EngineError>;
}

/// Builds an engine around a provider configuration for one request.
pub trait EngineFactory: Send + Sync {
    fn build(&self, config: ProviderConfig) -> Box<dyn QuestionEngine>;
}

fn scalar_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(value_to_text(&raw).trim().to_string())
}

fn instruction_or_default<'de, D>(deserializer: D) -> Result<ChartInstruction, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<ChartInstruction>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_question_aliases() {
        let question: Question = serde_json::from_value(json!({
            "question": "Which month had the highest sales?",
            "options": ["Jan", "Feb", 3],
            "correct_answer": "Feb",
            "chart_instruction": {"type": "bar", "y_values": [1, 2, 0]}
        }))
        .unwrap();

        assert_eq!(question.answer, "Feb");
        assert_eq!(question.options, vec!["Jan", "Feb", "3"]);
        assert_eq!(question.graph_instruction.chart_type, "bar");
        assert!(question.explanation_text().is_none());
    }

    #[test]
    fn test_null_instruction_defaults() {
        let question: Question = serde_json::from_value(json!({
            "question": "Q",
            "answer": 42,
            "graph_instruction": null,
            "explanation": "   "
        }))
        .unwrap();

        assert_eq!(question.answer, "42");
        assert_eq!(question.graph_instruction, ChartInstruction::default());
        assert!(question.explanation_text().is_none());
    }

    #[test]
    fn test_missing_question_text_is_error() {
        let result = serde_json::from_value::<Question>(json!({"options": ["a"]}));
        assert!(result.is_err());
    }
}
