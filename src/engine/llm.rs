//! Question engine backed by a chat completion provider.

use std::time::Instant;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::chart::{render_png_base64, ChartError, ChartInstruction, ChartSpec};
use crate::provider::{ChatClient, ProviderConfig};

use super::{
    parse_questions, visual_user_prompt, EngineError, EngineFactory, QuestionEngine,
    VisualQuestionList, VISUAL_SYSTEM_PROMPT,
};

pub struct LlmQuestionEngine {
    client: Box<dyn ChatClient>,
}

impl LlmQuestionEngine {
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            client: config.into_client(),
        }
    }
}

#[async_trait]
impl QuestionEngine for LlmQuestionEngine {
    async fn generate_visual_questions(
        &self,
        topic: &str,
        num: u32,
    ) -> Result<VisualQuestionList, EngineError> {
        let start = Instant::now();
        let user_prompt = visual_user_prompt(topic, num);

        let reply = self
            .client
            .complete(VISUAL_SYSTEM_PROMPT, &user_prompt)
            .await?;

        let questions = parse_questions(&reply, num as usize).inspect_err(|e| {
            tracing::warn!(
                provider = %self.client.provider(),
                reply_len = reply.len(),
                error = %e,
                "Model reply rejected"
            );
        })?;

        tracing::info!(
            provider = %self.client.provider(),
            model = self.client.model(),
            requested = num,
            generated = questions.len(),
            latency_ms = start.elapsed().as_millis() as u64,
            "Visual questions generated"
        );

        Ok(VisualQuestionList { questions })
    }

    async fn render_visual(
        &self,
        instruction: &Map<String, Value>,
        question_text: &str,
        options: &[String],
        correct_answer: &str,
    ) -> Result<Option<String>, EngineError> {
        let instruction = ChartInstruction::from_mapping(instruction).map_err(ChartError::from)?;

        let Some(spec) = ChartSpec::from_instruction(&instruction, options)? else {
            tracing::debug!(question = question_text, "Instruction requests no chart");
            return Ok(None);
        };

        let encoded = render_png_base64(&spec, question_text)?;
        tracing::debug!(
            chart_type = %instruction.chart_type,
            answer = correct_answer,
            bytes = encoded.len(),
            "Chart rendered"
        );
        Ok(Some(encoded))
    }
}

/// Default factory: wraps the adapter's client in an [`LlmQuestionEngine`].
#[derive(Debug, Default, Clone, Copy)]
pub struct LlmEngineFactory;

impl EngineFactory for LlmEngineFactory {
    fn build(&self, config: ProviderConfig) -> Box<dyn QuestionEngine> {
        Box::new(LlmQuestionEngine::new(config))
    }
}
