//! One submit, end to end: collect settings, adapt the provider, generate,
//! render.

use uuid::Uuid;

use crate::config::Config;
use crate::engine::EngineFactory;
use crate::provider::ProviderConfig;
use crate::render::{render_page, render_questions, Banner, FormView, QuestionBlock};
use crate::settings::{Settings, SettingsForm};

pub const EMPTY_RESULT_MESSAGE: &str =
    "Failed to generate visual questions. Please check settings and try again.";

/// Everything needed to draw the page after a submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOutcome {
    pub form: FormView,
    pub banner: Option<Banner>,
    pub blocks: Vec<QuestionBlock>,
}

impl PageOutcome {
    /// The initial page, before any submit.
    pub fn initial(config: &Config) -> Self {
        Self {
            form: FormView::from_defaults(&config.defaults),
            banner: None,
            blocks: Vec::new(),
        }
    }

    pub fn to_html(&self) -> String {
        render_page(&self.form, self.banner.as_ref(), &self.blocks)
    }
}

/// Process one form submit.
///
/// Stages run in order and any failure ends the submit with a banner. The
/// engine factory is never called when the credential is missing.
pub async fn run_submit(
    form: &SettingsForm,
    config: &Config,
    factory: &dyn EngineFactory,
) -> PageOutcome {
    let request_id = Uuid::new_v4();
    let settings = Settings::collect(form, &config.defaults);
    let view = FormView::from(&settings);

    let outcome = |banner: Banner, blocks: Vec<QuestionBlock>| PageOutcome {
        form: view.clone(),
        banner: Some(banner),
        blocks,
    };

    let provider_config = match ProviderConfig::from_settings(&settings, config) {
        Ok(provider_config) => provider_config,
        Err(e) => {
            tracing::warn!(%request_id, provider = %settings.provider, error = %e, "Submit rejected");
            return outcome(Banner::Error(e.to_string()), Vec::new());
        }
    };

    let num = settings.question_count.get();
    tracing::info!(
        %request_id,
        model = provider_config.model(),
        "Generating {} visual questions on '{}' using {}...",
        num,
        settings.topic,
        settings.provider
    );

    let engine = factory.build(provider_config);
    let generated = match engine.generate_visual_questions(&settings.topic, num).await {
        Ok(generated) => generated,
        Err(e) => {
            tracing::error!(%request_id, error = %e, "Question generation failed");
            return outcome(
                Banner::Error(format!("An error occurred during question generation: {}", e)),
                Vec::new(),
            );
        }
    };

    if generated.is_empty() {
        tracing::warn!(%request_id, requested = num, "Generation returned no questions");
        return outcome(Banner::Error(EMPTY_RESULT_MESSAGE.to_string()), Vec::new());
    }

    let blocks = render_questions(engine.as_ref(), &generated.questions).await;
    tracing::info!(%request_id, questions = blocks.len(), "Submit complete");

    outcome(
        Banner::Success(format!(
            "Successfully generated {} visual questions!",
            generated.len()
        )),
        blocks,
    )
}
