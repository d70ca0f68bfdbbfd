use std::sync::Arc;

use axum::extract::{Form, State};
use axum::response::Html;
use axum::routing::{get, post};
use axum::Router;

use crate::config::Config;
use crate::engine::EngineFactory;
use crate::settings::SettingsForm;
use crate::workflow::{run_submit, PageOutcome};

use super::health::health;

/// Immutable state shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub factory: Arc<dyn EngineFactory>,
}

impl AppState {
    pub fn new(config: Config, factory: Arc<dyn EngineFactory>) -> Self {
        Self {
            config: Arc::new(config),
            factory,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/generate", post(generate))
        .route("/health", get(health))
        .with_state(state)
}

async fn index(State(state): State<AppState>) -> Html<String> {
    Html(PageOutcome::initial(&state.config).to_html())
}

async fn generate(
    State(state): State<AppState>,
    Form(form): Form<SettingsForm>,
) -> Html<String> {
    let outcome = run_submit(&form, &state.config, state.factory.as_ref()).await;
    Html(outcome.to_html())
}
