//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::net::{SocketAddr, TcpListener};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tower::ServiceExt;

use vizquiz::engine::{
    EngineError, EngineFactory, Question, QuestionEngine, VisualQuestionList,
};
use vizquiz::provider::{LlmError, ProviderConfig, ProviderKind};

/// Find an available port for testing.
pub fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind to free port");
    listener.local_addr().unwrap().port()
}

/// Write `content` to a temporary config file.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

/// Wait for a server to become available.
pub async fn wait_for_server(addr: SocketAddr, timeout: Duration) -> bool {
    let start = std::time::Instant::now();
    while start.elapsed() < timeout {
        if tokio::net::TcpStream::connect(addr).await.is_ok() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}

/// Send one request through a router and return status plus body text.
pub async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

/// Build a form-encoded POST to `/generate`.
pub fn form_post(fields: &[(&str, &str)]) -> Request<Body> {
    let body = fields
        .iter()
        .map(|(k, v)| format!("{}={}", k, form_encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    Request::builder()
        .method("POST")
        .uri("/generate")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

fn form_encode(value: &str) -> String {
    let mut out = String::new();
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

pub fn question(text: &str, options: &[&str], answer: &str) -> Question {
    Question {
        question: text.to_string(),
        options: options.iter().map(|o| o.to_string()).collect(),
        answer: answer.to_string(),
        explanation: Some(format!("Because {}", answer)),
        ..Question::default()
    }
}

// -- Fake engine --------------------------------------------------------------

/// Scripted result of a generation call.
#[derive(Clone)]
pub enum Generation {
    Questions(Vec<Question>),
    Fails(String),
}

/// Scripted result of one visualization call.
#[derive(Clone)]
pub enum VisualScript {
    Image(String),
    Nothing,
    Fails(String),
}

/// What the fake engine was asked to do.
#[derive(Debug, Default)]
pub struct CallLog {
    pub builds: Vec<(ProviderKind, String, String)>,
    pub generations: Vec<(String, u32)>,
    pub visuals: Vec<String>,
}

/// Factory that records every call and replays scripted results.
#[derive(Clone)]
pub struct FakeFactory {
    pub log: Arc<Mutex<CallLog>>,
    generation: Generation,
    visuals: Vec<VisualScript>,
}

impl FakeFactory {
    pub fn new(generation: Generation, visuals: Vec<VisualScript>) -> Self {
        Self {
            log: Arc::new(Mutex::new(CallLog::default())),
            generation,
            visuals,
        }
    }

    pub fn build_count(&self) -> usize {
        self.log.lock().builds.len()
    }
}

impl EngineFactory for FakeFactory {
    fn build(&self, config: ProviderConfig) -> Box<dyn QuestionEngine> {
        self.log.lock().builds.push((
            config.kind(),
            config.model().to_string(),
            config.base_url().to_string(),
        ));
        Box::new(FakeEngine {
            log: self.log.clone(),
            generation: self.generation.clone(),
            visuals: self.visuals.clone(),
        })
    }
}

struct FakeEngine {
    log: Arc<Mutex<CallLog>>,
    generation: Generation,
    visuals: Vec<VisualScript>,
}

#[async_trait]
impl QuestionEngine for FakeEngine {
    async fn generate_visual_questions(
        &self,
        topic: &str,
        num: u32,
    ) -> Result<VisualQuestionList, EngineError> {
        self.log.lock().generations.push((topic.to_string(), num));
        match &self.generation {
            Generation::Questions(questions) => Ok(VisualQuestionList {
                questions: questions.clone(),
            }),
            Generation::Fails(message) => Err(EngineError::Llm(LlmError::Api {
                provider: ProviderKind::Gemini,
                status: 500,
                message: message.clone(),
            })),
        }
    }

    async fn render_visual(
        &self,
        _instruction: &Map<String, Value>,
        question_text: &str,
        _options: &[String],
        _correct_answer: &str,
    ) -> Result<Option<String>, EngineError> {
        let index = {
            let mut log = self.log.lock();
            log.visuals.push(question_text.to_string());
            log.visuals.len() - 1
        };
        match self.visuals.get(index).cloned().unwrap_or(VisualScript::Nothing) {
            VisualScript::Image(b64) => Ok(Some(b64)),
            VisualScript::Nothing => Ok(None),
            VisualScript::Fails(message) => Err(EngineError::MalformedReply(message)),
        }
    }
}
