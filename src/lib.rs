//! vizquiz: a small web app that generates chart-based multiple-choice
//! questions with an LLM provider and renders them with their charts.

pub mod chart;
pub mod config;
pub mod engine;
pub mod provider;
pub mod render;
pub mod server;
pub mod settings;
pub mod workflow;
