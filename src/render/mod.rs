//! Turns generated questions into displayable blocks and HTML pages.

mod page;

use crate::engine::{Question, QuestionEngine};

pub use page::{escape_html, render_page, Banner, FormView};

pub const VISUAL_UNAVAILABLE: &str = "Visualization could not be generated.";

/// Outcome of the per-question visualization call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visual {
    /// Base64 PNG
    Image(String),
    /// The engine returned no image
    Unavailable,
    /// The call failed; holds the error text
    Failed(String),
}

impl Visual {
    pub fn message(&self) -> Option<String> {
        match self {
            Visual::Image(_) => None,
            Visual::Unavailable => Some(VISUAL_UNAVAILABLE.to_string()),
            Visual::Failed(error) => Some(format!("Error displaying visualization: {}", error)),
        }
    }
}

/// One rendered question, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBlock {
    pub question: String,
    pub visual: Visual,
    /// `(letter, text)` pairs in original order
    pub options: Vec<(String, String)>,
    pub answer: String,
    pub explanation: Option<String>,
}

/// Spreadsheet-style option letter: 0 -> A, 25 -> Z, 26 -> AA.
pub fn option_letter(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8_lossy(&letters).into_owned()
}

/// Render every question in order.
///
/// Each visualization call runs on its own; a failure is recorded in that
/// question's block and the loop moves on.
pub async fn render_questions(
    engine: &dyn QuestionEngine,
    questions: &[Question],
) -> Vec<QuestionBlock> {
    let mut blocks = Vec::with_capacity(questions.len());

    for (index, question) in questions.iter().enumerate() {
        let mapping = question.graph_instruction.to_mapping();
        let visual = match engine
            .render_visual(&mapping, &question.question, &question.options, &question.answer)
            .await
        {
            Ok(Some(image)) => Visual::Image(image),
            Ok(None) => {
                tracing::warn!(index, "No visualization returned");
                Visual::Unavailable
            }
            Err(e) => {
                tracing::warn!(index, error = %e, "Visualization failed");
                Visual::Failed(e.to_string())
            }
        };

        blocks.push(QuestionBlock {
            question: question.question.clone(),
            visual,
            options: question
                .options
                .iter()
                .enumerate()
                .map(|(i, text)| (option_letter(i), text.clone()))
                .collect(),
            answer: question.answer.clone(),
            explanation: question.explanation_text().map(str::to_string),
        });
    }

    blocks
}
