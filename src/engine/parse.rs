//! Extract questions from a model reply.
//!
//! Replies often arrive wrapped in Markdown fences, preceded by prose, or
//! with a `<think>` block in front (reasoning models). Everything outside
//! the outermost JSON value is ignored.

use serde_json::Value;

use super::{EngineError, Question};

const THINK_OPEN: &str = "<think>";
const THINK_CLOSE: &str = "</think>";

/// Parse up to `limit` questions out of `reply`.
///
/// Items that do not deserialize, or have no question text, are skipped
/// with a warning. A reply with no JSON at all is an error.
pub fn parse_questions(reply: &str, limit: usize) -> Result<Vec<Question>, EngineError> {
    let cleaned = strip_reasoning(reply);
    let json = json_slice(&cleaned)
        .ok_or_else(|| EngineError::MalformedReply("no JSON found in reply".to_string()))?;

    let value: Value = serde_json::from_str(json)
        .map_err(|e| EngineError::MalformedReply(format!("invalid JSON: {}", e)))?;

    let items = question_items(value)?;
    let total = items.len();

    let mut questions = Vec::with_capacity(total.min(limit));
    for (index, item) in items.into_iter().enumerate() {
        if questions.len() >= limit {
            break;
        }
        match serde_json::from_value::<Question>(item) {
            Ok(question) if !question.question.is_empty() => questions.push(question),
            Ok(_) => tracing::warn!(index, "Skipping question with empty text"),
            Err(e) => tracing::warn!(index, error = %e, "Skipping malformed question"),
        }
    }

    tracing::debug!(total, kept = questions.len(), limit, "Parsed model reply");
    Ok(questions)
}

fn strip_reasoning(reply: &str) -> String {
    let mut text = reply.to_string();

    while let Some(start) = text.find(THINK_OPEN) {
        match text[start..].find(THINK_CLOSE) {
            Some(offset) => {
                text.replace_range(start..start + offset + THINK_CLOSE.len(), "");
            }
            None => {
                text.truncate(start);
                break;
            }
        }
    }

    // Some providers drop the opening tag and only send the closing one.
    if let Some(end) = text.rfind(THINK_CLOSE) {
        text.drain(..end + THINK_CLOSE.len());
    }

    text
}

/// Slice from the first `{`/`[` to the last `}`/`]`.
fn json_slice(text: &str) -> Option<&str> {
    let start = text.find(['{', '['])?;
    let end = text.rfind(['}', ']'])?;
    (end > start).then(|| &text[start..=end])
}

fn question_items(value: Value) -> Result<Vec<Value>, EngineError> {
    match value {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => match map.remove("questions") {
            Some(Value::Array(items)) => Ok(items),
            Some(other) => Err(EngineError::MalformedReply(format!(
                "\"questions\" should be a list, got {}",
                json_kind(&other)
            ))),
            None if map.contains_key("question") => Ok(vec![Value::Object(map)]),
            None => Err(EngineError::MalformedReply(
                "reply has no \"questions\" list".to_string(),
            )),
        },
        other => Err(EngineError::MalformedReply(format!(
            "expected an object or list, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_QUESTIONS: &str = r#"{"questions": [
        {"question": "First?", "options": ["a", "b"], "answer": "a",
         "graph_instruction": {"type": "bar", "y_values": [1, 2]}},
        {"question": "Second?", "options": ["c", "d"], "answer": "d"}
    ]}"#;

    #[test]
    fn test_plain_object() {
        let questions = parse_questions(TWO_QUESTIONS, 10).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].question, "First?");
        assert_eq!(questions[1].answer, "d");
    }

    #[test]
    fn test_fenced_with_prose() {
        let reply = format!(
            "Here are your questions:\n```json\n{}\n```\nGood luck!",
            TWO_QUESTIONS
        );
        let questions = parse_questions(&reply, 10).unwrap();
        assert_eq!(questions.len(), 2);
    }

    #[test]
    fn test_think_block_is_removed() {
        let reply = format!(
            "<think>Maybe use {{\"questions\": []}} here...</think>\n{}",
            TWO_QUESTIONS
        );
        let questions = parse_questions(&reply, 10).unwrap();
        assert_eq!(questions.len(), 2);
    }

    #[test]
    fn test_dangling_close_tag() {
        let reply = format!("reasoning with [brackets]\n</think>\n{}", TWO_QUESTIONS);
        let questions = parse_questions(&reply, 10).unwrap();
        assert_eq!(questions.len(), 2);
    }

    #[test]
    fn test_top_level_array_and_limit() {
        let reply = r#"[{"question": "A"}, {"question": "B"}, {"question": "C"}]"#;
        let questions = parse_questions(reply, 2).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[1].question, "B");
    }

    #[test]
    fn test_single_question_object() {
        let questions = parse_questions(r#"{"question": "Only?"}"#, 5).unwrap();
        assert_eq!(questions.len(), 1);
    }

    #[test]
    fn test_invalid_items_are_skipped() {
        let reply = r#"{"questions": [{"options": []}, {"question": "  "}, {"question": "Kept"}]}"#;
        let questions = parse_questions(reply, 5).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].question, "Kept");
    }

    #[test]
    fn test_empty_list_is_ok() {
        let questions = parse_questions(r#"{"questions": []}"#, 5).unwrap();
        assert!(questions.is_empty());
    }

    #[test]
    fn test_no_json_is_error() {
        let err = parse_questions("I cannot help with that.", 5).unwrap_err();
        assert!(matches!(err, EngineError::MalformedReply(_)));
    }

    #[test]
    fn test_questions_not_a_list() {
        let err = parse_questions(r#"{"questions": "none"}"#, 5).unwrap_err();
        assert!(err.to_string().contains("a string"));
    }
}
