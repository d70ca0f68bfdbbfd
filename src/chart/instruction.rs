//! Serializable chart instruction as produced by the question generator.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Loosely typed chart description attached to each visual question.
///
/// Numeric series are kept as raw JSON values here; coercion and
/// validation happen when the instruction is turned into a
/// [`ChartSpec`](super::ChartSpec).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartInstruction {
    #[serde(rename = "type", alias = "chart_type", default)]
    pub chart_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_label: Option<String>,
    #[serde(
        default,
        deserialize_with = "string_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub x_labels: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub x_values: Vec<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub y_values: Vec<Value>,
    #[serde(
        default,
        deserialize_with = "string_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub labels: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sizes: Vec<Value>,
    #[serde(
        default,
        alias = "headers",
        deserialize_with = "string_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub columns: Vec<String>,
    #[serde(default, alias = "rows", skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<Value>,
}

impl ChartInstruction {
    /// Plain JSON object form, as handed to the visualization call.
    pub fn to_mapping(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }

    /// Parse an instruction back out of its plain mapping form.
    pub fn from_mapping(mapping: &Map<String, Value>) -> Result<Self, serde_json::Error> {
        serde_json::from_value(Value::Object(mapping.clone()))
    }
}

/// Render any JSON scalar as display text.
pub(crate) fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Accept a list of strings, numbers or a mix and keep them as text.
pub(crate) fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<Value>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .iter()
        .map(value_to_text)
        .collect())
}
