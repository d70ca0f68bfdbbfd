//! Validated chart model built from a [`ChartInstruction`].

use serde_json::Value;

use super::instruction::{value_to_text, ChartInstruction};
use super::ChartError;

/// Labelled values, one per category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// Paired numeric coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSeries {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableData {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartBody {
    Bar(CategorySeries),
    Line(CategorySeries),
    Scatter(PointSeries),
    Pie(CategorySeries),
    Table(TableData),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub body: ChartBody,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Bar,
    Line,
    Scatter,
    Pie,
    Table,
}

fn parse_kind(raw: &str) -> Result<Option<Kind>, ChartError> {
    let normalized = raw.trim().to_lowercase().replace(['-', ' '], "_");
    let kind = match normalized.as_str() {
        "" | "none" => return Ok(None),
        "bar" | "bar_chart" | "bar_graph" | "column" | "histogram" => Kind::Bar,
        "line" | "line_chart" | "line_graph" => Kind::Line,
        "scatter" | "scatter_plot" | "scatterplot" => Kind::Scatter,
        "pie" | "pie_chart" => Kind::Pie,
        "table" => Kind::Table,
        _ => return Err(ChartError::UnsupportedType(raw.to_string())),
    };
    Ok(Some(kind))
}

fn to_number(field: &'static str, index: usize, value: &Value) -> Result<f64, ChartError> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s
            .trim()
            .trim_end_matches('%')
            .replace(',', "")
            .trim_start_matches('$')
            .parse::<f64>()
            .ok(),
        _ => None,
    };

    match number {
        Some(n) if n.is_finite() => Ok(n),
        _ => Err(ChartError::NonNumeric {
            field,
            index,
            value: value_to_text(value),
        }),
    }
}

fn numbers(field: &'static str, values: &[Value]) -> Result<Vec<f64>, ChartError> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| to_number(field, index, value))
        .collect()
}

fn non_empty(text: &Option<String>) -> Option<String> {
    text.as_ref()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

impl ChartSpec {
    /// Validate an instruction.
    ///
    /// Returns `Ok(None)` when the instruction asks for no chart. Missing
    /// category labels fall back to `fallback_labels` when the counts line
    /// up, and otherwise to 1-based positions.
    pub fn from_instruction(
        instruction: &ChartInstruction,
        fallback_labels: &[String],
    ) -> Result<Option<Self>, ChartError> {
        let Some(kind) = parse_kind(&instruction.chart_type)? else {
            return Ok(None);
        };

        let body = match kind {
            Kind::Bar => ChartBody::Bar(category_series(instruction, fallback_labels)?),
            Kind::Line => ChartBody::Line(category_series(instruction, fallback_labels)?),
            Kind::Scatter => ChartBody::Scatter(point_series(instruction)?),
            Kind::Pie => ChartBody::Pie(pie_series(instruction, fallback_labels)?),
            Kind::Table => ChartBody::Table(table_data(instruction)?),
        };

        Ok(Some(Self {
            title: non_empty(&instruction.title),
            x_label: non_empty(&instruction.x_label),
            y_label: non_empty(&instruction.y_label),
            body,
        }))
    }
}

fn labels_for(
    count: usize,
    candidates: &[&[String]],
    fallback_labels: &[String],
) -> Result<Vec<String>, ChartError> {
    for labels in candidates {
        if labels.is_empty() {
            continue;
        }
        if labels.len() != count {
            return Err(ChartError::LengthMismatch {
                labels: labels.len(),
                values: count,
            });
        }
        return Ok(labels.to_vec());
    }

    if fallback_labels.len() == count {
        return Ok(fallback_labels.to_vec());
    }
    Ok((1..=count).map(|i| i.to_string()).collect())
}

fn category_series(
    instruction: &ChartInstruction,
    fallback_labels: &[String],
) -> Result<CategorySeries, ChartError> {
    let values = numbers("y_values", &instruction.y_values)?;
    if values.is_empty() {
        return Err(ChartError::EmptyData("y_values"));
    }

    let x_value_labels: Vec<String> = instruction.x_values.iter().map(value_to_text).collect();
    let labels = labels_for(
        values.len(),
        &[&instruction.x_labels, &x_value_labels, &instruction.labels],
        fallback_labels,
    )?;

    Ok(CategorySeries { labels, values })
}

fn point_series(instruction: &ChartInstruction) -> Result<PointSeries, ChartError> {
    let xs = numbers("x_values", &instruction.x_values)?;
    let ys = numbers("y_values", &instruction.y_values)?;
    if xs.is_empty() || ys.is_empty() {
        return Err(ChartError::EmptyData("x_values/y_values"));
    }
    if xs.len() != ys.len() {
        return Err(ChartError::LengthMismatch {
            labels: xs.len(),
            values: ys.len(),
        });
    }
    Ok(PointSeries { xs, ys })
}

fn pie_series(
    instruction: &ChartInstruction,
    fallback_labels: &[String],
) -> Result<CategorySeries, ChartError> {
    let source = if instruction.sizes.is_empty() {
        ("y_values", &instruction.y_values)
    } else {
        ("sizes", &instruction.sizes)
    };
    let values = numbers(source.0, source.1)?;
    if values.is_empty() {
        return Err(ChartError::EmptyData("sizes"));
    }
    if values.iter().any(|v| *v < 0.0) {
        return Err(ChartError::InvalidData(
            "pie slices must not be negative".to_string(),
        ));
    }
    if values.iter().sum::<f64>() <= 0.0 {
        return Err(ChartError::InvalidData(
            "pie slices must not all be zero".to_string(),
        ));
    }

    let labels = labels_for(
        values.len(),
        &[&instruction.labels, &instruction.x_labels],
        fallback_labels,
    )?;
    Ok(CategorySeries { labels, values })
}

fn table_data(instruction: &ChartInstruction) -> Result<TableData, ChartError> {
    if instruction.data.is_empty() {
        return Err(ChartError::EmptyData("data"));
    }

    let mut columns = instruction.columns.clone();
    let mut rows = Vec::with_capacity(instruction.data.len());

    for row in &instruction.data {
        match row {
            Value::Array(cells) => rows.push(cells.iter().map(value_to_text).collect()),
            Value::Object(fields) => {
                if columns.is_empty() {
                    columns = fields.keys().cloned().collect();
                }
                rows.push(
                    columns
                        .iter()
                        .map(|column| fields.get(column).map(value_to_text).unwrap_or_default())
                        .collect(),
                );
            }
            other => rows.push(vec![value_to_text(other)]),
        }
    }

    Ok(TableData { columns, rows })
}
