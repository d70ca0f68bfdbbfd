//! Prompts for visual question generation.

pub const VISUAL_SYSTEM_PROMPT: &str = r#"You are an expert exam writer who creates multiple-choice questions that are answered by reading a chart.

Reply with JSON only, no commentary, using exactly this structure:

{
  "questions": [
    {
      "question": "Question text that refers to the chart",
      "options": ["first option", "second option", "third option", "fourth option"],
      "answer": "the correct option, copied exactly from options",
      "explanation": "why the answer is correct",
      "graph_instruction": {
        "type": "bar | line | pie | scatter | table",
        "title": "chart title",
        "x_label": "x axis label",
        "y_label": "y axis label",
        "x_labels": ["category labels for bar and line charts"],
        "x_values": [1, 2, 3],
        "y_values": [10, 20, 30],
        "labels": ["slice labels for pie charts"],
        "sizes": [25, 75],
        "columns": ["table column headers"],
        "data": [["table", "rows"]]
      }
    }
  ]
}

Rules:
- Every question must need the chart to be answered.
- Use plain numbers in numeric arrays, never strings with units.
- bar and line charts need y_values and matching x_labels.
- scatter charts need x_values and y_values of equal length.
- pie charts need labels and sizes of equal length.
- table charts need columns and data rows.
- Leave out keys that the chosen chart type does not use."#;

pub fn visual_user_prompt(topic: &str, num: u32) -> String {
    let plural = if num == 1 { "" } else { "s" };
    format!(
        "Generate {num} visual multiple-choice question{plural} on the topic: {topic}\n\
         Return exactly {num} item{plural} in the \"questions\" array."
    )
}
