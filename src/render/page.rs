//! HTML page rendering.

use std::fmt::{self, Write as _};

use crate::config::Defaults;
use crate::provider::ProviderKind;
use crate::settings::Settings;

use super::{QuestionBlock, Visual};

pub const PAGE_TITLE: &str = "Visual Question Generator";

const STYLE: &str = r#"
body { margin: 0; font-family: -apple-system, "Segoe UI", Roboto, sans-serif; background: #0e1117; color: #fafafa; }
.layout { display: flex; min-height: 100vh; }
aside { width: 320px; padding: 24px; background: #262730; box-sizing: border-box; }
main { flex: 1; padding: 32px 48px; max-width: 900px; }
h1 { margin-top: 0; }
label { display: block; margin: 14px 0 6px; font-size: 14px; }
input, select { width: 100%; padding: 8px; border-radius: 6px; border: 1px solid #4b4c57; background: #0e1117; color: #fafafa; box-sizing: border-box; }
button { margin-top: 20px; width: 100%; padding: 10px; border: 0; border-radius: 6px; background: #ff4b4b; color: #fff; font-weight: 600; cursor: pointer; }
.banner { padding: 12px 16px; border-radius: 6px; margin-bottom: 24px; }
.banner.success { background: #173928; color: #3dd56d; }
.banner.error { background: #3e1c1f; color: #ff6c6c; }
.banner.warning { background: #3f3a16; color: #ffd16a; }
.question { border-top: 1px solid #31333f; padding: 16px 0 24px; }
.question img { display: block; margin: 12px 0; background: #fff; border-radius: 4px; }
.question ol { list-style: none; padding-left: 0; }
.answer { font-weight: 600; }
footer { margin-top: 48px; color: #808495; font-size: 13px; }
"#;

const SCRIPT: &str = r#"
function showKeyField() {
  var provider = document.getElementById("provider").value;
  document.querySelectorAll("[data-provider]").forEach(function (el) {
    el.style.display = el.getAttribute("data-provider") === provider ? "block" : "none";
  });
}
document.getElementById("provider").addEventListener("change", showKeyField);
showKeyField();
"#;

/// Values echoed back into the settings form. Keys are never echoed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub provider: ProviderKind,
    pub topic: String,
    pub num_questions: u32,
}

impl FormView {
    pub fn from_defaults(defaults: &Defaults) -> Self {
        Self {
            provider: ProviderKind::default(),
            topic: defaults.topic.clone(),
            num_questions: defaults.num_questions,
        }
    }
}

impl From<&Settings> for FormView {
    fn from(settings: &Settings) -> Self {
        Self {
            provider: settings.provider,
            topic: settings.topic.clone(),
            num_questions: settings.question_count.get(),
        }
    }
}

/// Status line shown above the questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    Success(String),
    Warning(String),
    Error(String),
}

impl Banner {
    pub fn text(&self) -> &str {
        match self {
            Banner::Success(text) | Banner::Warning(text) | Banner::Error(text) => text,
        }
    }

    /// Per-question notice for a missing or failed visualization.
    pub fn for_visual(visual: &Visual) -> Option<Self> {
        let message = visual.message()?;
        match visual {
            Visual::Image(_) => None,
            Visual::Unavailable => Some(Banner::Warning(message)),
            Visual::Failed(_) => Some(Banner::Error(message)),
        }
    }

    fn class(&self) -> &'static str {
        match self {
            Banner::Success(_) => "success",
            Banner::Warning(_) => "warning",
            Banner::Error(_) => "error",
        }
    }
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render the full page: settings form, optional banner, question blocks.
pub fn render_page(form: &FormView, banner: Option<&Banner>, blocks: &[QuestionBlock]) -> String {
    let mut html = String::with_capacity(4096 + blocks.len() * 1024);
    if let Err(e) = write_page(&mut html, form, banner, blocks) {
        tracing::error!(error = %e, "Page rendering failed");
    }
    html
}

fn write_page(
    html: &mut String,
    form: &FormView,
    banner: Option<&Banner>,
    blocks: &[QuestionBlock],
) -> fmt::Result {
    write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n<div class=\"layout\">\n",
        title = PAGE_TITLE,
    )?;

    write_form(html, form)?;

    html.push_str("<main>\n");
    writeln!(html, "<h1>{}</h1>", PAGE_TITLE)?;

    if let Some(banner) = banner {
        write_banner(html, banner)?;
    }

    for block in blocks {
        write_block(html, block)?;
    }

    html.push_str("<footer>Powered by vizquiz</footer>\n</main>\n</div>\n");
    write!(html, "<script>{SCRIPT}</script>\n</body>\n</html>\n")
}

fn write_banner(html: &mut String, banner: &Banner) -> fmt::Result {
    writeln!(
        html,
        "<div class=\"banner {}\">{}</div>",
        banner.class(),
        escape_html(banner.text())
    )
}

fn write_form(html: &mut String, form: &FormView) -> fmt::Result {
    html.push_str("<aside>\n<form method=\"post\" action=\"/generate\">\n<h2>Settings</h2>\n");

    html.push_str("<label for=\"provider\">Provider</label>\n<select id=\"provider\" name=\"provider\">\n");
    for kind in ProviderKind::ALL {
        let selected = if kind == form.provider { " selected" } else { "" };
        writeln!(
            html,
            "<option value=\"{}\"{}>{}</option>",
            kind.label(),
            selected,
            kind.label()
        )?;
    }
    html.push_str("</select>\n");

    writeln!(
        html,
        "<label for=\"topic\">Topic</label>\n\
         <input id=\"topic\" name=\"topic\" type=\"text\" value=\"{}\">",
        escape_html(&form.topic)
    )?;
    writeln!(
        html,
        "<label for=\"num_questions\">Number of questions</label>\n\
         <input id=\"num_questions\" name=\"num_questions\" type=\"number\" min=\"1\" max=\"1000\" step=\"1\" value=\"{}\">",
        form.num_questions
    )?;

    for kind in ProviderKind::ALL {
        writeln!(
            html,
            "<div data-provider=\"{label}\">\n<label for=\"{field}\">{key_label}</label>\n\
             <input id=\"{field}\" name=\"{field}\" type=\"password\" autocomplete=\"off\">\n</div>",
            label = kind.label(),
            field = kind.key_field(),
            key_label = kind.key_label(),
        )?;
    }

    html.push_str("<button type=\"submit\">Generate Visual Questions</button>\n</form>\n</aside>\n");
    Ok(())
}

fn write_block(html: &mut String, block: &QuestionBlock) -> fmt::Result {
    html.push_str("<section class=\"question\">\n");
    writeln!(html, "<h3>Question: {}</h3>", escape_html(&block.question))?;

    if let Visual::Image(image) = &block.visual {
        writeln!(
            html,
            "<img src=\"data:image/png;base64,{}\" width=\"400\" alt=\"Chart\">",
            image
        )?;
    } else if let Some(banner) = Banner::for_visual(&block.visual) {
        write_banner(html, &banner)?;
    }

    html.push_str("<ol>\n");
    for (letter, text) in &block.options {
        writeln!(html, "<li>{}. {}</li>", letter, escape_html(text))?;
    }
    html.push_str("</ol>\n");

    writeln!(
        html,
        "<p class=\"answer\">Correct Answer: {}</p>",
        escape_html(&block.answer)
    )?;
    if let Some(explanation) = &block.explanation {
        writeln!(html, "<p>Explanation: {}</p>", escape_html(explanation))?;
    }

    html.push_str("</section>\n");
    Ok(())
}
