use std::collections::HashMap;

use serde::Serialize;
use tera::{Context, Tera, Value};

use crate::error::ExportError;

/// Default layout for an exported response.
///
/// Free text goes through `literal` or `one_line` so it cannot add
/// headings, page breaks or bold runs of its own.
pub const DEFAULT_RESPONSE_TEMPLATE: &str = r#"# {{ title | one_line }}
{% if description %}
{{ description | literal }}
{% endif %}
{% if patient_name %}**Patient:** {{ patient_name | one_line }}
{% endif %}**Completed:** {{ completed_at }}
**Submitted via:** {{ source }}

## Answers
{% for item in answers %}
### {{ item.question | one_line }}
{{ item.answer | literal }}
{% endfor %}"#;

/// Template context for one completed response.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseReport {
    pub title: String,
    pub description: String,
    pub patient_name: Option<String>,
    pub completed_at: String,
    pub source: String,
    pub answers: Vec<ReportAnswer>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportAnswer {
    pub question: String,
    pub answer: String,
}

/// Render a Tera template against any serializable context.
///
/// Template names without an `.html`/`.xml` extension are not autoescaped.
pub fn render_template<T: Serialize>(
    template_name: &str,
    template_content: &str,
    context: &T,
) -> Result<String, ExportError> {
    let mut tera = Tera::default();
    tera.register_filter("literal", literal_filter);
    tera.register_filter("one_line", one_line_filter);
    tera.add_raw_template(template_name, template_content)
        .map_err(|e| ExportError::TemplateParse {
            name: template_name.to_string(),
            message: e.to_string(),
        })?;

    let render_failed = |e: tera::Error| ExportError::TemplateRender {
        name: template_name.to_string(),
        message: e.to_string(),
    };
    let context = Context::from_value(serde_json::to_value(context)?).map_err(render_failed)?;

    tera.render(template_name, &context).map_err(render_failed)
}

pub fn render_response_report(report: &ResponseReport) -> Result<String, ExportError> {
    render_template("response.md", DEFAULT_RESPONSE_TEMPLATE, report)
}

fn filter_input(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Mark every non-blank line as a literal paragraph (`\` prefix).
fn literal_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let text = filter_input(value);
    let escaped: Vec<String> = text
        .lines()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("\\{line}")
            }
        })
        .collect();
    Ok(Value::String(escaped.join("\n")))
}

/// Collapse line breaks and escape `*` and `\` so the value stays plain
/// text inside the line it was placed on.
fn one_line_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let text = filter_input(value);
    let mut escaped = String::with_capacity(text.len());
    for (i, word) in text.split_whitespace().enumerate() {
        if i > 0 {
            escaped.push(' ');
        }
        for c in word.chars() {
            if matches!(c, '*' | '\\') {
                escaped.push('\\');
            }
            escaped.push(c);
        }
    }
    Ok(Value::String(escaped))
}
