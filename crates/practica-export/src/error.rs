use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("template {name} is invalid: {message}")]
    TemplateParse { name: String, message: String },

    #[error("template {name} failed to render: {message}")]
    TemplateRender { name: String, message: String },

    #[error("report context could not be serialized: {0}")]
    Context(#[from] serde_json::Error),

    #[error("could not pack DOCX: {0}")]
    Docx(String),
}
