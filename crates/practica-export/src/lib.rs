//! practica-export
//!
//! Printable exports of completed responses: Tera renders a small markdown
//! subset, which `docx` turns into a Word document.

pub mod docx;
pub mod error;
pub mod render;
pub mod styles;

use crate::error::ExportError;
use crate::render::ResponseReport;
use crate::styles::DocumentStyles;

pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Render a response report with the default template and build the DOCX.
pub fn response_docx(report: &ResponseReport, styles: &DocumentStyles) -> Result<Vec<u8>, ExportError> {
    let rendered = render::render_response_report(report)?;
    docx::generate_docx(&rendered, styles)
}
