use practica_core::models::answer::{Answer, UploadedFile};
use practica_core::models::question::{Question, QuestionKind, QuestionType};

use crate::QuestionHandler;
use crate::render::AnswerShape;

/// One or more attached files, filtered by type.
pub struct FileUpload;

/// Whether `file` matches one accepted type entry.
///
/// Entries are MIME types (`application/pdf`), wildcards (`image/*`) or
/// filename extensions (`.pdf`), all compared case-insensitively.
pub fn accepts(accepted: &str, file: &UploadedFile) -> bool {
    let accepted = accepted.trim().to_ascii_lowercase();
    let content_type = file.content_type.to_ascii_lowercase();

    if accepted.starts_with('.') {
        return file.filename.to_ascii_lowercase().ends_with(&accepted);
    }
    if let Some(family) = accepted.strip_suffix("/*") {
        return content_type
            .split_once('/')
            .is_some_and(|(major, _)| major == family);
    }
    content_type == accepted
}

impl QuestionHandler for FileUpload {
    fn question_type(&self) -> QuestionType {
        QuestionType::FileUpload
    }

    fn label(&self) -> &str {
        "File upload"
    }

    fn component(&self) -> &str {
        "FileUploadQuestion"
    }

    fn answer_shape(&self) -> AnswerShape {
        AnswerShape::Files
    }

    fn check_definition(&self, question: &Question) -> Vec<String> {
        let QuestionKind::FileUpload {
            accepted_file_types,
            max_files,
        } = &question.kind
        else {
            return Vec::new();
        };

        let mut problems = Vec::new();
        if *max_files == 0 {
            problems.push("max_files must be at least 1".to_string());
        }
        if accepted_file_types.iter().any(|t| t.trim().is_empty()) {
            problems.push("accepted file types must not be blank".to_string());
        }
        problems
    }

    fn check_answer(&self, question: &Question, answer: &Answer) -> Option<String> {
        let (
            QuestionKind::FileUpload {
                accepted_file_types,
                max_files,
            },
            Answer::FileUpload { files, .. },
        ) = (&question.kind, answer)
        else {
            return None;
        };

        if files.len() > *max_files as usize {
            return Some(format!("At most {max_files} file(s) may be attached"));
        }
        if accepted_file_types.is_empty() {
            return None;
        }
        files
            .iter()
            .find(|f| !accepted_file_types.iter().any(|t| accepts(t, f)))
            .map(|f| {
                format!(
                    "'{}' is not an accepted file type ({})",
                    f.filename,
                    accepted_file_types.join(", ")
                )
            })
    }

    fn display_answer(&self, _question: &Question, answer: &Answer) -> String {
        match answer {
            Answer::FileUpload { files, .. } => files
                .iter()
                .map(|f| f.filename.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            _ => String::new(),
        }
    }
}
