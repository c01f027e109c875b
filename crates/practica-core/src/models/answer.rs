use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::question::QuestionType;

/// An answer to one question. Mirrors the [`QuestionKind`] variants and is
/// discriminated by the same `question_type` tag.
///
/// [`QuestionKind`]: super::question::QuestionKind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "question_type", rename_all = "snake_case")]
#[ts(export)]
pub enum Answer {
    Text {
        question_id: Uuid,
        value: String,
    },
    SingleChoice {
        question_id: Uuid,
        selected_option: Option<String>,
    },
    MultipleChoice {
        question_id: Uuid,
        #[serde(default)]
        selected_options: Vec<String>,
    },
    Scale {
        question_id: Uuid,
        value: Option<i32>,
    },
    Slider {
        question_id: Uuid,
        value: Option<f64>,
    },
    Date {
        question_id: Uuid,
        value: Option<jiff::civil::Date>,
    },
    FileUpload {
        question_id: Uuid,
        #[serde(default)]
        files: Vec<UploadedFile>,
    },
    YesNo {
        question_id: Uuid,
        value: Option<bool>,
    },
    BodyComplaint {
        question_id: Uuid,
        #[serde(default)]
        selected_options: Vec<String>,
    },
    HeadComplaint {
        question_id: Uuid,
        #[serde(default)]
        selected_options: Vec<String>,
    },
}

impl Answer {
    pub fn question_id(&self) -> Uuid {
        match self {
            Answer::Text { question_id, .. }
            | Answer::SingleChoice { question_id, .. }
            | Answer::MultipleChoice { question_id, .. }
            | Answer::Scale { question_id, .. }
            | Answer::Slider { question_id, .. }
            | Answer::Date { question_id, .. }
            | Answer::FileUpload { question_id, .. }
            | Answer::YesNo { question_id, .. }
            | Answer::BodyComplaint { question_id, .. }
            | Answer::HeadComplaint { question_id, .. } => *question_id,
        }
    }

    pub fn question_type(&self) -> QuestionType {
        match self {
            Answer::Text { .. } => QuestionType::Text,
            Answer::SingleChoice { .. } => QuestionType::SingleChoice,
            Answer::MultipleChoice { .. } => QuestionType::MultipleChoice,
            Answer::Scale { .. } => QuestionType::Scale,
            Answer::Slider { .. } => QuestionType::Slider,
            Answer::Date { .. } => QuestionType::Date,
            Answer::FileUpload { .. } => QuestionType::FileUpload,
            Answer::YesNo { .. } => QuestionType::YesNo,
            Answer::BodyComplaint { .. } => QuestionType::BodyComplaint,
            Answer::HeadComplaint { .. } => QuestionType::HeadComplaint,
        }
    }

    /// True when the answer carries no value at all (blank text, nothing
    /// selected, no files).
    pub fn is_empty(&self) -> bool {
        match self {
            Answer::Text { value, .. } => value.trim().is_empty(),
            Answer::SingleChoice {
                selected_option, ..
            } => selected_option.as_deref().is_none_or(|s| s.is_empty()),
            Answer::MultipleChoice {
                selected_options, ..
            }
            | Answer::BodyComplaint {
                selected_options, ..
            }
            | Answer::HeadComplaint {
                selected_options, ..
            } => selected_options.is_empty(),
            Answer::Scale { value, .. } => value.is_none(),
            Answer::Slider { value, .. } => value.is_none(),
            Answer::Date { value, .. } => value.is_none(),
            Answer::FileUpload { files, .. } => files.is_empty(),
            Answer::YesNo { value, .. } => value.is_none(),
        }
    }
}

/// A file attached to a `file_upload` answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: String,
    pub size_bytes: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_key: Option<String>,
}
