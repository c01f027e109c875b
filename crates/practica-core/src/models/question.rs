use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreError;

/// A single question inside a questionnaire.
///
/// The common envelope (`id`, `question_text`, `required`, `order`) is shared
/// by every variant. The variant payload is flattened into the same JSON
/// object and discriminated by `question_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Question {
    pub id: Uuid,
    pub question_text: String,
    #[serde(default)]
    pub required: bool,
    /// Dense 0-based rank within the owning questionnaire.
    #[serde(default)]
    pub order: u32,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

impl Question {
    pub fn new(question_text: impl Into<String>, required: bool, kind: QuestionKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            question_text: question_text.into(),
            required,
            order: 0,
            kind,
        }
    }

    pub fn question_type(&self) -> QuestionType {
        self.kind.question_type()
    }
}

/// Variant-specific payload of a [`Question`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "question_type", rename_all = "snake_case")]
#[ts(export)]
pub enum QuestionKind {
    /// Free text, single line or multi-line.
    Text {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
        #[serde(default)]
        multiline: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_length: Option<u32>,
    },
    SingleChoice {
        options: Vec<ChoiceOption>,
    },
    MultipleChoice {
        options: Vec<ChoiceOption>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_selections: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_selections: Option<u32>,
    },
    /// Integer rating scale, e.g. pain 0–10. `labels` maps a scale value
    /// (as a string) to its caption.
    Scale {
        min: i32,
        max: i32,
        #[serde(default)]
        labels: BTreeMap<String, String>,
    },
    Slider {
        min: f64,
        max: f64,
        step: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        unit: Option<String>,
    },
    Date {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_date: Option<jiff::civil::Date>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_date: Option<jiff::civil::Date>,
    },
    FileUpload {
        /// MIME types (`image/png`), wildcards (`image/*`) or extensions (`.pdf`).
        /// Empty accepts any file.
        #[serde(default)]
        accepted_file_types: Vec<String>,
        max_files: u32,
    },
    YesNo {},
    /// Region picker over a full-body diagram.
    BodyComplaint {
        regions: Vec<AnatomicalRegion>,
    },
    /// Region picker over a head and face diagram.
    HeadComplaint {
        regions: Vec<AnatomicalRegion>,
    },
}

impl QuestionKind {
    pub fn question_type(&self) -> QuestionType {
        match self {
            QuestionKind::Text { .. } => QuestionType::Text,
            QuestionKind::SingleChoice { .. } => QuestionType::SingleChoice,
            QuestionKind::MultipleChoice { .. } => QuestionType::MultipleChoice,
            QuestionKind::Scale { .. } => QuestionType::Scale,
            QuestionKind::Slider { .. } => QuestionType::Slider,
            QuestionKind::Date { .. } => QuestionType::Date,
            QuestionKind::FileUpload { .. } => QuestionType::FileUpload,
            QuestionKind::YesNo {} => QuestionType::YesNo,
            QuestionKind::BodyComplaint { .. } => QuestionType::BodyComplaint,
            QuestionKind::HeadComplaint { .. } => QuestionType::HeadComplaint,
        }
    }
}

/// The bare discriminant of a question or answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum QuestionType {
    Text,
    SingleChoice,
    MultipleChoice,
    Scale,
    Slider,
    Date,
    FileUpload,
    YesNo,
    BodyComplaint,
    HeadComplaint,
}

impl QuestionType {
    pub const ALL: [QuestionType; 10] = [
        QuestionType::Text,
        QuestionType::SingleChoice,
        QuestionType::MultipleChoice,
        QuestionType::Scale,
        QuestionType::Slider,
        QuestionType::Date,
        QuestionType::FileUpload,
        QuestionType::YesNo,
        QuestionType::BodyComplaint,
        QuestionType::HeadComplaint,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Text => "text",
            QuestionType::SingleChoice => "single_choice",
            QuestionType::MultipleChoice => "multiple_choice",
            QuestionType::Scale => "scale",
            QuestionType::Slider => "slider",
            QuestionType::Date => "date",
            QuestionType::FileUpload => "file_upload",
            QuestionType::YesNo => "yes_no",
            QuestionType::BodyComplaint => "body_complaint",
            QuestionType::HeadComplaint => "head_complaint",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QuestionType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| CoreError::UnknownQuestionType(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
}

impl ChoiceOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// A selectable region on an anatomical diagram (e.g. `lower_back`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnatomicalRegion {
    pub id: String,
    pub label: String,
}

impl AnatomicalRegion {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}
