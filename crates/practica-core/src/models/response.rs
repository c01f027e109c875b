use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::answer::Answer;

/// A submitted set of answers. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Response {
    pub id: Uuid,
    pub doctor_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<Uuid>,
    pub questionnaire_id: Uuid,
    pub answers: Vec<Answer>,
    pub completed_at: jiff::Timestamp,
    pub source: ResponseSource,
}

impl Response {
    pub fn answer_for(&self, question_id: Uuid) -> Option<&Answer> {
        self.answers.iter().find(|a| a.question_id() == question_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ResponseSource {
    /// Entered by the doctor on behalf of the patient.
    Doctor,
    /// Submitted anonymously through a public link.
    PublicLink,
}
