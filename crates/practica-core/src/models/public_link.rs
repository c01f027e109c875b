use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// A time-limited token granting anonymous access to complete one
/// questionnaire instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PublicLink {
    pub token: String,
    pub doctor_id: String,
    pub questionnaire_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<Uuid>,
    pub expires_at: jiff::Timestamp,
    pub created_at: jiff::Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub used_at: Option<jiff::Timestamp>,
}

impl PublicLink {
    pub fn is_expired(&self, now: jiff::Timestamp) -> bool {
        now >= self.expires_at
    }

    pub fn is_usable(&self, now: jiff::Timestamp) -> bool {
        self.used_at.is_none() && !self.is_expired(now)
    }
}
