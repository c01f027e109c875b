use std::fmt;

use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
    /// Soft delete: the record stays but stops accepting new data.
    Deactivate,
    Duplicate,
    Submit,
    Export,
    Upload,
    Login,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Create => "create",
            AuditAction::Update => "update",
            AuditAction::Delete => "delete",
            AuditAction::Deactivate => "deactivate",
            AuditAction::Duplicate => "duplicate",
            AuditAction::Submit => "submit",
            AuditAction::Export => "export",
            AuditAction::Upload => "upload",
            AuditAction::Login => "login",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    Patient,
    Questionnaire,
    Question,
    Response,
    Document,
    BankQuestion,
    PublicLink,
    Appointment,
    Profile,
    Session,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Patient => "patient",
            ResourceType::Questionnaire => "questionnaire",
            ResourceType::Question => "question",
            ResourceType::Response => "response",
            ResourceType::Document => "document",
            ResourceType::BankQuestion => "bank_question",
            ResourceType::PublicLink => "public_link",
            ResourceType::Appointment => "appointment",
            ResourceType::Profile => "profile",
            ResourceType::Session => "session",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Actor recorded for submissions made through a public link. The token
/// itself is never logged.
pub const ANONYMOUS_ACTOR: &str = "public_link";

/// A structured audit event.
///
/// `actor` is the authenticated doctor's subject, or [`ANONYMOUS_ACTOR`]
/// for anonymous submissions. Patient answers never go into `details`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditEvent {
    pub action: AuditAction,
    pub resource_type: ResourceType,
    pub resource_id: String,
    pub actor: String,
    pub details: Option<serde_json::Value>,
}

impl AuditEvent {
    pub fn new(
        action: AuditAction,
        resource_type: ResourceType,
        resource_id: impl ToString,
        actor: impl Into<String>,
    ) -> Self {
        Self {
            action,
            resource_type,
            resource_id: resource_id.to_string(),
            actor: actor.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Emit this audit event via tracing.
    pub fn emit(&self) {
        let details = self
            .details
            .as_ref()
            .map(|d| d.to_string())
            .unwrap_or_default();

        info!(
            audit.action = %self.action,
            audit.resource_type = %self.resource_type,
            audit.resource_id = %self.resource_id,
            audit.actor = %self.actor,
            audit.details = %details,
            "audit event"
        );
    }
}
