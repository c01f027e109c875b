use practica_audit::{ANONYMOUS_ACTOR, AuditAction, AuditEvent, ResourceType};
use serde_json::json;

#[test]
fn new_event_has_no_details() {
    let event = AuditEvent::new(AuditAction::Create, ResourceType::Patient, 42, "doctor-1");
    assert_eq!(event.resource_id, "42");
    assert_eq!(event.actor, "doctor-1");
    assert!(event.details.is_none());
}

#[test]
fn serializes_with_snake_case_names() {
    let event = AuditEvent::new(
        AuditAction::Deactivate,
        ResourceType::BankQuestion,
        "q-1",
        "doctor-1",
    )
    .with_details(json!({ "reason": "has responses" }));

    let value = serde_json::to_value(&event).unwrap();
    assert_eq!(value["action"], "deactivate");
    assert_eq!(value["resource_type"], "bank_question");
    assert_eq!(value["details"]["reason"], "has responses");
}

#[test]
fn display_matches_serialized_names() {
    assert_eq!(AuditAction::Submit.to_string(), "submit");
    assert_eq!(ResourceType::PublicLink.to_string(), "public_link");
}

#[test]
fn emit_without_subscriber_is_a_no_op() {
    AuditEvent::new(AuditAction::Export, ResourceType::Response, "r-1", "doctor-1").emit();
}

#[test]
fn anonymous_submissions_do_not_carry_the_link_token() {
    let event = AuditEvent::new(
        AuditAction::Submit,
        ResourceType::Response,
        "r-1",
        ANONYMOUS_ACTOR,
    );
    assert_eq!(event.actor, "public_link");
    assert!(!event.actor.contains(':'));
}
