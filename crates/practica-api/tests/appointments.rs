mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::{Value, json};

async fn book(app: &TestApp, patient: &str, starts_at: &str, ends_at: &str) -> (StatusCode, Value) {
    app.post(
        "/appointments",
        json!({
            "patient_id": patient,
            "starts_at": starts_at,
            "ends_at": ends_at,
            "reason": "  Follow-up  ",
        }),
    )
    .await
}

#[tokio::test]
async fn booking_defaults_to_scheduled() {
    let app = TestApp::new();
    let patient = app.create_patient("Ada", "Lovelace").await;

    let (status, appt) = book(&app, &patient, "2026-03-02T09:00:00Z", "2026-03-02T09:30:00Z").await;
    assert_eq!(status, StatusCode::OK, "{appt}");
    assert_eq!(appt["status"], "scheduled");
    assert_eq!(appt["reason"], "Follow-up");

    let (_, listed) = app.get(&format!("/patients/{patient}/appointments")).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn overlapping_bookings_conflict() {
    let app = TestApp::new();
    let ada = app.create_patient("Ada", "Lovelace").await;
    let alan = app.create_patient("Alan", "Turing").await;

    book(&app, &ada, "2026-03-02T09:00:00Z", "2026-03-02T10:00:00Z").await;

    let (status, _) = book(&app, &alan, "2026-03-02T09:30:00Z", "2026-03-02T10:30:00Z").await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = book(&app, &alan, "2026-03-02T10:00:00Z", "2026-03-02T10:30:00Z").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn cancelled_slot_can_be_rebooked() {
    let app = TestApp::new();
    let ada = app.create_patient("Ada", "Lovelace").await;
    let alan = app.create_patient("Alan", "Turing").await;

    let (_, first) = book(&app, &ada, "2026-03-02T09:00:00Z", "2026-03-02T10:00:00Z").await;
    let (status, cancelled) = app
        .put(
            &format!("/appointments/{}", first["id"].as_str().unwrap()),
            json!({
                "patient_id": ada,
                "starts_at": "2026-03-02T09:00:00Z",
                "ends_at": "2026-03-02T10:00:00Z",
                "status": "cancelled",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cancelled["status"], "cancelled");

    let (status, _) = book(&app, &alan, "2026-03-02T09:00:00Z", "2026-03-02T10:00:00Z").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn rescheduling_does_not_clash_with_itself() {
    let app = TestApp::new();
    let ada = app.create_patient("Ada", "Lovelace").await;
    let (_, appt) = book(&app, &ada, "2026-03-02T09:00:00Z", "2026-03-02T10:00:00Z").await;

    let (status, moved) = app
        .put(
            &format!("/appointments/{}", appt["id"].as_str().unwrap()),
            json!({
                "patient_id": ada,
                "starts_at": "2026-03-02T09:30:00Z",
                "ends_at": "2026-03-02T10:30:00Z",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{moved}");
    assert_eq!(moved["status"], "scheduled");
    assert!(moved.get("reason").is_none());
}

#[tokio::test]
async fn end_must_follow_start() {
    let app = TestApp::new();
    let ada = app.create_patient("Ada", "Lovelace").await;

    let (status, body) = book(&app, &ada, "2026-03-02T10:00:00Z", "2026-03-02T10:00:00Z").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["fields"]["ends_at"].is_string());
}

#[tokio::test]
async fn unknown_patient_is_not_found() {
    let app = TestApp::new();
    let (status, _) = book(
        &app,
        &uuid::Uuid::new_v4().to_string(),
        "2026-03-02T09:00:00Z",
        "2026-03-02T10:00:00Z",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn window_query_returns_overlapping_appointments() {
    let app = TestApp::new();
    let ada = app.create_patient("Ada", "Lovelace").await;

    book(&app, &ada, "2026-03-02T09:00:00Z", "2026-03-02T10:00:00Z").await;
    book(&app, &ada, "2026-03-03T09:00:00Z", "2026-03-03T10:00:00Z").await;
    book(&app, &ada, "2026-03-04T09:00:00Z", "2026-03-04T10:00:00Z").await;

    let (status, listed) = app
        .get("/appointments?from=2026-03-02T09:30:00Z&to=2026-03-04T09:00:00Z")
        .await;
    assert_eq!(status, StatusCode::OK);
    let starts: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["starts_at"].as_str().unwrap())
        .collect();
    assert_eq!(starts, ["2026-03-02T09:00:00Z", "2026-03-03T09:00:00Z"]);
}

#[tokio::test]
async fn deleted_appointment_is_gone_from_listing() {
    let app = TestApp::new();
    let ada = app.create_patient("Ada", "Lovelace").await;
    let (_, appt) = book(&app, &ada, "2026-03-02T09:00:00Z", "2026-03-02T10:00:00Z").await;
    let id = appt["id"].as_str().unwrap();

    let (status, _) = app.delete(&format!("/appointments/{id}")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.get(&format!("/appointments/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, listed) = app.get("/appointments").await;
    assert!(listed.as_array().unwrap().is_empty());
}
