mod common;

use axum::http::{Method, StatusCode};
use common::*;
use practica_core::keys;
use practica_core::models::public_link::PublicLink;
use practica_storage::{ObjectStore, records};
use serde_json::{Value, json};

async fn link_for(app: &TestApp, questionnaire: &Value, body: Value) -> (StatusCode, Value) {
    app.post(
        &format!("/questionnaires/{}/links", questionnaire["id"].as_str().unwrap()),
        body,
    )
    .await
}

#[tokio::test]
async fn link_defaults_to_seventy_two_hours() {
    let app = TestApp::new();
    let q = app.create_questionnaire("Intake").await;

    let (status, link) = link_for(&app, &q, json!({})).await;
    assert_eq!(status, StatusCode::OK, "{link}");
    assert_eq!(link["token"].as_str().unwrap().len(), 32);
    assert!(link["used_at"].is_null());

    let created: jiff::Timestamp = link["created_at"].as_str().unwrap().parse().unwrap();
    let expires: jiff::Timestamp = link["expires_at"].as_str().unwrap().parse().unwrap();
    assert_eq!(expires.duration_since(created), jiff::SignedDuration::from_hours(72));
}

#[tokio::test]
async fn link_lifetime_must_be_in_range() {
    let app = TestApp::new();
    let q = app.create_questionnaire("Intake").await;

    for hours in [0, 721] {
        let (status, body) = link_for(&app, &q, json!({ "expires_in_hours": hours })).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["fields"]["expires_in_hours"].is_string());
    }

    let (status, _) = link_for(&app, &q, json!({ "expires_in_hours": 720 })).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn link_for_unknown_patient_is_not_found() {
    let app = TestApp::new();
    let q = app.create_questionnaire("Intake").await;
    let (status, _) = link_for(&app, &q, json!({ "patient_id": uuid::Uuid::new_v4() })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn open_and_submit_once() {
    let app = TestApp::new();
    let patient = app.create_patient("Ada", "Lovelace").await;
    let q = app.create_questionnaire("Intake").await;
    let (_, link) = link_for(&app, &q, json!({ "patient_id": patient })).await;
    let token = link["token"].as_str().unwrap();

    let (status, form) = app
        .call(Method::GET, &format!("/public/{token}"), None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(form["form"]["title"], "Intake");
    assert_eq!(form["form"]["fields"].as_array().unwrap().len(), 2);

    let (status, receipt) = app
        .call(
            Method::POST,
            &format!("/public/{token}/responses"),
            None,
            Some(json!({ "answers": valid_answers(&q) })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{receipt}");

    let (_, stored) = app
        .get(&format!("/responses/{}", receipt["response_id"].as_str().unwrap()))
        .await;
    assert_eq!(stored["source"], "public_link");
    assert_eq!(stored["patient_id"], patient.as_str());

    let (status, _) = app
        .call(Method::GET, &format!("/public/{token}"), None, None)
        .await;
    assert_eq!(status, StatusCode::GONE);

    let (status, _) = app
        .call(
            Method::POST,
            &format!("/public/{token}/responses"),
            None,
            Some(json!({ "answers": valid_answers(&q) })),
        )
        .await;
    assert_eq!(status, StatusCode::GONE);

    let (_, links) = app
        .get(&format!("/questionnaires/{}/links", q["id"].as_str().unwrap()))
        .await;
    assert!(links[0]["used_at"].is_string());
}

#[tokio::test]
async fn invalid_submission_leaves_link_usable() {
    let app = TestApp::new();
    let q = app.create_questionnaire("Intake").await;
    let (_, link) = link_for(&app, &q, json!({})).await;
    let token = link["token"].as_str().unwrap();
    let required_id = &question_ids(&q)[0];

    let (status, body) = app
        .call(
            Method::POST,
            &format!("/public/{token}/responses"),
            None,
            Some(json!({ "answers": [] })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["fields"][required_id], "This question is required");

    let (status, _) = app
        .call(Method::GET, &format!("/public/{token}"), None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn expired_link_is_gone() {
    let app = TestApp::new();
    let q = app.create_questionnaire("Intake").await;
    let (_, link) = link_for(&app, &q, json!({})).await;
    let token = link["token"].as_str().unwrap();

    let key = keys::public_link(token);
    let mut stored: PublicLink = records::load_json(app.store.as_ref(), &key).await.unwrap();
    stored.expires_at = jiff::Timestamp::now() - jiff::SignedDuration::from_mins(1);
    records::save_json(app.store.as_ref(), &key, &stored).await.unwrap();

    let (status, body) = app
        .call(Method::GET, &format!("/public/{token}"), None, None)
        .await;
    assert_eq!(status, StatusCode::GONE);
    assert_eq!(body["error"], "this link has expired");
}

#[tokio::test]
async fn deactivated_questionnaire_closes_its_links() {
    let app = TestApp::new();
    let q = app.create_questionnaire("Intake").await;
    let id = q["id"].as_str().unwrap();
    let (_, link) = link_for(&app, &q, json!({})).await;
    let token = link["token"].as_str().unwrap();

    let (status, _) = app
        .put(
            &format!("/questionnaires/{id}"),
            json!({ "title": "Intake", "questions": q["questions"], "is_active": false }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .call(Method::GET, &format!("/public/{token}"), None, None)
        .await;
    assert_eq!(status, StatusCode::GONE);

    let (status, _) = link_for(&app, &q, json!({})).await;
    assert_eq!(status, StatusCode::GONE);
}

#[tokio::test]
async fn unknown_token_is_not_found() {
    let app = TestApp::new();
    let (status, _) = app
        .call(Method::GET, "/public/0123456789abcdef", None, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_patient_revokes_their_links() {
    let app = TestApp::new();
    let patient = app.create_patient("Ada", "Lovelace").await;
    let q = app.create_questionnaire("Intake").await;
    let (_, mine) = link_for(&app, &q, json!({ "patient_id": patient })).await;
    let (_, open) = link_for(&app, &q, json!({})).await;
    let token = mine["token"].as_str().unwrap();

    let (status, deleted) = app.delete(&format!("/patients/{patient}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["links_removed"], 1);

    let (status, _) = app
        .call(Method::GET, &format!("/public/{token}"), None, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app
        .call(
            Method::POST,
            &format!("/public/{token}/responses"),
            None,
            Some(json!({ "answers": valid_answers(&q) })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, links) = app
        .get(&format!("/questionnaires/{}/links", q["id"].as_str().unwrap()))
        .await;
    let tokens: Vec<&str> = links
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["token"].as_str().unwrap())
        .collect();
    assert_eq!(tokens, [open["token"].as_str().unwrap()]);
}

#[tokio::test]
async fn link_for_missing_patient_is_gone() {
    let app = TestApp::new();
    let patient = app.create_patient("Ada", "Lovelace").await;
    let q = app.create_questionnaire("Intake").await;
    let (_, link) = link_for(&app, &q, json!({ "patient_id": patient })).await;
    let token = link["token"].as_str().unwrap();

    app.store
        .delete(&keys::patient(DOCTOR, patient.parse().unwrap()))
        .await
        .unwrap();

    let (status, _) = app
        .call(Method::GET, &format!("/public/{token}"), None, None)
        .await;
    assert_eq!(status, StatusCode::GONE);
    let (status, _) = app
        .call(
            Method::POST,
            &format!("/public/{token}/responses"),
            None,
            Some(json!({ "answers": valid_answers(&q) })),
        )
        .await;
    assert_eq!(status, StatusCode::GONE);

    let (_, responses) = app.get("/responses").await;
    assert!(responses.as_array().unwrap().is_empty());
}
