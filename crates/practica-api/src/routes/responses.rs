use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use practica_audit::{AuditAction, AuditEvent, ResourceType};
use practica_core::keys;
use practica_core::models::answer::Answer;
use practica_core::models::document::Document;
use practica_core::models::questionnaire::Questionnaire;
use practica_core::models::response::{Response, ResponseSource};
use practica_export::render::{ReportAnswer, ResponseReport};
use practica_export::{DOCX_CONTENT_TYPE, response_docx};
use practica_forms::render::{RenderedAnswer, render_answers};
use practica_forms::validation::validate_answers;
use practica_storage::records;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::routes::patients::load_patient;
use crate::routes::questionnaires::load_questionnaire;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ResponseInput {
    pub questionnaire_id: Uuid,
    #[serde(default)]
    pub patient_id: Option<Uuid>,
    #[serde(default)]
    pub answers: Vec<Answer>,
}

#[derive(Deserialize)]
pub struct ResponseQuery {
    #[serde(default)]
    pub questionnaire_id: Option<Uuid>,
    #[serde(default)]
    pub patient_id: Option<Uuid>,
}

#[derive(Serialize)]
pub struct ResponsePreview {
    pub response: Response,
    pub questionnaire_title: String,
    pub answers: Vec<RenderedAnswer>,
}

/// Gate shared by doctor-entered and public submissions.
pub(crate) fn ensure_accepting(
    questionnaire: &Questionnaire,
    now: jiff::Timestamp,
) -> Result<(), ApiError> {
    if questionnaire.accepts_responses(now) {
        Ok(())
    } else {
        Err(ApiError::Gone(
            "questionnaire is no longer accepting responses".to_string(),
        ))
    }
}

async fn load_response(state: &AppState, doctor_id: &str, id: Uuid) -> Result<Response, ApiError> {
    records::load_json_opt(state.store(), &keys::response(doctor_id, id))
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("response not found: {id}")))
}

pub async fn list_responses(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<ResponseQuery>,
) -> Result<Json<Vec<Response>>, ApiError> {
    let mut responses: Vec<Response> =
        records::list_json(state.store(), &keys::responses_prefix(&user.sub)).await?;

    if let Some(questionnaire_id) = query.questionnaire_id {
        responses.retain(|r| r.questionnaire_id == questionnaire_id);
    }
    if let Some(patient_id) = query.patient_id {
        responses.retain(|r| r.patient_id == Some(patient_id));
    }
    responses.sort_by_key(|r| std::cmp::Reverse(r.completed_at));

    Ok(Json(responses))
}

/// Record answers entered by the doctor. Stored responses are never edited.
pub async fn create_response(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(input): Json<ResponseInput>,
) -> Result<Json<Response>, ApiError> {
    let now = jiff::Timestamp::now();
    let questionnaire = load_questionnaire(&state, &user.sub, input.questionnaire_id).await?;
    ensure_accepting(&questionnaire, now)?;

    if let Some(patient_id) = input.patient_id {
        load_patient(&state, &user.sub, patient_id).await?;
    }
    validate_answers(&questionnaire, &input.answers)?;

    let response = Response {
        id: Uuid::new_v4(),
        doctor_id: user.sub.clone(),
        patient_id: input.patient_id,
        questionnaire_id: questionnaire.id,
        answers: input.answers,
        completed_at: now,
        source: ResponseSource::Doctor,
    };

    records::save_json(state.store(), &keys::response(&user.sub, response.id), &response).await?;
    AuditEvent::new(AuditAction::Submit, ResourceType::Response, response.id, &user.sub)
        .with_details(serde_json::json!({ "questionnaire_id": questionnaire.id }))
        .emit();

    Ok(Json(response))
}

pub async fn get_response(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Response>, ApiError> {
    Ok(Json(load_response(&state, &user.sub, id).await?))
}

/// Read-only view: every question in order with its formatted answer.
pub async fn preview_response(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResponsePreview>, ApiError> {
    let response = load_response(&state, &user.sub, id).await?;
    let questionnaire = load_questionnaire(&state, &user.sub, response.questionnaire_id).await?;

    Ok(Json(ResponsePreview {
        answers: render_answers(&questionnaire, &response),
        questionnaire_title: questionnaire.title,
        response,
    }))
}

/// Render a response to DOCX and file it under the patient's documents.
pub async fn export_response(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Document>, ApiError> {
    let response = load_response(&state, &user.sub, id).await?;
    let patient_id = response.patient_id.ok_or_else(|| {
        ApiError::BadRequest("response is not linked to a patient".to_string())
    })?;
    let patient = load_patient(&state, &user.sub, patient_id).await?;
    let questionnaire = load_questionnaire(&state, &user.sub, response.questionnaire_id).await?;

    let report = ResponseReport {
        title: questionnaire.title.clone(),
        description: questionnaire.description.clone(),
        patient_name: Some(patient.full_name()),
        completed_at: response.completed_at.strftime("%Y-%m-%d %H:%M UTC").to_string(),
        source: match response.source {
            ResponseSource::Doctor => "entered by doctor".to_string(),
            ResponseSource::PublicLink => "public link".to_string(),
        },
        answers: render_answers(&questionnaire, &response)
            .into_iter()
            .map(|a| ReportAnswer {
                question: a.question_text,
                answer: a.display,
            })
            .collect(),
    };
    let body = response_docx(&report, &state.export_styles)?;

    let document_id = Uuid::new_v4();
    let filename = format!(
        "{}-{}.docx",
        questionnaire.title,
        response.completed_at.strftime("%Y-%m-%d")
    );
    let storage_key = keys::document_file(&user.sub, patient_id, document_id, &filename);

    let document = Document {
        id: document_id,
        doctor_id: user.sub.clone(),
        patient_id,
        filename: keys::sanitize_filename(&filename),
        content_type: DOCX_CONTENT_TYPE.to_string(),
        size_bytes: body.len() as u64,
        storage_key,
        created_at: jiff::Timestamp::now(),
    };

    state
        .store()
        .put(&document.storage_key, body, Some(DOCX_CONTENT_TYPE))
        .await?;
    records::save_json(state.store(), &keys::document(&user.sub, document.id), &document).await?;

    AuditEvent::new(AuditAction::Export, ResourceType::Response, id, &user.sub)
        .with_details(serde_json::json!({ "document_id": document.id }))
        .emit();

    Ok(Json(document))
}
