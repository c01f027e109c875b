//! Public links: time-limited, single-use tokens that let a patient fill
//! in a questionnaire without signing in.

use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use practica_audit::{ANONYMOUS_ACTOR, AuditAction, AuditEvent, ResourceType};
use practica_core::keys;
use practica_core::models::answer::Answer;
use practica_core::models::patient::Patient;
use practica_core::models::public_link::PublicLink;
use practica_core::models::questionnaire::Questionnaire;
use practica_core::models::response::{Response, ResponseSource};
use practica_forms::render::{RenderedForm, render_form};
use practica_forms::validation::validate_answers;
use practica_storage::records;

use crate::config::MAX_LINK_TTL_HOURS;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::routes::patients::load_patient;
use crate::routes::questionnaires::load_questionnaire;
use crate::routes::responses::ensure_accepting;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreateLinkRequest {
    #[serde(default)]
    pub patient_id: Option<Uuid>,
    /// Defaults to the configured link lifetime.
    #[serde(default)]
    pub expires_in_hours: Option<u32>,
}

#[derive(Serialize)]
pub struct PublicForm {
    pub form: RenderedForm,
    pub expires_at: jiff::Timestamp,
}

#[derive(Deserialize)]
pub struct PublicSubmission {
    #[serde(default)]
    pub answers: Vec<Answer>,
}

#[derive(Serialize)]
pub struct SubmissionReceipt {
    pub response_id: Uuid,
    pub completed_at: jiff::Timestamp,
}

pub async fn create_link(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<CreateLinkRequest>,
) -> Result<Json<PublicLink>, ApiError> {
    let hours = req.expires_in_hours.unwrap_or(state.link_ttl_hours);
    if !(1..=MAX_LINK_TTL_HOURS).contains(&hours) {
        return Err(ApiError::invalid(
            "expires_in_hours",
            format!("Must be between 1 and {MAX_LINK_TTL_HOURS} hours"),
        ));
    }

    let now = jiff::Timestamp::now();
    let questionnaire = load_questionnaire(&state, &user.sub, id).await?;
    ensure_accepting(&questionnaire, now)?;
    if let Some(patient_id) = req.patient_id {
        load_patient(&state, &user.sub, patient_id).await?;
    }

    let expires_at = now
        .checked_add(jiff::SignedDuration::from_hours(i64::from(hours)))
        .map_err(|e| ApiError::Internal(format!("link expiry overflow: {e}")))?;

    let link = PublicLink {
        token: Uuid::new_v4().simple().to_string(),
        doctor_id: user.sub.clone(),
        questionnaire_id: id,
        patient_id: req.patient_id,
        expires_at,
        created_at: now,
        used_at: None,
    };
    save_link(&state, &link).await?;

    AuditEvent::new(AuditAction::Create, ResourceType::PublicLink, id, &user.sub)
        .with_details(serde_json::json!({
            "expires_in_hours": hours,
            "patient_id": link.patient_id,
        }))
        .emit();

    Ok(Json(link))
}

pub async fn list_links(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<PublicLink>>, ApiError> {
    load_questionnaire(&state, &user.sub, id).await?;

    let mut links: Vec<PublicLink> =
        records::list_json(state.store(), &keys::links_prefix(&user.sub)).await?;
    links.retain(|l| l.questionnaire_id == id);
    links.sort_by_key(|l| std::cmp::Reverse(l.created_at));

    Ok(Json(links))
}

/// The shared record and the doctor's pointer are written together.
async fn save_link(state: &AppState, link: &PublicLink) -> Result<(), ApiError> {
    records::save_json(state.store(), &keys::public_link(&link.token), link).await?;
    records::save_json(
        state.store(),
        &keys::link_pointer(&link.doctor_id, &link.token),
        link,
    )
    .await?;
    Ok(())
}

/// Resolve a token to its link and questionnaire, or 410 when the link can
/// no longer be used.
async fn open(
    state: &AppState,
    token: &str,
    now: jiff::Timestamp,
) -> Result<(PublicLink, Questionnaire), ApiError> {
    let link: PublicLink = records::load_json_opt(state.store(), &keys::public_link(token))
        .await?
        .ok_or_else(|| ApiError::NotFound("link not found".to_string()))?;

    if link.used_at.is_some() {
        return Err(ApiError::Gone("this link has already been used".to_string()));
    }
    if link.is_expired(now) {
        return Err(ApiError::Gone("this link has expired".to_string()));
    }

    let questionnaire: Questionnaire = records::load_json_opt(
        state.store(),
        &keys::questionnaire(&link.doctor_id, link.questionnaire_id),
    )
    .await?
    .ok_or_else(|| ApiError::Gone("this questionnaire is no longer available".to_string()))?;
    ensure_accepting(&questionnaire, now)?;

    if let Some(patient_id) = link.patient_id {
        let patient: Option<Patient> =
            records::load_json_opt(state.store(), &keys::patient(&link.doctor_id, patient_id))
                .await?;
        if patient.is_none() {
            return Err(ApiError::Gone("this link is no longer available".to_string()));
        }
    }

    Ok((link, questionnaire))
}

pub async fn open_link(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<PublicForm>, ApiError> {
    let (link, questionnaire) = open(&state, &token, jiff::Timestamp::now()).await?;
    Ok(Json(PublicForm {
        form: render_form(&questionnaire),
        expires_at: link.expires_at,
    }))
}

/// Store the patient's answers and burn the link.
pub async fn submit_response(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(submission): Json<PublicSubmission>,
) -> Result<Json<SubmissionReceipt>, ApiError> {
    let now = jiff::Timestamp::now();
    let (mut link, questionnaire) = open(&state, &token, now).await?;
    validate_answers(&questionnaire, &submission.answers)?;

    let response = Response {
        id: Uuid::new_v4(),
        doctor_id: link.doctor_id.clone(),
        patient_id: link.patient_id,
        questionnaire_id: questionnaire.id,
        answers: submission.answers,
        completed_at: now,
        source: ResponseSource::PublicLink,
    };
    records::save_json(
        state.store(),
        &keys::response(&link.doctor_id, response.id),
        &response,
    )
    .await?;

    link.used_at = Some(now);
    save_link(&state, &link).await?;

    AuditEvent::new(AuditAction::Submit, ResourceType::Response, response.id, ANONYMOUS_ACTOR)
        .with_details(serde_json::json!({
            "doctor_id": link.doctor_id,
            "questionnaire_id": questionnaire.id,
        }))
        .emit();

    Ok(Json(SubmissionReceipt {
        response_id: response.id,
        completed_at: now,
    }))
}
