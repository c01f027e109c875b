use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use practica_audit::{AuditAction, AuditEvent, ResourceType};
use practica_core::keys;
use practica_core::models::public_link::PublicLink;
use practica_core::models::question::{Question, QuestionKind};
use practica_core::models::question_bank::BankQuestion;
use practica_core::models::questionnaire::Questionnaire;
use practica_core::models::response::Response;
use practica_forms::builder;
use practica_forms::duplicate;
use practica_forms::render::{RenderedForm, render_form};
use practica_forms::validation::validate_definition;
use practica_storage::records;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::routes::clean;
use crate::state::AppState;

/// A question as sent by the builder. The server assigns ids and order.
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionInput {
    pub question_text: String,
    #[serde(default)]
    pub required: bool,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

impl QuestionInput {
    pub(crate) fn into_question(self) -> Question {
        Question::new(self.question_text.trim(), self.required, self.kind)
    }
}

#[derive(Deserialize)]
pub struct QuestionnaireInput {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub specialty: Option<String>,
    /// Full question array. Existing ids are kept; order is renormalized.
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub expires_at: Option<jiff::Timestamp>,
}

impl QuestionnaireInput {
    fn apply(self, questionnaire: &mut Questionnaire) {
        questionnaire.title = self.title.trim().to_string();
        questionnaire.description = self.description.trim().to_string();
        questionnaire.category = clean(self.category);
        questionnaire.specialty = clean(self.specialty);
        questionnaire.questions = self.questions;
        builder::normalize(&mut questionnaire.questions);
        if let Some(active) = self.is_active {
            questionnaire.is_active = active;
        }
        questionnaire.expires_at = self.expires_at;
    }
}

#[derive(Deserialize)]
pub struct QuestionnaireQuery {
    #[serde(default)]
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteOutcome {
    Deleted,
    /// Responses reference the questionnaire, so it was only deactivated.
    Deactivated,
}

#[derive(Serialize)]
pub struct QuestionnaireDeleted {
    pub id: Uuid,
    pub outcome: DeleteOutcome,
}

#[derive(Deserialize)]
pub struct InsertQuestionRequest {
    pub question: QuestionInput,
    /// Zero-based position; appends when absent.
    #[serde(default)]
    pub position: Option<usize>,
}

#[derive(Deserialize)]
pub struct ReorderRequest {
    pub from: usize,
    pub to: usize,
}

#[derive(Deserialize)]
pub struct FromBankRequest {
    pub bank_question_id: Uuid,
    #[serde(default)]
    pub position: Option<usize>,
}

pub(crate) async fn load_questionnaire(
    state: &AppState,
    doctor_id: &str,
    id: Uuid,
) -> Result<Questionnaire, ApiError> {
    records::load_json_opt(state.store(), &keys::questionnaire(doctor_id, id))
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("questionnaire not found: {id}")))
}

/// Validate and persist a questionnaire after an edit.
async fn save_questionnaire(
    state: &AppState,
    questionnaire: &mut Questionnaire,
) -> Result<(), ApiError> {
    validate_definition(questionnaire)?;
    questionnaire.updated_at = jiff::Timestamp::now();
    records::save_json(
        state.store(),
        &keys::questionnaire(&questionnaire.doctor_id, questionnaire.id),
        questionnaire,
    )
    .await?;
    Ok(())
}

async fn all_questionnaires(state: &AppState, doctor_id: &str) -> Result<Vec<Questionnaire>, ApiError> {
    Ok(records::list_json(state.store(), &keys::questionnaires_prefix(doctor_id)).await?)
}

pub async fn list_questionnaires(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<QuestionnaireQuery>,
) -> Result<Json<Vec<Questionnaire>>, ApiError> {
    let mut questionnaires = all_questionnaires(&state, &user.sub).await?;
    if let Some(active) = query.active {
        questionnaires.retain(|q| q.is_active == active);
    }
    questionnaires.sort_by_key(|q| std::cmp::Reverse(q.updated_at));
    Ok(Json(questionnaires))
}

pub async fn get_questionnaire(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Questionnaire>, ApiError> {
    Ok(Json(load_questionnaire(&state, &user.sub, id).await?))
}

pub async fn create_questionnaire(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(input): Json<QuestionnaireInput>,
) -> Result<Json<Questionnaire>, ApiError> {
    let now = jiff::Timestamp::now();
    let mut questionnaire = Questionnaire {
        id: Uuid::new_v4(),
        doctor_id: user.sub.clone(),
        title: String::new(),
        description: String::new(),
        category: None,
        specialty: None,
        questions: Vec::new(),
        is_active: true,
        expires_at: None,
        created_at: now,
        updated_at: now,
    };
    input.apply(&mut questionnaire);

    save_questionnaire(&state, &mut questionnaire).await?;
    AuditEvent::new(
        AuditAction::Create,
        ResourceType::Questionnaire,
        questionnaire.id,
        &user.sub,
    )
    .emit();

    Ok(Json(questionnaire))
}

pub async fn update_questionnaire(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(input): Json<QuestionnaireInput>,
) -> Result<Json<Questionnaire>, ApiError> {
    let mut questionnaire = load_questionnaire(&state, &user.sub, id).await?;
    input.apply(&mut questionnaire);

    save_questionnaire(&state, &mut questionnaire).await?;
    AuditEvent::new(AuditAction::Update, ResourceType::Questionnaire, id, &user.sub).emit();

    Ok(Json(questionnaire))
}

/// Delete a questionnaire, or deactivate it when responses point at it.
pub async fn delete_questionnaire(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<QuestionnaireDeleted>, ApiError> {
    let mut questionnaire = load_questionnaire(&state, &user.sub, id).await?;

    let responses: Vec<Response> =
        records::list_json(state.store(), &keys::responses_prefix(&user.sub)).await?;

    let outcome = if responses.iter().any(|r| r.questionnaire_id == id) {
        questionnaire.is_active = false;
        questionnaire.updated_at = jiff::Timestamp::now();
        records::save_json(state.store(), &keys::questionnaire(&user.sub, id), &questionnaire)
            .await?;
        AuditEvent::new(AuditAction::Deactivate, ResourceType::Questionnaire, id, &user.sub)
            .emit();
        DeleteOutcome::Deactivated
    } else {
        let links: Vec<PublicLink> =
            records::list_json(state.store(), &keys::links_prefix(&user.sub)).await?;
        for link in links.iter().filter(|l| l.questionnaire_id == id) {
            state.store().delete(&keys::public_link(&link.token)).await?;
            state
                .store()
                .delete(&keys::link_pointer(&user.sub, &link.token))
                .await?;
        }
        state.store().delete(&keys::questionnaire(&user.sub, id)).await?;
        AuditEvent::new(AuditAction::Delete, ResourceType::Questionnaire, id, &user.sub).emit();
        DeleteOutcome::Deleted
    };

    Ok(Json(QuestionnaireDeleted { id, outcome }))
}

pub async fn duplicate_questionnaire(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Questionnaire>, ApiError> {
    let source = load_questionnaire(&state, &user.sub, id).await?;
    let existing = all_questionnaires(&state, &user.sub).await?;

    let mut copy = duplicate::duplicate_questionnaire(
        &source,
        existing.iter().map(|q| q.title.as_str()),
        jiff::Timestamp::now(),
    );

    save_questionnaire(&state, &mut copy).await?;
    AuditEvent::new(AuditAction::Duplicate, ResourceType::Questionnaire, copy.id, &user.sub)
        .with_details(serde_json::json!({ "source_id": id }))
        .emit();

    Ok(Json(copy))
}

pub async fn preview_questionnaire(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<RenderedForm>, ApiError> {
    let questionnaire = load_questionnaire(&state, &user.sub, id).await?;
    Ok(Json(render_form(&questionnaire)))
}

/// Apply a builder operation to a questionnaire's questions and save it.
async fn edit_questions<F>(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    edit: F,
) -> Result<Questionnaire, ApiError>
where
    F: FnOnce(&mut Vec<Question>) -> Result<Uuid, ApiError>,
{
    let mut questionnaire = load_questionnaire(state, &user.sub, id).await?;
    let question_id = edit(&mut questionnaire.questions)?;

    save_questionnaire(state, &mut questionnaire).await?;
    AuditEvent::new(AuditAction::Update, ResourceType::Question, question_id, &user.sub)
        .with_details(serde_json::json!({ "questionnaire_id": id }))
        .emit();

    Ok(questionnaire)
}

pub async fn insert_question(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<InsertQuestionRequest>,
) -> Result<Json<Questionnaire>, ApiError> {
    let question = req.question.into_question();
    let questionnaire = edit_questions(&state, &user, id, |questions| {
        Ok(match req.position {
            Some(position) => builder::insert_at(questions, question, position),
            None => builder::append(questions, question),
        })
    })
    .await?;
    Ok(Json(questionnaire))
}

pub async fn update_question(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path((id, question_id)): Path<(Uuid, Uuid)>,
    Json(input): Json<QuestionInput>,
) -> Result<Json<Questionnaire>, ApiError> {
    let mut question = input.into_question();
    question.id = question_id;
    let questionnaire = edit_questions(&state, &user, id, |questions| {
        builder::replace_question(questions, question)?;
        Ok(question_id)
    })
    .await?;
    Ok(Json(questionnaire))
}

pub async fn delete_question(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path((id, question_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Questionnaire>, ApiError> {
    let questionnaire = edit_questions(&state, &user, id, |questions| {
        builder::remove_question(questions, question_id)?;
        Ok(question_id)
    })
    .await?;
    Ok(Json(questionnaire))
}

pub async fn duplicate_question(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path((id, question_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Questionnaire>, ApiError> {
    let questionnaire = edit_questions(&state, &user, id, |questions| {
        Ok(builder::duplicate_question(questions, question_id)?)
    })
    .await?;
    Ok(Json(questionnaire))
}

pub async fn reorder_question(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<ReorderRequest>,
) -> Result<Json<Questionnaire>, ApiError> {
    let questionnaire = edit_questions(&state, &user, id, |questions| {
        builder::move_question(questions, req.from, req.to)?;
        Ok(questions[req.to].id)
    })
    .await?;
    Ok(Json(questionnaire))
}

pub async fn insert_from_bank(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<FromBankRequest>,
) -> Result<Json<Questionnaire>, ApiError> {
    let entry: BankQuestion = records::load_json_opt(
        state.store(),
        &keys::bank_question(&user.sub, req.bank_question_id),
    )
    .await?
    .ok_or_else(|| {
        ApiError::NotFound(format!("bank question not found: {}", req.bank_question_id))
    })?;

    let questionnaire = edit_questions(&state, &user, id, |questions| {
        Ok(builder::insert_from_bank(questions, &entry, req.position))
    })
    .await?;
    Ok(Json(questionnaire))
}
