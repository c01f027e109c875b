use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use practica_audit::{AuditAction, AuditEvent, ResourceType};
use practica_core::keys;
use practica_core::models::question_bank::BankQuestion;
use practica_forms::validation::validate_question;
use practica_storage::records;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::routes::clean;
use crate::routes::questionnaires::QuestionInput;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct BankQuestionInput {
    pub question: QuestionInput,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Deserialize)]
pub struct BankQuery {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
}

#[derive(Serialize)]
pub struct BankQuestionDeleted {
    pub id: Uuid,
}

fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut tags: Vec<String> = tags
        .into_iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect();
    tags.sort();
    tags.dedup();
    tags
}

async fn load_bank_question(
    state: &AppState,
    doctor_id: &str,
    id: Uuid,
) -> Result<BankQuestion, ApiError> {
    records::load_json_opt(state.store(), &keys::bank_question(doctor_id, id))
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("bank question not found: {id}")))
}

pub async fn list_bank_questions(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<BankQuery>,
) -> Result<Json<Vec<BankQuestion>>, ApiError> {
    let mut entries: Vec<BankQuestion> =
        records::list_json(state.store(), &keys::question_bank_prefix(&user.sub)).await?;

    if let Some(category) = clean(query.category) {
        entries.retain(|e| e.category.as_deref() == Some(category.as_str()));
    }
    if let Some(tag) = clean(query.tag).map(|t| t.to_lowercase()) {
        entries.retain(|e| e.tags.contains(&tag));
    }
    entries.sort_by(|a, b| a.question.question_text.cmp(&b.question.question_text));

    Ok(Json(entries))
}

pub async fn get_bank_question(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<BankQuestion>, ApiError> {
    Ok(Json(load_bank_question(&state, &user.sub, id).await?))
}

pub async fn create_bank_question(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(input): Json<BankQuestionInput>,
) -> Result<Json<BankQuestion>, ApiError> {
    let question = input.question.into_question();
    validate_question(&question)?;

    let now = jiff::Timestamp::now();
    let entry = BankQuestion {
        id: Uuid::new_v4(),
        doctor_id: user.sub.clone(),
        question,
        category: clean(input.category),
        tags: normalize_tags(input.tags),
        created_at: now,
        updated_at: now,
    };

    records::save_json(state.store(), &keys::bank_question(&user.sub, entry.id), &entry).await?;
    AuditEvent::new(AuditAction::Create, ResourceType::BankQuestion, entry.id, &user.sub).emit();

    Ok(Json(entry))
}

/// Edits affect future insertions only; questionnaires hold their own copies.
pub async fn update_bank_question(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(input): Json<BankQuestionInput>,
) -> Result<Json<BankQuestion>, ApiError> {
    let mut entry = load_bank_question(&state, &user.sub, id).await?;

    let mut question = input.question.into_question();
    question.id = entry.question.id;
    validate_question(&question)?;

    entry.question = question;
    entry.category = clean(input.category);
    entry.tags = normalize_tags(input.tags);
    entry.updated_at = jiff::Timestamp::now();

    records::save_json(state.store(), &keys::bank_question(&user.sub, id), &entry).await?;
    AuditEvent::new(AuditAction::Update, ResourceType::BankQuestion, id, &user.sub).emit();

    Ok(Json(entry))
}

pub async fn delete_bank_question(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<BankQuestionDeleted>, ApiError> {
    load_bank_question(&state, &user.sub, id).await?;
    state.store().delete(&keys::bank_question(&user.sub, id)).await?;
    AuditEvent::new(AuditAction::Delete, ResourceType::BankQuestion, id, &user.sub).emit();
    Ok(Json(BankQuestionDeleted { id }))
}
