use std::time::Duration;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::http::header::CONTENT_TYPE;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use practica_audit::{AuditAction, AuditEvent, ResourceType};
use practica_core::keys;
use practica_core::models::document::Document;
use practica_forms::error::ValidationErrors;
use practica_storage::records;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::routes::patients::load_patient;
use crate::state::AppState;

/// Lifetime of presigned upload and download URLs.
pub const PRESIGN_TTL: Duration = Duration::from_secs(15 * 60);

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Deserialize)]
pub struct NewDocumentRequest {
    pub filename: String,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub size_bytes: u64,
}

#[derive(Serialize)]
pub struct DocumentUpload {
    pub document: Document,
    pub upload_url: String,
    pub expires_in_secs: u64,
}

#[derive(Serialize)]
pub struct DocumentDownload {
    pub document: Document,
    pub download_url: String,
    pub expires_in_secs: u64,
}

#[derive(Serialize)]
pub struct DocumentDeleted {
    pub id: Uuid,
}

async fn load_document(state: &AppState, doctor_id: &str, id: Uuid) -> Result<Document, ApiError> {
    records::load_json_opt(state.store(), &keys::document(doctor_id, id))
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("document not found: {id}")))
}

/// Register a document for a patient and hand back a presigned upload URL.
/// Small files can instead be sent through `PUT /documents/{id}/content`.
pub async fn create_document(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(patient_id): Path<Uuid>,
    Json(req): Json<NewDocumentRequest>,
) -> Result<Json<DocumentUpload>, ApiError> {
    load_patient(&state, &user.sub, patient_id).await?;

    let mut errors = ValidationErrors::new();
    if req.filename.trim().is_empty() {
        errors.add("filename", "File name is required");
    }
    errors.into_result()?;

    let content_type = req
        .content_type
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());

    let id = Uuid::new_v4();
    let document = Document {
        id,
        doctor_id: user.sub.clone(),
        patient_id,
        filename: keys::sanitize_filename(req.filename.trim()),
        storage_key: keys::document_file(&user.sub, patient_id, id, req.filename.trim()),
        content_type,
        size_bytes: req.size_bytes,
        created_at: jiff::Timestamp::now(),
    };

    let upload_url = state
        .store()
        .presign_put(&document.storage_key, Some(document.content_type.as_str()), PRESIGN_TTL)
        .await?;
    records::save_json(state.store(), &keys::document(&user.sub, id), &document).await?;

    AuditEvent::new(AuditAction::Create, ResourceType::Document, id, &user.sub)
        .with_details(serde_json::json!({ "patient_id": patient_id }))
        .emit();

    Ok(Json(DocumentUpload {
        document,
        upload_url,
        expires_in_secs: PRESIGN_TTL.as_secs(),
    }))
}

/// Upload the document body directly. Replaces any earlier upload.
pub async fn upload_content(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Document>, ApiError> {
    let mut document = load_document(&state, &user.sub, id).await?;

    if let Some(content_type) = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
    {
        document.content_type = content_type.to_string();
    }
    document.size_bytes = body.len() as u64;

    state
        .store()
        .put(&document.storage_key, body.to_vec(), Some(document.content_type.as_str()))
        .await?;
    records::save_json(state.store(), &keys::document(&user.sub, id), &document).await?;

    AuditEvent::new(AuditAction::Upload, ResourceType::Document, id, &user.sub)
        .with_details(serde_json::json!({ "size_bytes": document.size_bytes }))
        .emit();

    Ok(Json(document))
}

pub async fn get_document(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<DocumentDownload>, ApiError> {
    let document = load_document(&state, &user.sub, id).await?;
    let download_url = state
        .store()
        .presign_get(&document.storage_key, PRESIGN_TTL)
        .await?;

    Ok(Json(DocumentDownload {
        document,
        download_url,
        expires_in_secs: PRESIGN_TTL.as_secs(),
    }))
}

pub async fn delete_document(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<DocumentDeleted>, ApiError> {
    let document = load_document(&state, &user.sub, id).await?;

    state.store().delete(&document.storage_key).await?;
    state.store().delete(&keys::document(&user.sub, id)).await?;

    AuditEvent::new(AuditAction::Delete, ResourceType::Document, id, &user.sub).emit();

    Ok(Json(DocumentDeleted { id }))
}
