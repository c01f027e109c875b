use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use practica_audit::{AuditAction, AuditEvent, ResourceType};
use practica_core::keys;
use practica_core::models::appointment::Appointment;
use practica_core::models::document::Document;
use practica_core::models::patient::Patient;
use practica_core::models::public_link::PublicLink;
use practica_core::models::response::Response;
use practica_forms::error::ValidationErrors;
use practica_storage::records;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::routes::clean;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct PatientInput {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub date_of_birth: Option<jiff::civil::Date>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl PatientInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.first_name.trim().is_empty() {
            errors.add("first_name", "First name is required");
        }
        if self.last_name.trim().is_empty() {
            errors.add("last_name", "Last name is required");
        }
        if let Some(email) = self.email.as_deref().map(str::trim)
            && !email.is_empty()
            && !email.contains('@')
        {
            errors.add("email", "Email address is not valid");
        }
        if let Some(dob) = self.date_of_birth
            && dob > jiff::Zoned::now().date()
        {
            errors.add("date_of_birth", "Date of birth is in the future");
        }
        errors.into_result()
    }

    fn apply(self, patient: &mut Patient) {
        patient.first_name = self.first_name.trim().to_string();
        patient.last_name = self.last_name.trim().to_string();
        patient.date_of_birth = self.date_of_birth;
        patient.email = clean(self.email);
        patient.phone = clean(self.phone);
        patient.notes = clean(self.notes);
    }
}

#[derive(Deserialize)]
pub struct PatientQuery {
    #[serde(default)]
    pub q: Option<String>,
}

#[derive(Serialize)]
pub struct PatientDeleted {
    pub id: Uuid,
    pub documents_removed: usize,
    pub appointments_removed: usize,
    pub links_removed: usize,
}

/// Load one of the doctor's patients; 404 when it belongs to nobody or
/// to another doctor.
pub(crate) async fn load_patient(
    state: &AppState,
    doctor_id: &str,
    id: Uuid,
) -> Result<Patient, ApiError> {
    records::load_json_opt(state.store(), &keys::patient(doctor_id, id))
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("patient not found: {id}")))
}

pub async fn list_patients(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<PatientQuery>,
) -> Result<Json<Vec<Patient>>, ApiError> {
    let mut patients: Vec<Patient> =
        records::list_json(state.store(), &keys::patients_prefix(&user.sub)).await?;

    if let Some(q) = clean(query.q) {
        patients.retain(|p| p.matches(&q));
    }
    patients.sort_by(|a, b| {
        (a.last_name.to_lowercase(), a.first_name.to_lowercase())
            .cmp(&(b.last_name.to_lowercase(), b.first_name.to_lowercase()))
    });

    Ok(Json(patients))
}

pub async fn get_patient(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Patient>, ApiError> {
    Ok(Json(load_patient(&state, &user.sub, id).await?))
}

pub async fn create_patient(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(input): Json<PatientInput>,
) -> Result<Json<Patient>, ApiError> {
    input.validate()?;

    let now = jiff::Timestamp::now();
    let mut patient = Patient {
        id: Uuid::new_v4(),
        doctor_id: user.sub.clone(),
        first_name: String::new(),
        last_name: String::new(),
        date_of_birth: None,
        email: None,
        phone: None,
        notes: None,
        created_at: now,
        updated_at: now,
    };
    input.apply(&mut patient);

    records::save_json(state.store(), &keys::patient(&user.sub, patient.id), &patient).await?;
    AuditEvent::new(AuditAction::Create, ResourceType::Patient, patient.id, &user.sub).emit();

    Ok(Json(patient))
}

pub async fn update_patient(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(input): Json<PatientInput>,
) -> Result<Json<Patient>, ApiError> {
    input.validate()?;

    let mut patient = load_patient(&state, &user.sub, id).await?;
    input.apply(&mut patient);
    patient.updated_at = jiff::Timestamp::now();

    records::save_json(state.store(), &keys::patient(&user.sub, id), &patient).await?;
    AuditEvent::new(AuditAction::Update, ResourceType::Patient, id, &user.sub).emit();

    Ok(Json(patient))
}

/// Delete a patient together with their documents, appointments and the
/// public links issued for them.
/// Responses are clinical history and are kept.
pub async fn delete_patient(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<PatientDeleted>, ApiError> {
    load_patient(&state, &user.sub, id).await?;
    let store = state.store();

    let documents = patient_documents(&state, &user.sub, id).await?;
    for document in &documents {
        store.delete(&keys::document(&user.sub, document.id)).await?;
    }
    records::delete_prefix(store, &keys::patient_files_prefix(&user.sub, id)).await?;

    let appointments = patient_appointments(&state, &user.sub, id).await?;
    for appointment in &appointments {
        store.delete(&keys::appointment(&user.sub, appointment.id)).await?;
    }

    let mut links: Vec<PublicLink> =
        records::list_json(store, &keys::links_prefix(&user.sub)).await?;
    links.retain(|l| l.patient_id == Some(id));
    for link in &links {
        store.delete(&keys::public_link(&link.token)).await?;
        store.delete(&keys::link_pointer(&user.sub, &link.token)).await?;
    }

    store.delete(&keys::patient(&user.sub, id)).await?;

    AuditEvent::new(AuditAction::Delete, ResourceType::Patient, id, &user.sub)
        .with_details(serde_json::json!({
            "documents_removed": documents.len(),
            "appointments_removed": appointments.len(),
            "links_removed": links.len(),
        }))
        .emit();

    Ok(Json(PatientDeleted {
        id,
        documents_removed: documents.len(),
        appointments_removed: appointments.len(),
        links_removed: links.len(),
    }))
}

pub(crate) async fn patient_documents(
    state: &AppState,
    doctor_id: &str,
    patient_id: Uuid,
) -> Result<Vec<Document>, ApiError> {
    let mut documents: Vec<Document> =
        records::list_json(state.store(), &keys::documents_prefix(doctor_id)).await?;
    documents.retain(|d| d.patient_id == patient_id);
    documents.sort_by_key(|d| std::cmp::Reverse(d.created_at));
    Ok(documents)
}

async fn patient_appointments(
    state: &AppState,
    doctor_id: &str,
    patient_id: Uuid,
) -> Result<Vec<Appointment>, ApiError> {
    let mut appointments: Vec<Appointment> =
        records::list_json(state.store(), &keys::appointments_prefix(doctor_id)).await?;
    appointments.retain(|a| a.patient_id == patient_id);
    appointments.sort_by_key(|a| a.starts_at);
    Ok(appointments)
}

pub async fn list_patient_documents(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Document>>, ApiError> {
    load_patient(&state, &user.sub, id).await?;
    Ok(Json(patient_documents(&state, &user.sub, id).await?))
}

pub async fn list_patient_responses(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Response>>, ApiError> {
    load_patient(&state, &user.sub, id).await?;

    let mut responses: Vec<Response> =
        records::list_json(state.store(), &keys::responses_prefix(&user.sub)).await?;
    responses.retain(|r| r.patient_id == Some(id));
    responses.sort_by_key(|r| std::cmp::Reverse(r.completed_at));

    Ok(Json(responses))
}

pub async fn list_patient_appointments(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Appointment>>, ApiError> {
    load_patient(&state, &user.sub, id).await?;
    Ok(Json(patient_appointments(&state, &user.sub, id).await?))
}
