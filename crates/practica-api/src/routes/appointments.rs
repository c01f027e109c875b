use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use practica_audit::{AuditAction, AuditEvent, ResourceType};
use practica_core::keys;
use practica_core::models::appointment::{Appointment, AppointmentStatus};
use practica_storage::records;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::routes::clean;
use crate::routes::patients::load_patient;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct AppointmentInput {
    pub patient_id: Uuid,
    pub starts_at: jiff::Timestamp,
    pub ends_at: jiff::Timestamp,
    #[serde(default)]
    pub status: Option<AppointmentStatus>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Calendar window. An appointment is included when it overlaps
/// `[from, to)`; either bound may be left open.
#[derive(Deserialize)]
pub struct AppointmentQuery {
    #[serde(default)]
    pub from: Option<jiff::Timestamp>,
    #[serde(default)]
    pub to: Option<jiff::Timestamp>,
}

#[derive(Serialize)]
pub struct AppointmentDeleted {
    pub id: Uuid,
}

async fn load_appointment(
    state: &AppState,
    doctor_id: &str,
    id: Uuid,
) -> Result<Appointment, ApiError> {
    records::load_json_opt(state.store(), &keys::appointment(doctor_id, id))
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("appointment not found: {id}")))
}

/// Shared checks for create and update: a real interval, an existing
/// patient, and no double booking among scheduled appointments.
async fn check_slot(state: &AppState, candidate: &Appointment) -> Result<(), ApiError> {
    if candidate.ends_at <= candidate.starts_at {
        return Err(ApiError::invalid("ends_at", "End time must be after start time"));
    }
    load_patient(state, &candidate.doctor_id, candidate.patient_id).await?;

    if candidate.status != AppointmentStatus::Scheduled {
        return Ok(());
    }

    let existing: Vec<Appointment> =
        records::list_json(state.store(), &keys::appointments_prefix(&candidate.doctor_id)).await?;
    let clash = existing.iter().find(|a| {
        a.id != candidate.id && a.status == AppointmentStatus::Scheduled && a.overlaps(candidate)
    });

    match clash {
        Some(other) => Err(ApiError::Conflict(format!(
            "overlaps appointment {} ({} to {})",
            other.id, other.starts_at, other.ends_at
        ))),
        None => Ok(()),
    }
}

pub async fn list_appointments(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<AppointmentQuery>,
) -> Result<Json<Vec<Appointment>>, ApiError> {
    let mut appointments: Vec<Appointment> =
        records::list_json(state.store(), &keys::appointments_prefix(&user.sub)).await?;

    if let Some(from) = query.from {
        appointments.retain(|a| a.ends_at > from);
    }
    if let Some(to) = query.to {
        appointments.retain(|a| a.starts_at < to);
    }
    appointments.sort_by_key(|a| a.starts_at);

    Ok(Json(appointments))
}

pub async fn get_appointment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Appointment>, ApiError> {
    Ok(Json(load_appointment(&state, &user.sub, id).await?))
}

pub async fn create_appointment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(input): Json<AppointmentInput>,
) -> Result<Json<Appointment>, ApiError> {
    let now = jiff::Timestamp::now();
    let appointment = Appointment {
        id: Uuid::new_v4(),
        doctor_id: user.sub.clone(),
        patient_id: input.patient_id,
        starts_at: input.starts_at,
        ends_at: input.ends_at,
        status: input.status.unwrap_or(AppointmentStatus::Scheduled),
        reason: clean(input.reason),
        notes: clean(input.notes),
        created_at: now,
        updated_at: now,
    };
    check_slot(&state, &appointment).await?;

    records::save_json(
        state.store(),
        &keys::appointment(&user.sub, appointment.id),
        &appointment,
    )
    .await?;
    AuditEvent::new(AuditAction::Create, ResourceType::Appointment, appointment.id, &user.sub)
        .emit();

    Ok(Json(appointment))
}

pub async fn update_appointment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(input): Json<AppointmentInput>,
) -> Result<Json<Appointment>, ApiError> {
    let mut appointment = load_appointment(&state, &user.sub, id).await?;
    appointment.patient_id = input.patient_id;
    appointment.starts_at = input.starts_at;
    appointment.ends_at = input.ends_at;
    if let Some(status) = input.status {
        appointment.status = status;
    }
    appointment.reason = clean(input.reason);
    appointment.notes = clean(input.notes);
    appointment.updated_at = jiff::Timestamp::now();
    check_slot(&state, &appointment).await?;

    records::save_json(state.store(), &keys::appointment(&user.sub, id), &appointment).await?;
    AuditEvent::new(AuditAction::Update, ResourceType::Appointment, id, &user.sub).emit();

    Ok(Json(appointment))
}

pub async fn delete_appointment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<AppointmentDeleted>, ApiError> {
    load_appointment(&state, &user.sub, id).await?;
    state.store().delete(&keys::appointment(&user.sub, id)).await?;
    AuditEvent::new(AuditAction::Delete, ResourceType::Appointment, id, &user.sub).emit();
    Ok(Json(AppointmentDeleted { id }))
}
