use axum::extract::State;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use practica_audit::{AuditAction, AuditEvent, ResourceType};
use practica_core::keys;
use practica_core::models::profile::DoctorProfile;
use practica_storage::records;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::routes::clean;
use crate::state::AppState;

#[derive(Serialize)]
pub struct Me {
    pub sub: String,
    pub email: Option<String>,
    pub profile: Option<DoctorProfile>,
}

#[derive(Deserialize)]
pub struct ProfileInput {
    pub full_name: String,
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default)]
    pub practice_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

pub async fn me(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Me>, ApiError> {
    let profile = records::load_json_opt(state.store(), &keys::profile(&user.sub)).await?;
    Ok(Json(Me {
        sub: user.sub,
        email: user.email,
        profile,
    }))
}

pub async fn update_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(input): Json<ProfileInput>,
) -> Result<Json<DoctorProfile>, ApiError> {
    let full_name = input.full_name.trim().to_string();
    if full_name.is_empty() {
        return Err(ApiError::invalid("full_name", "Name is required"));
    }

    let profile = DoctorProfile {
        doctor_id: user.sub.clone(),
        full_name,
        specialty: clean(input.specialty),
        practice_name: clean(input.practice_name),
        phone: clean(input.phone),
        updated_at: jiff::Timestamp::now(),
    };
    records::save_json(state.store(), &keys::profile(&user.sub), &profile).await?;

    AuditEvent::new(AuditAction::Update, ResourceType::Profile, &user.sub, &user.sub).emit();

    Ok(Json(profile))
}
