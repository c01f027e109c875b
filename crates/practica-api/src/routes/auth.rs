use axum::Json;
use axum::extract::State;
use serde::Deserialize;

use practica_audit::{AuditAction, AuditEvent, ResourceType};
use practica_auth::flows::{self, AuthResult, AuthTokens};

use crate::error::ApiError;
use crate::state::{AppState, CognitoSignIn};

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct MfaRequest {
    pub username: String,
    pub session: String,
    pub code: String,
}

#[derive(Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

fn sign_in(state: &AppState) -> Result<&CognitoSignIn, ApiError> {
    state
        .cognito
        .as_ref()
        .ok_or_else(|| ApiError::BadRequest("sign-in is not configured".to_string()))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResult>, ApiError> {
    let cognito = sign_in(&state)?;
    let result =
        flows::initiate_auth(&cognito.client, &cognito.client_id, &req.username, &req.password)
            .await?;

    if matches!(result, AuthResult::Authenticated(_)) {
        AuditEvent::new(AuditAction::Login, ResourceType::Session, "password", &req.username)
            .emit();
    }

    Ok(Json(result))
}

pub async fn mfa(
    State(state): State<AppState>,
    Json(req): Json<MfaRequest>,
) -> Result<Json<AuthTokens>, ApiError> {
    let cognito = sign_in(&state)?;
    let tokens = flows::respond_to_mfa(
        &cognito.client,
        &cognito.client_id,
        &req.username,
        &req.session,
        &req.code,
    )
    .await?;

    AuditEvent::new(AuditAction::Login, ResourceType::Session, "mfa", &req.username).emit();

    Ok(Json(tokens))
}

pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<AuthTokens>, ApiError> {
    let cognito = sign_in(&state)?;
    let tokens = flows::refresh_auth(&cognito.client, &cognito.client_id, &req.refresh_token).await?;
    Ok(Json(tokens))
}
