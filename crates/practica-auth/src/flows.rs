use std::collections::HashMap;

use aws_sdk_cognitoidentityprovider::Client;
use aws_sdk_cognitoidentityprovider::types::{
    AuthFlowType, AuthenticationResultType, ChallengeNameType,
};
use serde::Serialize;
use tracing::info;

use crate::error::AuthError;

/// Tokens issued by Cognito after a completed sign-in or refresh.
#[derive(Debug, Clone, Serialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub id_token: String,
    pub refresh_token: String,
    /// Lifetime of the access token in seconds.
    pub expires_in: i32,
}

/// Outcome of a sign-in step.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AuthResult {
    Authenticated(AuthTokens),
    /// A TOTP code is needed; pass `session` back to [`respond_to_mfa`].
    MfaRequired { session: String },
}

fn tokens_from(result: &AuthenticationResultType, fallback_refresh: Option<&str>) -> AuthTokens {
    AuthTokens {
        access_token: result.access_token().unwrap_or_default().to_string(),
        id_token: result.id_token().unwrap_or_default().to_string(),
        // Cognito omits the refresh token on refresh.
        refresh_token: result
            .refresh_token()
            .or(fallback_refresh)
            .unwrap_or_default()
            .to_string(),
        expires_in: result.expires_in(),
    }
}

/// Username/password sign-in.
pub async fn initiate_auth(
    client: &Client,
    user_pool_client_id: &str,
    username: &str,
    password: &str,
) -> Result<AuthResult, AuthError> {
    info!(username = username, "initiating auth");

    let auth_params = HashMap::from([
        ("USERNAME".to_string(), username.to_string()),
        ("PASSWORD".to_string(), password.to_string()),
    ]);

    let resp = client
        .initiate_auth()
        .auth_flow(AuthFlowType::UserPasswordAuth)
        .client_id(user_pool_client_id)
        .set_auth_parameters(Some(auth_params))
        .send()
        .await
        .map_err(|e| AuthError::AuthFailed(e.into_service_error().to_string()))?;

    if let Some(result) = resp.authentication_result() {
        Ok(AuthResult::Authenticated(tokens_from(result, None)))
    } else if resp.challenge_name() == Some(&ChallengeNameType::SoftwareTokenMfa) {
        Ok(AuthResult::MfaRequired {
            session: resp.session().unwrap_or_default().to_string(),
        })
    } else {
        Err(AuthError::AuthFailed(format!(
            "unsupported challenge: {:?}",
            resp.challenge_name()
        )))
    }
}

/// Complete a software-token MFA challenge.
pub async fn respond_to_mfa(
    client: &Client,
    user_pool_client_id: &str,
    username: &str,
    session: &str,
    mfa_code: &str,
) -> Result<AuthTokens, AuthError> {
    info!(username = username, "responding to MFA challenge");

    let challenge_responses = HashMap::from([
        ("USERNAME".to_string(), username.to_string()),
        ("SOFTWARE_TOKEN_MFA_CODE".to_string(), mfa_code.to_string()),
    ]);

    let resp = client
        .respond_to_auth_challenge()
        .client_id(user_pool_client_id)
        .challenge_name(ChallengeNameType::SoftwareTokenMfa)
        .set_challenge_responses(Some(challenge_responses))
        .session(session)
        .send()
        .await
        .map_err(|e| AuthError::MfaFailed(e.into_service_error().to_string()))?;

    resp.authentication_result()
        .map(|result| tokens_from(result, None))
        .ok_or_else(|| AuthError::MfaFailed("MFA response did not return tokens".to_string()))
}

/// Exchange a refresh token for fresh access and id tokens.
pub async fn refresh_auth(
    client: &Client,
    user_pool_client_id: &str,
    refresh_token: &str,
) -> Result<AuthTokens, AuthError> {
    let auth_params = HashMap::from([("REFRESH_TOKEN".to_string(), refresh_token.to_string())]);

    let resp = client
        .initiate_auth()
        .auth_flow(AuthFlowType::RefreshTokenAuth)
        .client_id(user_pool_client_id)
        .set_auth_parameters(Some(auth_params))
        .send()
        .await
        .map_err(|e| AuthError::AuthFailed(e.into_service_error().to_string()))?;

    resp.authentication_result()
        .map(|result| tokens_from(result, Some(refresh_token)))
        .ok_or_else(|| AuthError::AuthFailed("refresh failed".to_string()))
}
