use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated doctor, taken from verified token claims.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub sub: String,
    pub email: Option<String>,
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// JWT validation middleware.
///
/// Verifies the `Authorization: Bearer <token>` header and inserts
/// [`AuthUser`] into request extensions for handlers to use. The subject
/// becomes part of every object key, so it must be a single path segment.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = {
        let token = bearer_token(req.headers())
            .ok_or_else(|| ApiError::Unauthorized("missing bearer token".to_string()))?;
        state.verifier.verify(token)?
    };

    if claims.sub.is_empty() || claims.sub.contains('/') {
        return Err(ApiError::Unauthorized("invalid token subject".to_string()));
    }

    req.extensions_mut().insert(AuthUser {
        sub: claims.sub,
        email: claims.email,
    });

    Ok(next.run(req).await)
}
