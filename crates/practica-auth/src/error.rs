use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Sign-in or refresh was rejected by the identity provider.
    #[error("sign-in rejected: {0}")]
    AuthFailed(String),

    #[error("MFA code rejected: {0}")]
    MfaFailed(String),

    #[error("token has expired")]
    TokenExpired,

    /// Signature and claims were valid but the token is not usable here.
    #[error("token not accepted: {0}")]
    InvalidToken(String),

    #[error("token verification failed: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("verifier misconfigured: {0}")]
    Config(String),
}
