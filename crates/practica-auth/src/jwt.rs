use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Claims carried by an accepted bearer token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iss: String,
    pub token_use: String,
    pub exp: u64,
    pub iat: u64,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

/// Issuer URL of a Cognito user pool.
pub fn cognito_issuer(region: &str, user_pool_id: &str) -> String {
    format!("https://cognito-idp.{region}.amazonaws.com/{user_pool_id}")
}

/// Verifies bearer tokens against one key and one issuer.
///
/// Deployed environments use [`TokenVerifier::cognito`] with the user pool's
/// RS256 public key. Local runs can use [`TokenVerifier::shared_secret`]
/// with HS256 tokens.
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
    issuer: String,
}

impl TokenVerifier {
    pub fn cognito(decoding_key: DecodingKey, user_pool_id: &str, region: &str) -> Self {
        Self::new(
            decoding_key,
            Algorithm::RS256,
            cognito_issuer(region, user_pool_id),
        )
    }

    /// [`TokenVerifier::cognito`] from a PEM-encoded RSA public key.
    pub fn cognito_from_pem(pem: &[u8], user_pool_id: &str, region: &str) -> Result<Self, AuthError> {
        let key = DecodingKey::from_rsa_pem(pem)
            .map_err(|e| AuthError::Config(format!("invalid RSA public key: {e}")))?;
        Ok(Self::cognito(key, user_pool_id, region))
    }

    pub fn shared_secret(secret: &[u8], issuer: &str) -> Self {
        Self::new(
            DecodingKey::from_secret(secret),
            Algorithm::HS256,
            issuer.to_string(),
        )
    }

    fn new(key: DecodingKey, algorithm: Algorithm, issuer: String) -> Self {
        let mut validation = Validation::new(algorithm);
        validation.set_issuer(&[&issuer]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation.validate_exp = true;
        // Cognito access tokens carry no `aud`.
        validation.validate_aud = false;

        Self {
            key,
            validation,
            issuer,
        }
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Check signature, expiry, issuer, and `token_use`.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let token_data = decode::<Claims>(token, &self.key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::Jwt(e),
            }
        })?;

        let token_use = &token_data.claims.token_use;
        if token_use != "access" && token_use != "id" {
            return Err(AuthError::InvalidToken(format!(
                "unexpected token_use: {token_use}"
            )));
        }

        Ok(token_data.claims)
    }
}
