//! Startup configuration, read once from the environment.

use thiserror::Error;

pub const DEFAULT_BUCKET: &str = "practica";
pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_LINK_TTL_HOURS: u32 = 72;
pub const MAX_LINK_TTL_HOURS: u32 = 720;
pub const DEFAULT_LOCAL_ISSUER: &str = "practica-local";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    S3,
    Memory,
}

/// How bearer tokens are checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenMode {
    /// RS256 tokens issued by the Cognito user pool.
    Cognito { public_key_pem: String },
    /// HS256 tokens signed with a shared secret, for local runs.
    SharedSecret { secret: String, issuer: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub storage: StorageBackend,
    pub bucket: String,
    pub region: String,
    pub cognito_user_pool_id: Option<String>,
    pub cognito_client_id: Option<String>,
    pub token: TokenMode,
    /// Serve plain HTTP on this address instead of running under Lambda.
    pub listen_addr: Option<String>,
    pub link_ttl_hours: u32,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the config from any variable lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let storage = match get("PRACTICA_STORAGE").as_deref() {
            None | Some("s3") => StorageBackend::S3,
            Some("memory") => StorageBackend::Memory,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: "PRACTICA_STORAGE",
                    reason: format!("expected 's3' or 'memory', got '{other}'"),
                });
            }
        };

        let cognito_user_pool_id = get("COGNITO_USER_POOL_ID");

        let token = if let Some(secret) = get("PRACTICA_JWT_SECRET") {
            TokenMode::SharedSecret {
                secret,
                issuer: get("PRACTICA_JWT_ISSUER")
                    .unwrap_or_else(|| DEFAULT_LOCAL_ISSUER.to_string()),
            }
        } else {
            let public_key_pem =
                get("PRACTICA_JWT_PUBLIC_KEY_PEM").ok_or(ConfigError::Missing(
                    "PRACTICA_JWT_PUBLIC_KEY_PEM (or PRACTICA_JWT_SECRET)",
                ))?;
            if cognito_user_pool_id.is_none() {
                return Err(ConfigError::Missing("COGNITO_USER_POOL_ID"));
            }
            TokenMode::Cognito { public_key_pem }
        };

        let link_ttl_hours = match get("PRACTICA_LINK_TTL_HOURS") {
            None => DEFAULT_LINK_TTL_HOURS,
            Some(raw) => parse_ttl(&raw)?,
        };

        Ok(Self {
            storage,
            bucket: get("PRACTICA_BUCKET").unwrap_or_else(|| DEFAULT_BUCKET.to_string()),
            region: get("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
            cognito_user_pool_id,
            cognito_client_id: get("COGNITO_CLIENT_ID"),
            token,
            listen_addr: get("PRACTICA_LISTEN_ADDR"),
            link_ttl_hours,
        })
    }
}

fn parse_ttl(raw: &str) -> Result<u32, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        var: "PRACTICA_LINK_TTL_HOURS",
        reason,
    };

    let hours: u32 = raw
        .trim()
        .parse()
        .map_err(|_| invalid(format!("'{raw}' is not a whole number of hours")))?;

    if (1..=MAX_LINK_TTL_HOURS).contains(&hours) {
        Ok(hours)
    } else {
        Err(invalid(format!("must be between 1 and {MAX_LINK_TTL_HOURS}")))
    }
}
