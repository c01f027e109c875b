use std::collections::HashMap;

use practica_api::config::{ApiConfig, ConfigError, StorageBackend, TokenMode};

fn config(vars: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    ApiConfig::from_lookup(|name| vars.get(name).cloned())
}

#[test]
fn local_mode_defaults() {
    let cfg = config(&[("PRACTICA_STORAGE", "memory"), ("PRACTICA_JWT_SECRET", "s3cret")]).unwrap();

    assert_eq!(cfg.storage, StorageBackend::Memory);
    assert_eq!(cfg.bucket, "practica");
    assert_eq!(cfg.region, "us-east-1");
    assert_eq!(cfg.link_ttl_hours, 72);
    assert!(cfg.listen_addr.is_none());
    assert_eq!(
        cfg.token,
        TokenMode::SharedSecret {
            secret: "s3cret".to_string(),
            issuer: "practica-local".to_string(),
        }
    );
}

#[test]
fn cognito_mode_needs_pool_and_key() {
    let err = config(&[("PRACTICA_JWT_PUBLIC_KEY_PEM", "pem")]).unwrap_err();
    assert_eq!(err, ConfigError::Missing("COGNITO_USER_POOL_ID"));

    let err = config(&[("COGNITO_USER_POOL_ID", "pool")]).unwrap_err();
    assert!(matches!(err, ConfigError::Missing(_)));

    let cfg = config(&[
        ("COGNITO_USER_POOL_ID", "us-east-1_abc"),
        ("COGNITO_CLIENT_ID", "client"),
        ("PRACTICA_JWT_PUBLIC_KEY_PEM", "pem"),
        ("PRACTICA_BUCKET", "clinic-data"),
        ("AWS_REGION", "eu-west-2"),
    ])
    .unwrap();
    assert_eq!(cfg.storage, StorageBackend::S3);
    assert_eq!(cfg.bucket, "clinic-data");
    assert_eq!(cfg.region, "eu-west-2");
    assert_eq!(cfg.cognito_client_id.as_deref(), Some("client"));
    assert!(matches!(cfg.token, TokenMode::Cognito { .. }));
}

#[test]
fn link_ttl_is_range_checked() {
    let base = [("PRACTICA_JWT_SECRET", "s")];

    let cfg = config(&[base[0], ("PRACTICA_LINK_TTL_HOURS", "720")]).unwrap();
    assert_eq!(cfg.link_ttl_hours, 720);

    for bad in ["0", "721", "soon", "-1"] {
        let err = config(&[base[0], ("PRACTICA_LINK_TTL_HOURS", bad)]).unwrap_err();
        assert!(
            matches!(err, ConfigError::Invalid { var: "PRACTICA_LINK_TTL_HOURS", .. }),
            "{bad}"
        );
    }
}

#[test]
fn unknown_storage_backend_is_invalid() {
    let err = config(&[("PRACTICA_STORAGE", "disk"), ("PRACTICA_JWT_SECRET", "s")]).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { var: "PRACTICA_STORAGE", .. }));
}

#[test]
fn blank_values_count_as_unset() {
    let cfg = config(&[("PRACTICA_JWT_SECRET", "s"), ("PRACTICA_LISTEN_ADDR", "  ")]).unwrap();
    assert!(cfg.listen_addr.is_none());
}
